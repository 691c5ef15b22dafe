//! OAuth access-token lifecycle for the Zoho accounts service.

use crate::client_error::{ClientError, Result};
use crate::config::{self, ClientConfig};
use crate::domain::Domain;
use crate::token_record::TokenRecord;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The only OAuth flow this crate performs.
pub const GRANT_TYPE: &str = "refresh_token";

/// Credential material needed to mint access tokens.
#[derive(Debug, Clone)]
pub struct Credential {
    pub domain: Domain,
    pub refresh_token: SecretString,
    pub client_id: String,
    pub client_secret: SecretString,
    pub grant_type: String,
}

impl Credential {
    /// Create a credential for the `refresh_token` grant.
    pub fn new(
        domain: Domain,
        refresh_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Credential {
        Credential {
            domain,
            refresh_token: SecretString::from(refresh_token.into()),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            grant_type: String::from(GRANT_TYPE),
        }
    }

    /// Read `ZOHO_DOMAIN`, `ZOHO_REFRESH_TOKEN`, `ZOHO_CLIENT_ID`, `ZOHO_CLIENT_SECRET` and the
    /// optional `ZOHO_GRANT_TYPE` from the environment.
    pub fn from_env() -> Result<Credential> {
        Credential::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Credential>
    where
        F: Fn(&str) -> Option<String>,
    {
        let domain = config::required(&lookup, "ZOHO_DOMAIN")?.parse::<Domain>()?;
        let mut credential = Credential::new(
            domain,
            config::required(&lookup, "ZOHO_REFRESH_TOKEN")?,
            config::required(&lookup, "ZOHO_CLIENT_ID")?,
            config::required(&lookup, "ZOHO_CLIENT_SECRET")?,
        );

        if let Some(grant_type) = lookup("ZOHO_GRANT_TYPE") {
            credential.grant_type = grant_type;
        }

        Ok(credential)
    }
}

#[derive(Default)]
struct TokenState {
    access_token: Option<SecretString>,
    expires_at: Option<DateTime<Utc>>,
}

impl TokenState {
    /// The cached token, if one exists and `now` is still before its expiry.
    fn current(&self, now: DateTime<Utc>) -> Option<&SecretString> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expires_at)) if now < expires_at => Some(token),
            _ => None,
        }
    }
}

/// Hands out a valid access token, refreshing it from the accounts server when it is
/// missing or expired.
///
/// The manager is meant to be shared (`Arc<TokenManager>`) by every thread talking to the
/// same Zoho organization. Refreshes are single-flight: callers arriving while a refresh is
/// in progress block until it finishes and then reuse its token.
///
/// ```no_run
/// use zoho_crm_client::TokenManager;
///
/// let manager = TokenManager::new(
///     "united states",
///     "YOUR_REFRESH_TOKEN",
///     "YOUR_CLIENT_ID",
///     "YOUR_CLIENT_SECRET",
///     "refresh_token",
/// )?;
///
/// let token = manager.access_token()?;
/// # Ok::<(), zoho_crm_client::ClientError>(())
/// ```
pub struct TokenManager {
    credential: Credential,
    http: reqwest::blocking::Client,
    state: Mutex<TokenState>,
}

impl TokenManager {
    /// Create a manager from the five credential fields. An unrecognized `domain` or a grant
    /// type other than `refresh_token` fails here, not on first use.
    pub fn new(
        domain: &str,
        refresh_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        grant_type: impl Into<String>,
    ) -> Result<TokenManager> {
        let mut credential = Credential::new(domain.parse()?, refresh_token, client_id, client_secret);
        credential.grant_type = grant_type.into();

        TokenManager::from_credential(credential, ClientConfig::default())
    }

    pub fn from_credential(credential: Credential, config: ClientConfig) -> Result<TokenManager> {
        if credential.grant_type != GRANT_TYPE {
            return Err(ClientError::Configuration(format!(
                "unsupported grant type {:?}, expected {:?}",
                credential.grant_type, GRANT_TYPE
            )));
        }

        if credential.client_id.trim().is_empty() {
            return Err(ClientError::Configuration(String::from("client id is empty")));
        }

        Ok(TokenManager {
            credential,
            http: config.http_client()?,
            state: Mutex::new(TokenState::default()),
        })
    }

    /// Build a manager from [`Credential::from_env`] and [`ClientConfig::from_env`].
    pub fn from_env() -> Result<TokenManager> {
        TokenManager::from_credential(Credential::from_env()?, ClientConfig::from_env()?)
    }

    pub fn domain(&self) -> &Domain {
        &self.credential.domain
    }

    /// Return a token that is valid right now.
    ///
    /// A cached, unexpired token is returned without a network call. Otherwise one request
    /// goes to the accounts server while the state lock is held. Failures are never retried
    /// here and leave no token behind, so the next call tries again.
    pub fn access_token(&self) -> Result<String> {
        let mut state = self.state.lock();

        if let Some(token) = state.current(Utc::now()) {
            return Ok(token.expose_secret().to_owned());
        }

        debug!(domain = %self.credential.domain, "access token missing or expired, refreshing");

        match self.request_token() {
            Ok((token, expires_at)) => {
                info!(
                    domain = %self.credential.domain,
                    token = %abbreviate_token(&token),
                    %expires_at,
                    "refreshed access token"
                );
                state.access_token = Some(SecretString::from(token.clone()));
                state.expires_at = Some(expires_at);
                Ok(token)
            }
            Err(error) => {
                *state = TokenState::default();
                Err(error)
            }
        }
    }

    /// When the cached token expires, or `None` if no token is held.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let state = self.state.lock();
        state.access_token.as_ref().and(state.expires_at)
    }

    /// Whether the next [`access_token`](Self::access_token) call will hit the network.
    pub fn is_expired(&self) -> bool {
        self.state.lock().current(Utc::now()).is_none()
    }

    /// Drop the cached token, e.g. after the CRM answered `INVALID_TOKEN`.
    pub fn invalidate(&self) {
        *self.state.lock() = TokenState::default();
    }

    /// Exchange the refresh token for a new access token and its expiry.
    fn request_token(&self) -> Result<(String, DateTime<Utc>)> {
        let url = self.credential.domain.token_url();
        let form = [
            ("refresh_token", self.credential.refresh_token.expose_secret()),
            ("client_id", self.credential.client_id.as_str()),
            ("client_secret", self.credential.client_secret.expose_secret()),
            ("grant_type", self.credential.grant_type.as_str()),
        ];

        let issued_at = Utc::now();
        let response = self.http.post(url.as_str()).form(&form).send().map_err(|error| {
            error!(%url, %error, "token request failed");
            ClientError::Network(error)
        })?;

        let status = response.status();
        let raw_response = response.text()?;

        if !status.is_success() {
            warn!(%url, %status, "token request rejected");
            return Err(ClientError::Authentication(format!(
                "token endpoint returned {}: {}",
                status, raw_response
            )));
        }

        let record: TokenRecord = serde_json::from_str(&raw_response).map_err(|_| {
            ClientError::Authentication(format!("unreadable token response: {}", raw_response))
        })?;

        if let Some(error) = record.error.clone() {
            warn!(%url, %error, "token request rejected");
            return Err(ClientError::Authentication(error));
        }

        let token = match record.access_token.clone() {
            Some(token) if !token.is_empty() => token,
            _ => return Err(ClientError::Authentication(String::from("No token received"))),
        };

        let expires_at = record
            .lifetime()
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                warn!(%url, "token response has an out-of-range expiry");
                ClientError::Authentication(String::from("token response has an invalid expiry"))
            })?;

        Ok((token, expires_at))
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("domain", &self.credential.domain)
            .field("client_id", &self.credential.client_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Shorten a token to its first nine and last four characters for log output.
pub fn abbreviate_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();

    if chars.len() < 16 {
        return String::from("***");
    }

    let prefix: String = chars[..9].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();

    format!("{}..{}", prefix, suffix)
}

/// Anything that can produce a bearer token for a single request.
///
/// Implemented for plain strings (a token the caller already holds) and for
/// [`TokenManager`], so every [`Client`](crate::Client) operation takes either.
pub trait TokenSource {
    fn bearer_token(&self) -> Result<String>;
}

impl TokenSource for str {
    fn bearer_token(&self) -> Result<String> {
        Ok(self.to_owned())
    }
}

impl TokenSource for String {
    fn bearer_token(&self) -> Result<String> {
        Ok(self.clone())
    }
}

impl TokenSource for TokenManager {
    fn bearer_token(&self) -> Result<String> {
        self.access_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    fn bearer_token(&self) -> Result<String> {
        (**self).bearer_token()
    }
}
