//! Client configuration options and environment loading.

use crate::client_error::{ClientError, Result};
use std::time::Duration;

/// Default network timeout for API requests, in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Settings shared by the token manager and the API client.
///
/// ```
/// use std::time::Duration;
/// use zoho_crm_client::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("crm-sync/2.1");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request timeout, covering connect and body transfer.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            user_agent: format!("zoho-crm-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout for API requests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Read `ZOHO_TIMEOUT_SECS` from the environment, keeping defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("ZOHO_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Configuration(format!("ZOHO_TIMEOUT_SECS must be a whole number, got {:?}", raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Build the blocking HTTP client these settings describe.
    pub(crate) fn http_client(&self) -> Result<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|error| ClientError::Configuration(format!("cannot build HTTP client: {}", error)))
    }
}

/// Fetch a variable that must be present and non-blank.
pub(crate) fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ClientError::Configuration(format!("{} is not set", key))),
    }
}
