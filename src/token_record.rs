use chrono::Duration;
use serde::Deserialize;

/// Lifetime assumed when Zoho omits every expiry field.
const FALLBACK_LIFETIME_SECS: i64 = 50 * 60;

/// Wrapper around a token sent back from the Zoho accounts service.
///
/// Zoho answers a revoked or unknown refresh token with HTTP 200 and only the `error`
/// field set, so every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRecord {
    pub access_token: Option<String>,
    pub api_domain: Option<String>,
    pub error: Option<String>,
    pub expires_in_sec: Option<i64>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}

impl TokenRecord {
    /// How long the token stays valid from the moment it was issued.
    ///
    /// Older responses carry `expires_in_sec` next to an `expires_in` in milliseconds, so
    /// the explicit seconds field wins when both are present. `None` when the value does not
    /// fit a `Duration`.
    pub fn lifetime(&self) -> Option<Duration> {
        let secs = self
            .expires_in_sec
            .or(self.expires_in)
            .unwrap_or(FALLBACK_LIFETIME_SECS);

        Duration::try_seconds(secs.max(0))
    }
}
