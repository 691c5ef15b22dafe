use crate::response::ApiErrorResponse;
use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Various errors returned by the token manager and the API client.
///
/// Non-success statuses from the CRM endpoints are *not* errors: the record and file
/// operations hand the response back so the caller can read Zoho's own error payload.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Unsupported domain, malformed base URL, or missing environment settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required identifier or value was missing or empty. Raised before any request is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The authorization endpoint rejected the credentials or returned no token.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The request could not be sent or did not complete (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A local attachment file could not be opened.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A body could not be serialized or parsed as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error payload returned by a CRM endpoint, surfaced only by the parsing helpers.
    #[error("API error: {0}")]
    Api(ApiErrorResponse),
}

impl ClientError {
    /// Returns `true` for transport failures, the only kind a caller may reasonably retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// Returns `true` when new credentials (or a refresh) are needed.
    pub fn is_auth_error(&self) -> bool {
        match self {
            ClientError::Authentication(_) => true,
            ClientError::Api(error) => error.code == "INVALID_TOKEN" || error.code == "AUTHENTICATION_FAILURE",
            _ => false,
        }
    }
}
