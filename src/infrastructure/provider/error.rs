use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the LLM provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Invalid request parameters or malformed request body.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to an invalid or missing API key.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider-reported rate limit; retry after backing off.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider-side server error (5xx).
    #[error("Provider server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network error during request or while streaming the response.
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Request timed out waiting for a response.
    #[error("Timeout waiting for response")]
    Timeout,

    /// Status code the taxonomy does not recognize.
    #[error("Unexpected response (HTTP {0}): {1}")]
    Unexpected(StatusCode, String),
}

impl ProviderError {
    /// Whether retrying this error may succeed.
    ///
    /// Transient: rate limits, 5xx server errors, timeouts, and network
    /// failures. Fatal: bad requests, bad credentials, and unrecognized
    /// responses — retrying cannot help those.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded
                | Self::ServerError(_, _)
                | Self::NetworkError(_)
                | Self::Timeout
        )
    }

    /// Classify an HTTP error status into the provider error taxonomy.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidRequest(body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::AuthenticationFailed(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            StatusCode::REQUEST_TIMEOUT => Self::Timeout,
            s if s.is_server_error() => Self::ServerError(s, body),
            s => Self::Unexpected(s, body),
        }
    }
}
