//! Error types for the task-api crate.
//!
//! Messages never include the bearer token or request bodies beyond a short
//! excerpt of the server's error response.

/// Errors that can occur while talking to the calendar task API.
#[derive(Debug, thiserror::Error)]
pub enum TaskApiError {
    /// The request could not be sent or the connection failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status code.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The server processed the request but reported `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for TaskApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}

/// Convenience type alias for task-api results.
pub type Result<T> = std::result::Result<T, TaskApiError>;
