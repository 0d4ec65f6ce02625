use thiserror::Error;

/// Fallback when a failure carries no readable message.
pub const GENERIC_FAILURE: &str = "Request failed.";

/// A 2xx response whose body does not decode.
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from server.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 401. The caller clears the session and redirects to login.
    #[error("unauthorized")]
    Unauthorized,

    /// HTTP 403. Shown in place; the session is left alone.
    #[error("forbidden")]
    Forbidden,

    /// Any other failure, including no response at all.
    #[error("{0}")]
    Failed(String),
}

impl ApiError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    pub fn generic() -> Self {
        Self::failed(GENERIC_FAILURE)
    }
}
