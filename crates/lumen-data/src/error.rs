//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to build or send the request.
    #[error("Request failed: {0}")]
    Request(String),

    /// Could not reach the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request exceeded its time budget.
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx HTTP response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body was not what the contract promises.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// The service answered but the requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl FetchError {
    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Connection(_) => true,
            FetchError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::Timeout.is_transient());
        assert!(FetchError::Connection("refused".into()).is_transient());
        assert!(FetchError::Http { status: 503, message: String::new() }.is_transient());
        assert!(!FetchError::Http { status: 404, message: String::new() }.is_transient());
        assert!(!FetchError::Parse("eof".into()).is_transient());
    }

    #[test]
    fn test_status() {
        let err = FetchError::Http { status: 401, message: "nope".into() };
        assert_eq!(err.status(), Some(401));
        assert_eq!(FetchError::Timeout.status(), None);
    }
}
