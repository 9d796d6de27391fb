//! Authentication errors.

use lumen_data::FetchError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The service refused the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The service answered with an error other than bad credentials,
    /// such as an already registered email.
    #[error("rejected by auth service (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a usable answer.
    #[error("auth request failed: {0}")]
    Transport(#[from] FetchError),

    /// Input failed local validation; nothing was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials)
    }

    /// Map a failed response status onto the auth error space.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => AuthError::InvalidCredentials,
            _ => AuthError::Rejected { status, message },
        }
    }
}
