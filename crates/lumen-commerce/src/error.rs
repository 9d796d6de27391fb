//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in catalog, cart and order operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Range with a lower bound above its upper bound.
    #[error("Invalid range: {lo} > {hi}")]
    InvalidRange { lo: u32, hi: u32 },

    /// Unknown sort slug.
    #[error("Unknown sort option: {0}")]
    UnknownSort(String),

    /// Negative or non-finite price on the wire.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
