//! Storefront error types.

use lumen_auth::AuthError;
use lumen_cache::CacheError;
use lumen_commerce::CommerceError;
use lumen_data::FetchError;
use thiserror::Error;

/// Errors surfaced by storefront operations.
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The order service did not accept the order. The cart is kept.
    #[error("order not placed: {0}")]
    Order(#[source] FetchError),

    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    #[error("persistence failed: {0}")]
    Persistence(#[from] CacheError),

    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error("configuration error: {0:#}")]
    Config(anyhow::Error),
}

impl StorefrontError {
    /// Whether retrying the same operation later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            StorefrontError::Fetch(e) | StorefrontError::Order(e) => e.is_transient(),
            StorefrontError::Auth(AuthError::Transport(e)) => e.is_transient(),
            _ => false,
        }
    }
}

/// Result type for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;
