//! Durable key-value store for the Lumen storefront.
//!
//! Stores JSON values either in a directory (one file per key) or in
//! memory, and offers typed [`Record`] slots for the fixed session keys.
//!
//! # Example
//!
//! ```rust,ignore
//! use lumen_cache::{Cache, Record, CART_KEY};
//!
//! let cache = Cache::open(dir)?;
//! let record: Record<Cart> = Record::new(cache, CART_KEY);
//!
//! let cart = record.load().unwrap_or_default();
//! record.store(&cart)?;
//! ```

mod error;
mod kv;
mod record;

pub use error::CacheError;
pub use kv::Cache;
pub use record::{Record, CART_KEY, USER_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, Record, CART_KEY, USER_KEY};
}
