//! Typed slots bound to a fixed key.

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use tracing::warn;

/// Key under which the shopping cart is persisted.
pub const CART_KEY: &str = "cart";

/// Key under which the signed-in user is persisted.
pub const USER_KEY: &str = "user";

/// A single persisted value of type `T`.
///
/// Loading never fails: an unreadable or corrupt entry is logged and
/// treated as absent, so a damaged file cannot block startup.
#[derive(Debug)]
pub struct Record<T> {
    cache: Cache,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Record<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Record<T> {
    pub fn new(cache: Cache, key: &'static str) -> Self {
        Self {
            cache,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load the stored value, or `None` if it is missing or unusable.
    pub fn load(&self) -> Option<T> {
        match self.cache.get(self.key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = self.key, error = %e, "discarding unreadable record");
                None
            }
        }
    }

    pub fn store(&self, value: &T) -> Result<(), CacheError> {
        self.cache.set(self.key, value)
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(self.key)
    }
}
