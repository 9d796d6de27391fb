//! The session's shopping cart, persisted after every change.

use lumen_cache::{Cache, CacheError, Record, CART_KEY};
use lumen_commerce::cart::Cart;
use lumen_commerce::catalog::Product;
use lumen_commerce::{CommerceError, Money, ProductId};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Owns the authoritative cart and mirrors it to the `cart` record.
///
/// Mutations apply in memory first. A failed write is logged and retried
/// implicitly by the next mutation or an explicit [`CartStore::flush`].
#[derive(Debug)]
pub struct CartStore {
    cart: Mutex<Cart>,
    record: Record<Cart>,
}

impl CartStore {
    /// Restore the persisted cart. A missing or corrupt record yields an
    /// empty cart.
    pub fn open(cache: Cache) -> Self {
        let record: Record<Cart> = Record::new(cache, CART_KEY);
        let cart = match record.load() {
            Some(cart) => {
                let cart = cart.normalized();
                info!(
                    entries = cart.distinct_count(),
                    items = cart.total_items(),
                    "restored cart"
                );
                cart
            }
            None => Cart::new(),
        };
        Self {
            cart: Mutex::new(cart),
            record,
        }
    }

    /// Add one unit of `product`. Returns the new quantity.
    pub fn add(&self, product: Product) -> u32 {
        let id = product.id;
        self.mutate(|cart| {
            let quantity = cart.add_product(product);
            debug!(product_id = %id, quantity, "added to cart");
            quantity
        })
    }

    /// Set a quantity directly; zero or below removes the entry.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> bool {
        self.mutate(|cart| {
            let changed = cart.update_quantity(product_id, quantity);
            debug!(product_id = %product_id, quantity, changed, "cart quantity updated");
            changed
        })
    }

    pub fn increment(&self, product_id: ProductId) -> bool {
        self.mutate(|cart| cart.increment(product_id))
    }

    pub fn decrement(&self, product_id: ProductId) -> bool {
        self.mutate(|cart| cart.decrement(product_id))
    }

    /// Remove an entry. Removing an absent product is a no-op.
    pub fn remove(&self, product_id: ProductId) -> bool {
        self.mutate(|cart| {
            let removed = cart.remove(product_id);
            debug!(product_id = %product_id, removed, "removed from cart");
            removed
        })
    }

    pub fn clear(&self) {
        self.mutate(|cart| cart.clear());
        debug!("cart cleared");
    }

    /// Copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    pub fn total_items(&self) -> u64 {
        self.lock().total_items()
    }

    pub fn distinct_count(&self) -> usize {
        self.lock().distinct_count()
    }

    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.lock().total_price()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lock().quantity_of(product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Write the current cart, reporting any failure.
    pub fn flush(&self) -> Result<(), CacheError> {
        let cart = self.lock();
        self.record.store(&cart)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut cart = self.lock();
        let result = f(&mut cart);
        if let Err(e) = self.record.store(&cart) {
            warn!(error = %e, "failed to persist cart; keeping in-memory state");
        }
        result
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
