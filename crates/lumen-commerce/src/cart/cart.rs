//! Cart ledger.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart: at most one entry per product, in insertion order.
///
/// Aggregates (`total_items`, `total_price`, `distinct_count`) are always
/// computed from the entries and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Entries in the cart.
    #[serde(default)]
    items: Vec<CartEntry>,
    /// Cart currency.
    #[serde(default)]
    pub currency: Currency,
    /// Unix timestamp of last update.
    #[serde(default)]
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            currency: Currency::default(),
            updated_at: current_timestamp(),
        }
    }

    /// Add one unit of a product.
    ///
    /// An already-present product has its quantity incremented. Stock levels
    /// are not consulted.
    pub fn add_product(&mut self, product: Product) -> u32 {
        let quantity = match self.entry_mut(product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(1);
                existing.quantity
            }
            None => {
                self.items.push(CartEntry::new(product, 1));
                1
            }
        };
        self.touch();
        quantity
    }

    /// Set an entry's quantity directly. Zero or below removes the entry.
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self.entry_mut(product_id) {
            Some(entry) if entry.quantity != quantity => {
                entry.quantity = quantity;
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Increase an entry by one unit.
    pub fn increment(&mut self, product_id: ProductId) -> bool {
        match self.get(product_id) {
            Some(entry) => self.update_quantity(product_id, i64::from(entry.quantity) + 1),
            None => false,
        }
    }

    /// Decrease an entry by one unit; the last unit removes it.
    pub fn decrement(&mut self, product_id: ProductId) -> bool {
        match self.get(product_id) {
            Some(entry) => self.update_quantity(product_id, i64::from(entry.quantity) - 1),
            None => false,
        }
    }

    /// Remove an entry. Removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|entry| entry.product.id != product_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[CartEntry] {
        &self.items
    }

    /// Get an entry by product ID.
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.items.iter().find(|entry| entry.product.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Quantity held for a product, zero if absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.get(product_id).map_or(0, |entry| entry.quantity)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|entry| u64::from(entry.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn distinct_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of `quantity * price` over all entries.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.items
            .iter()
            .try_fold(Money::zero(self.currency), |acc, entry| {
                acc.try_add(&entry.line_total()?)
            })
    }

    /// Repair a cart read back from storage.
    ///
    /// Duplicate products are merged and zero-quantity entries dropped, so the
    /// one-entry-per-product invariant holds even for hand-edited state.
    pub fn normalized(self) -> Self {
        let mut items: Vec<CartEntry> = Vec::with_capacity(self.items.len());
        for entry in self.items.into_iter().filter(|e| e.quantity > 0) {
            match items.iter_mut().find(|e| e.product.id == entry.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(entry.quantity)
                }
                None => items.push(entry),
            }
        }
        Self { items, ..self }
    }

    fn entry_mut(&mut self, product_id: ProductId) -> Option<&mut CartEntry> {
        self.items
            .iter_mut()
            .find(|entry| entry.product.id == product_id)
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// A product and how many units of it are in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Product snapshot taken when it was added.
    pub product: Product,
    /// Quantity, at least 1 while the entry exists.
    pub quantity: u32,
}

impl CartEntry {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product.price.try_multiply(i64::from(self.quantity))
    }
}

fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn product(id: u64, price: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Светильник {}", id),
            Category::Ceiling,
            Money::from_major(price),
        )
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price().unwrap(), Money::zero(Currency::RUB));
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut cart = Cart::new();
        let p = product(1, 1500);
        cart.add_product(p.clone());
        assert_eq!(cart.add_product(p), 2);

        assert_eq!(cart.distinct_count(), 1);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price().unwrap(), Money::from_major(3000));
    }

    #[test]
    fn test_add_ignores_stock_level() {
        let mut cart = Cart::new();
        let p = product(1, 100).with_stock(1);
        cart.add_product(p.clone());
        cart.add_product(p);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 2);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_product(product(1, 1000));
        cart.add_product(product(2, 2000));

        assert!(cart.update_quantity(ProductId::new(1), 0));
        assert!(!cart.contains(ProductId::new(1)));
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price().unwrap(), Money::from_major(2000));
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add_product(product(1, 1000));
        assert!(cart.update_quantity(ProductId::new(1), -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.update_quantity(ProductId::new(9), 4));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add_product(product(1, 1000));
        let before = cart.clone();

        assert!(!cart.remove(ProductId::new(42)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::new();
        cart.add_product(product(1, 10));
        cart.increment(ProductId::new(1));
        assert_eq!(cart.quantity_of(ProductId::new(1)), 2);

        cart.decrement(ProductId::new(1));
        cart.decrement(ProductId::new(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_scenario_totals() {
        let mut cart = Cart::new();
        cart.add_product(product(1, 1000));
        cart.add_product(product(2, 2000));
        cart.update_quantity(ProductId::new(1), 3);

        assert_eq!(cart.quantity_of(ProductId::new(1)), 3);
        assert_eq!(cart.quantity_of(ProductId::new(2)), 1);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price().unwrap(), Money::from_major(5000));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_product(product(3, 1));
        cart.add_product(product(1, 1));
        cart.add_product(product(3, 1));

        let ids: Vec<u64> = cart.items().iter().map(|e| e.product.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_normalized_merges_duplicates() {
        let json = serde_json::json!({
            "items": [
                {"product": {"id": 1, "name": "a", "category": "wall", "price": 10}, "quantity": 1},
                {"product": {"id": 1, "name": "a", "category": "wall", "price": 10}, "quantity": 2},
                {"product": {"id": 2, "name": "b", "category": "wall", "price": 10}, "quantity": 0}
            ]
        });
        let cart: Cart = serde_json::from_value(json).unwrap();
        let cart = cart.normalized();

        assert_eq!(cart.distinct_count(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 3);
    }
}
