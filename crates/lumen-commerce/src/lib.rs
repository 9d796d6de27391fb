//! Domain types and logic for the Lumen lighting storefront.
//!
//! This crate is pure: it performs no I/O. It provides:
//!
//! - **Catalog**: products and categories as delivered by the listing service
//! - **Search**: facet state, query building, pagination windowing
//! - **Cart**: the (product, quantity) ledger and its derived totals
//! - **Checkout**: order payloads built from a cart snapshot
//!
//! # Example
//!
//! ```rust,ignore
//! use lumen_commerce::prelude::*;
//!
//! let mut filters = FilterState::default();
//! filters.apply(FacetChange::Category(Some(Category::Chandeliers)));
//! filters.apply(FacetChange::ToggleBrand("Maytoni".to_string()));
//!
//! let query = build_query(&filters, DEFAULT_PAGE_SIZE);
//! assert_eq!(query.get("category"), Some("chandeliers"));
//!
//! let mut cart = Cart::new();
//! cart.add_product(product);
//! println!("Total: {}", cart.total_price()?.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, CategoryFilter, Product};

    // Cart
    pub use crate::cart::{Cart, CartEntry};

    // Checkout
    pub use crate::checkout::{Order, OrderItem, OrderLine, OrderRequest};

    // Search
    pub use crate::search::{
        build_query, featured_query, page_window, FacetChange, FeatureFlag, FeatureFlags,
        FilterState, NumericRange, Pagination, ProductPage, QueryParams, SortOption,
        DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW, FEATURED_LIMIT,
    };
}
