//! Lumen storefront orchestration.
//!
//! Ties the domain crate to the backend and local storage:
//!
//! - **Catalog**: per-view facet state, query building and latest-wins fetching
//! - **Cart**: the session cart, persisted after every change
//! - **Checkout**: order placement for the signed-in user or a guest
//! - **Config / telemetry**: file + environment configuration and `tracing` setup
//!
//! # Example
//!
//! ```rust,ignore
//! use lumen_storefront::prelude::*;
//!
//! let config = StorefrontConfig::load("lumen.toml")?.with_env_overrides();
//! telemetry::init(&config.logging.filter);
//!
//! let storefront = Storefront::open(config)?;
//! let catalog = storefront.catalog();
//! catalog.refresh().await;
//! catalog.apply(FacetChange::Category(Some(Category::Chandeliers))).await;
//!
//! let view = catalog.snapshot();
//! if let Some(product) = view.products.first() {
//!     storefront.add_to_cart(product.clone());
//! }
//! ```

pub mod api;
pub mod cart_store;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notice;
pub mod storefront;
pub mod telemetry;

pub use api::{OrderGateway, ProductSource, StorefrontApi};
pub use cart_store::CartStore;
pub use catalog::{Catalog, CatalogStatus, CatalogView, FetchOutcome};
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use notice::{Notice, NoticeLevel};
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::telemetry;
    pub use crate::{
        Catalog, CatalogStatus, CatalogView, CartStore, FetchOutcome, Notice, NoticeLevel,
        Storefront, StorefrontConfig, StorefrontError,
    };
    pub use lumen_commerce::prelude::*;
}
