//! Session-wide storefront facade.

use crate::api::{OrderGateway, ProductSource, StorefrontApi};
use crate::cart_store::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::notice::Notice;
use lumen_auth::{Authenticator, UserSession};
use lumen_cache::Cache;
use lumen_commerce::catalog::Product;
use lumen_commerce::checkout::{Order, OrderRequest};
use lumen_commerce::search::{featured_query, FEATURED_LIMIT};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything one browsing session needs: configuration, the persisted
/// cart and user, and the backend.
///
/// Create it once at session start; catalog views are created from it on
/// demand and do not outlive their screen.
pub struct Storefront {
    config: StorefrontConfig,
    cache: Cache,
    products: Arc<dyn ProductSource>,
    orders: Arc<dyn OrderGateway>,
    cart: CartStore,
    session: UserSession,
}

impl Storefront {
    /// Validate `config`, open its storage directory and connect to the
    /// configured backend.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        config.validate().map_err(StorefrontError::Config)?;
        let dir = config.storage_dir().map_err(StorefrontError::Config)?;
        let cache = Cache::open(&dir)?;
        info!(storage = %dir.display(), api = %config.api.base_url, "opening storefront");

        let api = StorefrontApi::new(&config.api)?;
        let authenticator = Arc::new(api.auth_client());
        let api = Arc::new(api);
        Ok(Self::from_parts(config, cache, api.clone(), api, authenticator))
    }

    /// Assemble a storefront from explicit backends.
    pub fn from_parts(
        config: StorefrontConfig,
        cache: Cache,
        products: Arc<dyn ProductSource>,
        orders: Arc<dyn OrderGateway>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let cart = CartStore::open(cache.clone());
        let session = UserSession::open(authenticator, cache.clone());
        Self {
            config,
            cache,
            products,
            orders,
            cart,
            session,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    /// A fresh catalog view with default facets.
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.products.clone(), &self.config.catalog)
    }

    /// Add one unit of `product` to the cart.
    pub fn add_to_cart(&self, product: Product) -> Notice {
        let notice = Notice::added_to_cart(&product);
        self.cart.add(product);
        notice
    }

    /// Sale items for the landing page. Empty if the listing is unavailable.
    pub async fn featured_products(&self) -> Vec<Product> {
        match self
            .products
            .list_products(&featured_query(FEATURED_LIMIT))
            .await
        {
            Ok(page) => page.products,
            Err(e) => {
                warn!(error = %e, "failed to load featured products");
                Vec::new()
            }
        }
    }

    pub fn logout(&self) -> Notice {
        self.session.logout();
        Notice::signed_out()
    }

    /// Submit the current cart as an order for the signed-in user (or as a
    /// guest). The cart is left as is either way; clear it after success
    /// with `cart().clear()`.
    pub async fn place_order(&self) -> Result<Order> {
        let cart = self.cart.snapshot();
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        let request = OrderRequest::from_cart(&cart, self.session.current_user_id())?;

        info!(
            lines = request.items.len(),
            total = %request.total_amount.display(),
            signed_in = request.user_id.is_some(),
            "placing order"
        );
        match self.orders.create_order(&request).await {
            Ok(order) => {
                info!(order_id = %order.id, status = %order.status, "order placed");
                Ok(order)
            }
            Err(e) => {
                warn!(error = %e, "order placement failed; cart kept");
                Err(StorefrontError::Order(e))
            }
        }
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("cart", &self.cart)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    #[test]
    fn test_open_rejects_invalid_config() {
        let mut config = StorefrontConfig::default();
        config.catalog.page_size = 0;
        let err = Storefront::open(config).unwrap_err();
        assert!(matches!(err, StorefrontError::Config(_)));
    }

    #[test]
    fn test_open_creates_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = dir.path().join("session");
        let config = StorefrontConfig {
            storage: StorageConfig {
                dir: Some(storage.clone()),
            },
            ..StorefrontConfig::default()
        };

        let storefront = Storefront::open(config).unwrap();
        assert!(storage.is_dir());
        assert!(storefront.cart().is_empty());
        assert!(!storefront.session().is_signed_in());
        assert_eq!(storefront.cache().location(), Some(storage.as_path()));
    }
}
