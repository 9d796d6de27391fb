//! Storefront backend adapter.

use crate::config::ApiConfig;
use async_trait::async_trait;
use lumen_auth::AuthClient;
use lumen_commerce::catalog::Product;
use lumen_commerce::checkout::{Order, OrderRequest};
use lumen_commerce::search::{ProductPage, QueryParams};
use lumen_commerce::ProductId;
use lumen_data::{FetchClient, FetchError};
use tracing::debug;

/// Where listing pages and single products come from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one listing page for the given query.
    async fn list_products(&self, query: &QueryParams) -> Result<ProductPage, FetchError>;

    /// Fetch a single product. A missing product is [`FetchError::NotFound`].
    async fn get_product(&self, id: ProductId) -> Result<Product, FetchError>;
}

/// Where orders are placed.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, FetchError>;
}

/// HTTP implementation of [`ProductSource`] and [`OrderGateway`].
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    http: FetchClient,
    products_path: String,
    orders_path: String,
    auth_path: String,
}

impl StorefrontApi {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let http = FetchClient::new(config.timeouts())?.with_base_url(config.base_url.clone());
        Ok(Self {
            http,
            products_path: config.products_path.clone(),
            orders_path: config.orders_path.clone(),
            auth_path: config.auth_path.clone(),
        })
    }

    /// Auth client sharing this adapter's connection pool.
    pub fn auth_client(&self) -> AuthClient {
        AuthClient::new(self.http.clone(), self.auth_path.clone())
    }
}

#[async_trait]
impl ProductSource for StorefrontApi {
    async fn list_products(&self, query: &QueryParams) -> Result<ProductPage, FetchError> {
        let page: ProductPage = self
            .http
            .get(&self.products_path)
            .query_pairs(query.pairs().iter().map(|(k, v)| (*k, v.clone())))
            .send()
            .await?
            .error_for_status()?
            .json()?;
        debug!(count = page.products.len(), total = page.total, "listing page received");
        Ok(page)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, FetchError> {
        let page: ProductPage = self
            .http
            .get(&self.products_path)
            .query("id", id.to_string())
            .send()
            .await?
            .error_for_status()?
            .json()?;
        first_product(page, id)
    }
}

#[async_trait]
impl OrderGateway for StorefrontApi {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, FetchError> {
        let order: Order = self
            .http
            .post(&self.orders_path)
            .json(request)?
            .send()
            .await?
            .error_for_status()?
            .json()?;
        debug!(order_id = %order.id, status = %order.status, "order accepted");
        Ok(order)
    }
}

/// The single-product lookup answers with a listing page; take its first entry.
fn first_product(page: ProductPage, id: ProductId) -> Result<Product, FetchError> {
    page.products
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NotFound(format!("product {id}")))
}
