//! Test doubles for the storefront backends.

#![allow(dead_code)]

use async_trait::async_trait;
use lumen_auth::{AuthError, Authenticator, Credentials, Registration, User};
use lumen_cache::Cache;
use lumen_commerce::prelude::*;
use lumen_data::FetchError;
use lumen_storefront::{OrderGateway, ProductSource, Storefront, StorefrontConfig};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

pub fn product(id: u64, price: i64) -> Product {
    Product::new(
        ProductId::new(id),
        format!("Светильник {id}"),
        Category::Ceiling,
        Money::from_major(price),
    )
}

pub fn page_of(ids: &[u64], total: u64) -> ProductPage {
    ProductPage::new(ids.iter().map(|id| product(*id, 1000)).collect(), total)
}

/// Answers listing requests from a script and records every query.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<ProductPage, FetchError>>>,
    queries: Mutex<Vec<QueryParams>>,
}

impl ScriptedSource {
    pub fn new(responses: impl IntoIterator<Item = Result<ProductPage, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<QueryParams> {
        self.queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl ProductSource for ScriptedSource {
    async fn list_products(&self, query: &QueryParams) -> Result<ProductPage, FetchError> {
        self.queries.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ProductPage::default()))
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, FetchError> {
        Ok(product(id.get(), 1000))
    }
}

pub type Reply = oneshot::Sender<Result<ProductPage, FetchError>>;

/// Holds every listing request until the test answers it.
pub struct GatedSource {
    requests: mpsc::UnboundedSender<(QueryParams, Reply)>,
}

impl GatedSource {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(QueryParams, Reply)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { requests: tx }, rx)
    }
}

#[async_trait]
impl ProductSource for GatedSource {
    async fn list_products(&self, query: &QueryParams) -> Result<ProductPage, FetchError> {
        let (reply, answer) = oneshot::channel();
        self.requests
            .send((query.clone(), reply))
            .map_err(|_| FetchError::Connection("gate closed".into()))?;
        answer
            .await
            .unwrap_or_else(|_| Err(FetchError::Connection("gate dropped".into())))
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, FetchError> {
        Err(FetchError::NotFound(format!("product {id}")))
    }
}

/// Records submitted orders; fails when `fail` is set.
#[derive(Default)]
pub struct RecordingGateway {
    pub fail: bool,
    pub requests: Mutex<Vec<OrderRequest>>,
}

#[async_trait]
impl OrderGateway for RecordingGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(FetchError::Http {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(Order {
            id: OrderId::new(100),
            user_id: request.user_id,
            total_amount: request.total_amount,
            status: "pending".into(),
            created_at: "2026-10-16T12:00:00Z".into(),
            items: Vec::new(),
        })
    }
}

/// Accepts one fixed password.
pub struct FixedAuth;

#[async_trait]
impl Authenticator for FixedAuth {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        credentials.validate()?;
        if credentials.password == "secret" {
            Ok(User::new(UserId::new(7), &credentials.email, "Анна"))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn register(&self, registration: &Registration) -> Result<User, AuthError> {
        registration.validate()?;
        Ok(User::new(UserId::new(8), &registration.email, &registration.name))
    }
}

pub fn storefront(
    cache: Cache,
    products: Arc<dyn ProductSource>,
    orders: Arc<dyn OrderGateway>,
) -> Storefront {
    Storefront::from_parts(
        StorefrontConfig::default(),
        cache,
        products,
        orders,
        Arc::new(FixedAuth),
    )
}
