//! Catalog view controller.
//!
//! Owns the facet state for one catalog view, turns every change into a
//! listing query and folds the response back into render state.
//!
//! Fetches are sequenced: starting a fetch cancels the one in flight, and a
//! response is applied only if no newer fetch started after it. The latest
//! facet state therefore always wins, whatever order responses arrive in.

use crate::api::ProductSource;
use crate::config::CatalogConfig;
use crate::notice::Notice;
use lumen_commerce::catalog::Product;
use lumen_commerce::search::{
    build_query, page_window, FacetChange, FilterState, Pagination, ProductPage, QueryParams,
};
use lumen_commerce::ProductId;
use lumen_data::FetchError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// What became of one fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The response replaced the product list.
    Applied { count: usize, total: u64 },
    /// The fetch failed; the previous product list is still shown.
    Failed(FetchError),
    /// A newer fetch started first; this one was cancelled or discarded.
    Superseded,
    /// The change was a no-op, so nothing was fetched.
    Unchanged,
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied { .. })
    }
}

/// Coarse state of the listing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    /// The last successful fetch matched nothing.
    NoResults,
    Ready,
}

/// A consistent snapshot of everything the catalog view renders.
#[derive(Debug, Clone)]
pub struct CatalogView {
    pub products: Vec<Product>,
    pub total: u64,
    pub loading: bool,
    pub notice: Option<Notice>,
    pub pagination: Pagination,
    page_links: u32,
}

impl CatalogView {
    pub fn status(&self) -> CatalogStatus {
        if self.loading {
            CatalogStatus::Loading
        } else if self.total == 0 {
            CatalogStatus::NoResults
        } else {
            CatalogStatus::Ready
        }
    }

    /// `(shown, total)` for a "showing X of Y" line.
    pub fn showing(&self) -> (usize, u64) {
        (self.products.len(), self.total)
    }

    /// Page links to render around the current page.
    pub fn page_links(&self) -> Vec<u32> {
        page_window(
            self.pagination.page,
            self.pagination.total_pages,
            self.page_links,
        )
    }
}

struct CatalogState {
    filters: FilterState,
    products: Vec<Product>,
    total: u64,
    loading: bool,
    notice: Option<Notice>,
    seq: u64,
    in_flight: Option<CancellationToken>,
}

struct Shared {
    source: Arc<dyn ProductSource>,
    page_size: u32,
    page_links: u32,
    state: Mutex<CatalogState>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = state.in_flight.take() {
            token.cancel();
        }
    }
}

/// Handle to one catalog view. Clones share the same state.
#[derive(Clone)]
pub struct Catalog {
    shared: Arc<Shared>,
}

impl Catalog {
    /// Create a catalog with default facets. Nothing is fetched until
    /// [`Catalog::refresh`] or a facet change.
    pub fn new(source: Arc<dyn ProductSource>, config: &CatalogConfig) -> Self {
        let state = CatalogState {
            filters: FilterState::default(),
            products: Vec::new(),
            total: 0,
            loading: true,
            notice: None,
            seq: 0,
            in_flight: None,
        };
        Self {
            shared: Arc::new(Shared {
                source,
                page_size: config.page_size.max(1),
                page_links: config.page_window.max(1),
                state: Mutex::new(state),
            }),
        }
    }

    /// Apply a facet change and refetch if it changed anything.
    pub async fn apply(&self, change: FacetChange) -> FetchOutcome {
        let changed = self.lock().filters.apply(change);
        if !changed {
            return FetchOutcome::Unchanged;
        }
        self.fetch().await
    }

    /// Move to another page, keeping every facet.
    pub async fn set_page(&self, page: u32) -> FetchOutcome {
        self.apply(FacetChange::Page(page)).await
    }

    /// Restore every facet to its default and fetch exactly once.
    pub async fn reset_filters(&self) -> FetchOutcome {
        self.lock().filters.apply(FacetChange::Reset);
        self.fetch().await
    }

    /// Fetch the listing for the current facets.
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch().await
    }

    /// Fetch a single product for the detail view.
    ///
    /// Does not touch the listing; a failure raises a notice.
    pub async fn load_product(&self, id: ProductId) -> Result<Product, FetchError> {
        debug!(product_id = %id, "loading product");
        let result = self.shared.source.get_product(id).await;
        if let Err(e) = &result {
            warn!(product_id = %id, error = %e, "failed to load product");
            self.lock().notice = Some(Notice::products_unavailable());
        }
        result
    }

    pub fn snapshot(&self) -> CatalogView {
        let state = self.lock();
        CatalogView {
            products: state.products.clone(),
            total: state.total,
            loading: state.loading,
            notice: state.notice.clone(),
            pagination: self.pagination_for(&state),
            page_links: self.shared.page_links,
        }
    }

    pub fn filters(&self) -> FilterState {
        self.lock().filters.clone()
    }

    pub fn pagination(&self) -> Pagination {
        let state = self.lock();
        self.pagination_for(&state)
    }

    /// Take the pending notice, if any.
    pub fn dismiss_notice(&self) -> Option<Notice> {
        self.lock().notice.take()
    }

    async fn fetch(&self) -> FetchOutcome {
        let (seq, token, query) = self.begin_fetch();
        debug!(seq, page = query.get("page"), params = query.len(), "fetching products");

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(seq, "fetch cancelled by a newer request");
                return FetchOutcome::Superseded;
            }
            result = self.shared.source.list_products(&query) => result,
        };
        self.finish_fetch(seq, result)
    }

    /// Claim the next sequence number, cancelling the fetch in flight.
    fn begin_fetch(&self) -> (u64, CancellationToken, QueryParams) {
        let mut state = self.lock();
        state.seq += 1;
        if let Some(previous) = state.in_flight.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        state.in_flight = Some(token.clone());
        state.loading = true;
        let query = build_query(&state.filters, self.shared.page_size);
        (state.seq, token, query)
    }

    /// Fold a response into the view unless a newer fetch has started.
    fn finish_fetch(&self, seq: u64, result: Result<ProductPage, FetchError>) -> FetchOutcome {
        let mut state = self.lock();
        if state.seq != seq {
            debug!(seq, latest = state.seq, "discarding superseded response");
            return FetchOutcome::Superseded;
        }
        state.in_flight = None;
        state.loading = false;

        match result {
            Ok(page) => {
                state.total = page.total;
                state.products = if page.total == 0 {
                    Vec::new()
                } else {
                    page.products
                };
                debug!(seq, count = state.products.len(), total = state.total, "products updated");
                FetchOutcome::Applied {
                    count: state.products.len(),
                    total: state.total,
                }
            }
            Err(e) => {
                warn!(seq, error = %e, "failed to load products");
                state.notice = Some(Notice::products_unavailable());
                FetchOutcome::Failed(e)
            }
        }
    }

    fn pagination_for(&self, state: &CatalogState) -> Pagination {
        Pagination::new(state.filters.page(), self.shared.page_size, state.total)
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Catalog")
            .field("filters", &state.filters)
            .field("total", &state.total)
            .field("loading", &state.loading)
            .field("seq", &state.seq)
            .finish_non_exhaustive()
    }
}
