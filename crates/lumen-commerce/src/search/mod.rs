//! Search module.
//!
//! Facet state, listing query building, and pagination.

mod filter;
mod query;
mod results;

pub use filter::{
    FacetChange, FeatureFlag, FeatureFlags, FilterState, NumericRange, BRAND_OPTIONS,
    COLOR_OPTIONS, STYLE_OPTIONS,
};
pub use query::{
    build_query, featured_query, QueryParams, SortOption, DEFAULT_PAGE_SIZE, FEATURED_LIMIT,
};
pub use results::{page_window, Pagination, ProductPage, DEFAULT_PAGE_WINDOW};
