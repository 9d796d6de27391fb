//! Listing query builder.
//!
//! Translates a [`FilterState`] into the query string the listing service
//! understands. The encoding follows the service contract exactly:
//!
//! - `category` is omitted for "all" (the service has no universal value)
//! - `search` is omitted when empty
//! - multi-select facets are comma-joined and omitted when empty
//! - boolean facets are sent as the literal `"true"` when set and never as
//!   `"false"`; the service treats an absent flag as unconstrained

use crate::error::CommerceError;
use crate::search::{FeatureFlag, FilterState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Fixed page size of the catalog grid.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sort options for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Server-default ordering.
    #[default]
    Popular,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    Name,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Popular,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::Name,
    ];

    /// Selection slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Popular => "popular",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::Name => "name",
        }
    }

    /// `(sort_by, order)` pair, or `None` for server-default ordering.
    pub fn to_query(&self) -> Option<(&'static str, &'static str)> {
        match self {
            SortOption::Popular => None,
            SortOption::PriceAsc => Some(("price", "asc")),
            SortOption::PriceDesc => Some(("price", "desc")),
            SortOption::Name => Some(("name", "asc")),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Popular => "По популярности",
            SortOption::PriceAsc => "Цена: по возрастанию",
            SortOption::PriceDesc => "Цена: по убыванию",
            SortOption::Name => "По названию",
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| CommerceError::UnknownSort(s.to_string()))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered query parameters for one listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    fn push(&mut self, key: &'static str, value: impl ToString) {
        self.pairs.push((key, value.to_string()));
    }

    /// Look up a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parameter names in emission order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    /// All pairs in emission order.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Build the listing query for a filter state.
///
/// Pure: the same state and page size always yield the same parameters in
/// the same order.
pub fn build_query(state: &FilterState, page_size: u32) -> QueryParams {
    let mut params = QueryParams::default();

    params.push("page", state.page());
    params.push("limit", page_size);
    params.push("min_price", state.price.lo());
    params.push("max_price", state.price.hi());

    if let Some(category) = &state.category {
        params.push("category", category.slug());
    }

    if !state.search.is_empty() {
        params.push("search", &state.search);
    }

    if let Some((sort_by, order)) = state.sort.to_query() {
        params.push("sort_by", sort_by);
        params.push("order", order);
    }

    push_joined(&mut params, "brands", &state.brands);
    push_joined(&mut params, "colors", &state.colors);
    push_joined(&mut params, "styles", &state.styles);

    for flag in state.flags.enabled() {
        params.push(flag.query_key(), "true");
    }

    params
}

/// Number of products shown on the landing page.
pub const FEATURED_LIMIT: u32 = 8;

/// Query for the landing page's featured strip: sale items only, first page.
pub fn featured_query(limit: u32) -> QueryParams {
    let mut params = QueryParams::default();
    params.push("limit", limit);
    params.push(FeatureFlag::IsSale.query_key(), "true");
    params
}

fn push_joined(params: &mut QueryParams, key: &'static str, values: &BTreeSet<String>) {
    if values.is_empty() {
        return;
    }
    let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(",");
    params.push(key, joined);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::search::{FacetChange, FeatureFlag, NumericRange};

    #[test]
    fn test_featured_query() {
        let query = featured_query(FEATURED_LIMIT);
        assert_eq!(query.keys().collect::<Vec<_>>(), vec!["limit", "is_sale"]);
        assert_eq!(query.get("limit"), Some("8"));
        assert_eq!(query.get("is_sale"), Some("true"));
    }

    #[test]
    fn test_default_query() {
        let query = build_query(&FilterState::default(), DEFAULT_PAGE_SIZE);
        let keys: Vec<_> = query.keys().collect();
        assert_eq!(keys, vec!["page", "limit", "min_price", "max_price"]);
        assert_eq!(query.get("page"), Some("1"));
        assert_eq!(query.get("limit"), Some("20"));
        assert_eq!(query.get("min_price"), Some("0"));
        assert_eq!(query.get("max_price"), Some("500000"));
    }

    #[test]
    fn test_category_omitted_for_all() {
        let mut state = FilterState::default();
        assert!(!build_query(&state, 20).contains("category"));

        state.apply(FacetChange::Category(Some(Category::Ceiling)));
        assert_eq!(build_query(&state, 20).get("category"), Some("ceiling"));
    }

    #[test]
    fn test_search_omitted_when_empty() {
        let mut state = FilterState::default();
        state.apply(FacetChange::Search(String::new()));
        assert!(!build_query(&state, 20).contains("search"));

        state.apply(FacetChange::Search("хрусталь".to_string()));
        assert_eq!(build_query(&state, 20).get("search"), Some("хрусталь"));
    }

    #[test]
    fn test_sort_mapping() {
        let cases = [
            (SortOption::Popular, None, None),
            (SortOption::PriceAsc, Some("price"), Some("asc")),
            (SortOption::PriceDesc, Some("price"), Some("desc")),
            (SortOption::Name, Some("name"), Some("asc")),
        ];
        for (sort, sort_by, order) in cases {
            let mut state = FilterState::default();
            state.apply(FacetChange::Sort(sort));
            let query = build_query(&state, 20);
            assert_eq!(query.get("sort_by"), sort_by);
            assert_eq!(query.get("order"), order);
        }
    }

    #[test]
    fn test_multi_select_joined_in_stable_order() {
        let mut state = FilterState::default();
        state.apply(FacetChange::ToggleBrand("Maytoni".to_string()));
        state.apply(FacetChange::ToggleBrand("Eglo".to_string()));
        state.apply(FacetChange::ToggleStyle("Лофт".to_string()));

        let query = build_query(&state, 20);
        assert_eq!(query.get("brands"), Some("Eglo,Maytoni"));
        assert_eq!(query.get("styles"), Some("Лофт"));
        assert!(!query.contains("colors"));
    }

    #[test]
    fn test_flags_sent_only_when_true() {
        let mut state = FilterState::default();
        state.apply(FacetChange::Flag(FeatureFlag::IsDimmable, true));
        state.apply(FacetChange::Flag(FeatureFlag::HasPickup, true));
        state.apply(FacetChange::Flag(FeatureFlag::HasPickup, false));

        let query = build_query(&state, 20);
        assert_eq!(query.get("is_dimmable"), Some("true"));
        for flag in FeatureFlag::ALL {
            if flag != FeatureFlag::IsDimmable {
                assert!(!query.contains(flag.query_key()));
            }
        }
        assert!(query.pairs().iter().all(|(_, v)| v != "false"));
    }

    #[test]
    fn test_dimension_ranges_not_serialized() {
        let mut state = FilterState::default();
        state.apply(FacetChange::HeightRange(NumericRange::new(10, 20).unwrap()));
        state.apply(FacetChange::PriceRange(NumericRange::new(1000, 9000).unwrap()));

        let query = build_query(&state, 20);
        assert_eq!(query.len(), 4);
        assert_eq!(query.get("min_price"), Some("1000"));
        assert_eq!(query.get("max_price"), Some("9000"));
    }

    #[test]
    fn test_reset_reproduces_default_query() {
        let mut state = FilterState::default();
        state.apply(FacetChange::Category(Some(Category::Floor)));
        state.apply(FacetChange::Sort(SortOption::Name));
        state.apply(FacetChange::Flag(FeatureFlag::IsNew, true));
        state.apply(FacetChange::Page(2));
        state.apply(FacetChange::Reset);

        assert_eq!(
            build_query(&state, 20),
            build_query(&FilterState::default(), 20)
        );
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("price_desc".parse::<SortOption>().unwrap(), SortOption::PriceDesc);
        assert!("rating".parse::<SortOption>().is_err());
    }
}
