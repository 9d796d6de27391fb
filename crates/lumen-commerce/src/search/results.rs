//! Listing responses and pagination.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Number of page links shown at once.
pub const DEFAULT_PAGE_WINDOW: u32 = 5;

/// One page of the listing service's response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products on this page.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Total number of matching products across all pages.
    #[serde(default)]
    pub total: u64,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, total: u64) -> Self {
        Self { products, total }
    }

    /// Check if the page has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Pagination derived from the current page and the reported total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total number of items.
    pub total: u64,
    /// `ceil(total / page_size)`; zero when there are no results.
    pub total_pages: u32,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(u64::from(page_size));
        Self {
            page: page.max(1),
            page_size,
            total,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    /// Page links to display, using the default window width.
    pub fn window(&self) -> Vec<u32> {
        page_window(self.page, self.total_pages, DEFAULT_PAGE_WINDOW)
    }

    /// Target of the "previous" control.
    pub fn previous_page(&self) -> u32 {
        self.page.saturating_sub(1).max(1)
    }

    /// Target of the "next" control.
    pub fn next_page(&self) -> u32 {
        self.page.saturating_add(1).min(self.total_pages.max(1))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pagination controls only appear when there is more than one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Get start item number (1-indexed), zero when empty.
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            u64::from(self.page - 1) * u64::from(self.page_size) + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.page_size)).min(self.total)
    }
}

/// Page numbers for a pagination bar of at most `width` links.
///
/// Shows every page when they fit, pins the window to the start or end near
/// the edges, and otherwise centres the current page.
pub fn page_window(current: u32, total_pages: u32, width: u32) -> Vec<u32> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }
    if total_pages <= width {
        return (1..=total_pages).collect();
    }

    let half = width / 2;
    let start = current.saturating_sub(half).max(1);
    let end = start.saturating_add(width - 1).min(total_pages);
    let start = (end + 1).saturating_sub(width).max(1);

    (start..=end).collect()
}
