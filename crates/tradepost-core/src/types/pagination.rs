//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 6;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.page_size
    }

    /// Number of items on a full page.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages (never less than one).
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
    /// Page numbers `1..=total_pages` for rendering a pager.
    pub page_numbers: Vec<u64>,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = total_pages(total_items, page_size);
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
            page_numbers: (1..=total_pages).collect(),
        }
    }

    /// Slice an in-memory result set into the requested page.
    ///
    /// The requested page is clamped to `[1, total_pages]`.
    pub fn paginate(all: Vec<T>, request: PageRequest) -> Self {
        let page_size = request.page_size.max(1);
        let total_items = all.len() as u64;
        let clamped = PageRequest {
            page: request.page.clamp(1, total_pages(total_items, page_size)),
            page_size,
        };
        let start = usize::try_from(clamped.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(clamped.limit()).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(start).take(take).collect();
        Self::new(items, clamped.page, page_size, total_items)
    }
}

/// `max(1, ceil(total_items / page_size))`.
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    let page_size = page_size.max(1);
    total_items.div_ceil(page_size).max(1)
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
