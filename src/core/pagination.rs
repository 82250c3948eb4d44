//! Pagination over an in-memory collection
//!
//! Requested pages are clamped into `[1, total_pages]` before slicing, so an
//! overshooting request (page 99 of 3) shows the last page rather than an
//! empty one.

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Requested page number and page size
///
/// The requested page is stored unclamped; clamping happens every time the
/// metadata is derived from a concrete collection length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Requested page (1-based, may be out of range)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Number of items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// First page with the given page size
    pub fn new(page_size: usize) -> Self {
        Self { page: 1, page_size }
    }

    /// Page size, ensuring a minimum of 1
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Request page `n` (any integer, clamped when paginating)
    pub fn go_to_page(&mut self, n: i64) {
        self.page = n;
    }

    /// Request the page after the one `meta` shows; no-op on the last page
    pub fn go_to_next(&mut self, meta: &PageMetadata) {
        if meta.has_next {
            self.page = page_number(meta.page) + 1;
        } else {
            self.page = page_number(meta.page);
        }
    }

    /// Request the page before the one `meta` shows; no-op on the first page
    pub fn go_to_previous(&mut self, meta: &PageMetadata) {
        if meta.has_previous {
            self.page = page_number(meta.page) - 1;
        } else {
            self.page = page_number(meta.page);
        }
    }

    /// Derive metadata for a collection of `total` items
    pub fn metadata(&self, total: usize) -> PageMetadata {
        PageMetadata::new(self.page, self.page_size(), total)
    }
}

fn page_number(page: usize) -> i64 {
    i64::try_from(page).unwrap_or(i64::MAX)
}

/// Visible item range, 1-based and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Current page number after clamping (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, never less than 1
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_previous: bool,

    /// Items shown on this page
    pub range: ItemsRange,
}

impl PageMetadata {
    /// Create pagination metadata for a requested page
    pub fn new(requested: i64, page_size: usize, total: usize) -> Self {
        // Ensure page size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size).max(1);
        let page = usize::try_from(requested.max(1))
            .unwrap_or(usize::MAX)
            .min(total_pages);

        let range = if total == 0 {
            ItemsRange {
                start: 0,
                end: 0,
                total,
            }
        } else {
            ItemsRange {
                start: (page - 1) * page_size + 1,
                end: (page * page_size).min(total),
                total,
            }
        };

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
            range,
        }
    }

    /// Zero-based slice bounds of the current page
    pub fn bounds(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }
}

/// One page of items plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The items on this page
    pub items: Vec<T>,

    /// Pagination metadata
    pub meta: PageMetadata,
}

/// Slice `items` to the page requested by `state`
pub fn paginate<T: Clone>(items: &[T], state: &PageState) -> Page<T> {
    let meta = state.metadata(items.len());
    Page {
        items: items[meta.bounds()].to_vec(),
        meta,
    }
}
