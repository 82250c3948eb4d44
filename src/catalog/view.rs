//! Presentation-owned view parameters and their callbacks

use crate::config::CatalogConfig;
use crate::core::filter::{ALL, CategoryFilter, FieldFilters};
use crate::core::{CatalogError, PageMetadata, PageState, Record, SortSpec};
use serde::{Deserialize, Serialize};

/// Everything the presentation layer controls about one catalog view
///
/// The catalog itself is stateless with respect to these values: they are
/// passed into every render and changed only through the callbacks below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Selected category, `None` meaning "all"
    #[serde(default)]
    pub category: Option<String>,

    /// Additional per-field selections
    #[serde(default)]
    pub filters: FieldFilters,

    /// Active sort priorities
    #[serde(default)]
    pub sort: SortSpec,

    /// Requested page and page size
    #[serde(default)]
    pub page: PageState,
}

impl ViewState {
    /// Initial state: all categories, configured default sort, first page
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            category: None,
            filters: FieldFilters::new(),
            sort: config.sort_spec(),
            page: PageState::new(config.page_size),
        }
    }

    /// The selected category, [`ALL`] when unset
    pub fn selected_category(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL)
    }

    /// Select a category and go back to the first page
    pub fn set_category(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.category = if CategoryFilter::is_all(Some(&value)) {
            None
        } else {
            Some(value)
        };
        self.page.go_to_page(1);
    }

    /// Select a value for a field filter and go back to the first page
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.filters.set(field, value);
        self.page.go_to_page(1);
    }

    /// Toggle a sort column; see [`SortSpec::toggle`]
    pub fn toggle_sort<T: Record>(&mut self, column: &str, multi: bool) -> Result<(), CatalogError> {
        self.sort.toggle::<T>(column, multi)
    }

    /// Request page `n`
    pub fn go_to_page(&mut self, n: i64) {
        self.page.go_to_page(n);
    }

    /// Request the page after the one `meta` shows
    pub fn go_to_next(&mut self, meta: &PageMetadata) {
        self.page.go_to_next(meta);
    }

    /// Request the page before the one `meta` shows
    pub fn go_to_previous(&mut self, meta: &PageMetadata) {
        self.page.go_to_previous(meta);
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}
