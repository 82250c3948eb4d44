//! Stateful adapter between a catalog and one presentation surface

use super::report::{ErrorReporter, TracingReporter};
use super::{Catalog, CatalogPage, ViewState};
use crate::core::sort::ensure_sortable;
use crate::core::{CatalogError, FetchError, PageMetadata, Record, SortSpec};
use std::sync::Arc;
use std::task::Poll;

/// One user's view over a shared [`Catalog`]
///
/// Holds the [`ViewState`] and the last rendered page, which the paging and
/// sorting callbacks need. Failures are forwarded to an [`ErrorReporter`]
/// once per distinct failure.
pub struct CatalogSession<T: Record> {
    catalog: Arc<Catalog<T>>,
    state: ViewState,
    last: Option<CatalogPage<T>>,
    reporter: Arc<dyn ErrorReporter>,
    reported: Option<FetchError>,
}

impl<T: Record> CatalogSession<T> {
    /// Open a session in the catalog's initial state
    pub fn new(catalog: Arc<Catalog<T>>) -> Self {
        let state = catalog.initial_state();
        Self {
            catalog,
            state,
            last: None,
            reporter: Arc::new(TracingReporter),
            reported: None,
        }
    }

    /// Replace the error reporter
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog<T>> {
        &self.catalog
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The most recent successfully rendered page
    pub fn last_page(&self) -> Option<&CatalogPage<T>> {
        self.last.as_ref()
    }

    /// Items of the most recent page, empty before the first render
    pub fn items(&self) -> &[T] {
        self.last.as_ref().map(|page| page.items.as_slice()).unwrap_or(&[])
    }

    /// Category facet of the most recent page
    pub fn categories(&self) -> &[String] {
        self.last
            .as_ref()
            .map(|page| page.categories.as_slice())
            .unwrap_or(&[])
    }

    pub fn sort(&self) -> &SortSpec {
        &self.state.sort
    }

    pub fn meta(&self) -> Option<&PageMetadata> {
        self.last.as_ref().map(|page| &page.meta)
    }

    /// Render without waiting
    pub fn render(&mut self) -> Poll<Result<CatalogPage<T>, CatalogError>> {
        let outcome = self.catalog.render(&self.state);
        if let Poll::Ready(result) = &outcome {
            self.observe(result);
        }
        outcome
    }

    /// Wait for the fetch to settle, then render
    pub async fn render_settled(&mut self) -> Result<CatalogPage<T>, CatalogError> {
        let result = self.catalog.render_settled(&self.state).await;
        self.observe(&result);
        result
    }

    /// Select a category; the page goes back to 1
    pub fn set_category(&mut self, value: impl Into<String>) {
        self.state.set_category(value);
    }

    /// Select a value for a field filter; the page goes back to 1
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.state.set_filter(field, value);
    }

    /// Toggle a sort column
    ///
    /// Unregistered columns are always rejected. Registered ones are ignored
    /// until a non-empty collection has been rendered, since there is
    /// nothing to order.
    pub fn toggle_sort(&mut self, column: &str, multi: bool) -> Result<(), CatalogError> {
        ensure_sortable::<T>(column)?;

        match &self.last {
            Some(page) if page.source_len > 0 => self.state.toggle_sort::<T>(column, multi),
            _ => {
                tracing::debug!(column = column, "Ignoring sort toggle on empty collection");
                Ok(())
            }
        }
    }

    /// Request page `n`; clamped on the next render
    pub fn go_to_page(&mut self, n: i64) {
        self.state.go_to_page(n);
    }

    /// Advance one page if the last render has a next page
    pub fn go_to_next(&mut self) {
        if let Some(page) = &self.last {
            self.state.go_to_next(&page.meta);
        }
    }

    /// Go back one page if the last render has a previous page
    pub fn go_to_previous(&mut self) {
        if let Some(page) = &self.last {
            self.state.go_to_previous(&page.meta);
        }
    }

    /// Discard a failed fetch and start a new one
    pub fn retry(&mut self) -> Result<(), CatalogError> {
        self.reported = None;
        self.catalog.retry().map(|_| ())
    }

    fn observe(&mut self, result: &Result<CatalogPage<T>, CatalogError>) {
        match result {
            Ok(page) => {
                self.reported = None;
                self.last = Some(page.clone());
            }
            Err(CatalogError::Fetch(err)) => {
                let seen = self
                    .reported
                    .as_ref()
                    .is_some_and(|previous| previous.same_failure(err));
                if !seen {
                    self.reporter.report(&CatalogError::Fetch(err.clone()), "render");
                    self.reported = Some(err.clone());
                }
            }
            Err(err) => self.reporter.report(err, "render"),
        }
    }
}
