//! Catalog composition root: fetch, filter, sort, paginate
//!
//! A [`Catalog`] owns the data collaborator and the resource cache. Each
//! render resolves the fetched collection through the cache, then runs the
//! fixed stage order
//!
//! 1. category filter (then any field filters)
//! 2. multi-column sort
//! 3. pagination
//!
//! and returns a [`CatalogPage`], the only thing the presentation layer sees.

pub mod builder;
pub mod report;
pub mod session;
pub mod view;

pub use builder::CatalogBuilder;
pub use report::{ErrorReporter, TracingReporter};
pub use session::CatalogSession;
pub use view::ViewState;

use crate::config::CatalogConfig;
use crate::core::filter::{CategoryFilter, FilterOptions};
use crate::core::pagination::paginate;
use crate::core::sort::sorted;
use crate::core::{
    CatalogError, Collection, DataService, PageMetadata, QueryParams, Record, Resource,
    ResourceCache, SortSpec,
};
use serde::Serialize;
use std::sync::Arc;
use std::task::Poll;
use tokio::runtime::Handle;

/// Output of one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage<T> {
    /// Records on the current page, filtered and sorted
    pub items: Vec<T>,

    /// Pagination metadata for `items`
    pub meta: PageMetadata,

    /// Category facet of the fetched collection, `"all"` first
    pub categories: Vec<String>,

    /// Category currently selected
    pub selected_category: String,

    /// Option lists for the active field filters
    pub filter_options: Vec<FilterOptions>,

    /// Sort priorities applied to `items`
    pub sort: SortSpec,

    /// Size of the fetched collection before any filtering
    pub source_len: usize,
}

/// Stateless pipeline over a cached data collaborator
pub struct Catalog<T: Record> {
    service: Arc<dyn DataService<T>>,
    cache: Arc<dyn ResourceCache<Collection<T>>>,
    runtime: Handle,
    config: CatalogConfig,
}

impl<T: Record> std::fmt::Debug for Catalog<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Record> Catalog<T> {
    /// Start building a catalog
    pub fn builder() -> CatalogBuilder<T> {
        CatalogBuilder::new()
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Parameters sent to the data collaborator
    pub fn query_params(&self) -> &QueryParams {
        &self.config.fetch_params
    }

    /// Initial presentation state for this catalog
    pub fn initial_state(&self) -> ViewState {
        ViewState::new(&self.config)
    }

    /// Resource for the configured fetch parameters
    pub fn resource(&self) -> Result<Resource<Collection<T>>, CatalogError> {
        self.resource_for(self.query_params())
    }

    /// Resource for `params`, created and cached on first use
    ///
    /// Identical parameter sets (in any key order) share one resource, so the
    /// data collaborator is called at most once per canonical key.
    pub fn resource_for(&self, params: &QueryParams) -> Result<Resource<Collection<T>>, CatalogError> {
        let key = params.canonical_key();
        self.cache.get_or_insert_with(&key, &mut || {
            let service = Arc::clone(&self.service);
            let params = params.clone();
            Resource::spawn_on(&self.runtime, async move { service.fetch(&params).await })
        })
    }

    /// Drop the cached resource for the configured parameters and fetch again
    pub fn retry(&self) -> Result<Resource<Collection<T>>, CatalogError> {
        self.retry_for(self.query_params())
    }

    /// Drop the cached resource for `params` and fetch again
    ///
    /// A failed resource stays failed; this is the only way to retry it
    /// without clearing every other entry.
    pub fn retry_for(&self, params: &QueryParams) -> Result<Resource<Collection<T>>, CatalogError> {
        let key = params.canonical_key();
        if self.cache.remove(&key)?.is_some() {
            tracing::info!(key = %key, "Retrying catalog fetch");
        }
        self.resource_for(params)
    }

    /// Remove every cached resource
    pub fn clear_cache(&self) -> Result<(), CatalogError> {
        self.cache.clear()
    }

    /// Render `state` without waiting
    ///
    /// Returns `Poll::Pending` while the fetch is in flight; the caller is
    /// expected to render again once it settles (see [`Catalog::render_settled`]).
    pub fn render(&self, state: &ViewState) -> Poll<Result<CatalogPage<T>, CatalogError>> {
        let resource = match self.resource() {
            Ok(resource) => resource,
            Err(err) => return Poll::Ready(Err(err)),
        };

        resource.try_read().map(|outcome| {
            outcome
                .map(|collection| Self::present(&collection.items, state))
                .map_err(CatalogError::from)
        })
    }

    /// Wait for the fetch to settle, then render `state`
    pub async fn render_settled(&self, state: &ViewState) -> Result<CatalogPage<T>, CatalogError> {
        let collection = self.resource()?.settled().await?;
        Ok(Self::present(&collection.items, state))
    }

    /// Run the filter, sort and pagination stages over `collection`
    pub fn present(collection: &[T], state: &ViewState) -> CatalogPage<T> {
        let categories = CategoryFilter::categories(collection);
        let filter_options = state.filters.options(collection);

        let filtered = CategoryFilter::apply(collection, state.category.as_deref());
        let filtered = state.filters.apply(&filtered);
        let ordered = sorted(&filtered, &state.sort);
        let page = paginate(&ordered, &state.page);

        CatalogPage {
            items: page.items,
            meta: page.meta,
            categories,
            selected_category: state.selected_category().to_string(),
            filter_options,
            sort: state.sort.clone(),
            source_len: collection.len(),
        }
    }
}
