//! CatalogBuilder for fluent API to assemble a catalog pipeline

use super::Catalog;
use crate::config::CatalogConfig;
use crate::core::{CatalogError, Collection, DataService, Record, ResourceCache};
use crate::storage::InMemoryResourceCache;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Builder for creating catalogs
///
/// # Example
///
/// ```ignore
/// let catalog = Catalog::<Product>::builder()
///     .with_data_service(InMemoryDataService::with_items(products))
///     .with_config_file("catalog.yaml")?
///     .build()?;
/// ```
pub struct CatalogBuilder<T: Record> {
    service: Option<Arc<dyn DataService<T>>>,
    cache: Option<Arc<dyn ResourceCache<Collection<T>>>>,
    runtime: Option<Handle>,
    config: CatalogConfig,
}

impl<T: Record> CatalogBuilder<T> {
    /// Create a new CatalogBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            service: None,
            cache: None,
            runtime: None,
            config: CatalogConfig::default(),
        }
    }

    /// Set the data service (required)
    pub fn with_data_service(mut self, service: impl DataService<T> + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Set a data service that is shared with other owners
    pub fn with_shared_data_service(mut self, service: Arc<dyn DataService<T>>) -> Self {
        self.service = Some(service);
        self
    }

    /// Set the resource cache
    ///
    /// Defaults to a fresh [`InMemoryResourceCache`]. Pass a shared cache to
    /// let several catalogs deduplicate fetches between them.
    pub fn with_cache(mut self, cache: impl ResourceCache<Collection<T>> + 'static) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Set the runtime fetches are spawned on
    ///
    /// Defaults to the runtime `build` is called from.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a YAML file
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        self.config = CatalogConfig::from_yaml_file(path)?;
        Ok(self)
    }

    /// Build the catalog
    ///
    /// Fails with [`CatalogError::MissingDependency`] when no data service
    /// was given or no runtime is reachable, and with
    /// [`CatalogError::InvalidColumn`] when the default sort names a column
    /// `T` does not register.
    pub fn build(self) -> Result<Catalog<T>, CatalogError> {
        let service = self.service.ok_or(CatalogError::MissingDependency {
            dependency: "data service",
        })?;

        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| CatalogError::MissingDependency {
                dependency: "tokio runtime",
            })?,
        };

        self.config.validate()?;
        self.config.sort_spec().validate::<T>()?;

        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(InMemoryResourceCache::new()));

        tracing::debug!(
            page_size = self.config.page_size,
            sort_columns = self.config.default_sort.len(),
            "Catalog built"
        );

        Ok(Catalog {
            service,
            cache,
            runtime,
            config: self.config,
        })
    }
}

impl<T: Record> Default for CatalogBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
