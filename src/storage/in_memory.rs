//! In-memory implementations of ResourceCache and DataService for testing and development

use crate::core::filter::CategoryFilter;
use crate::core::{
    CatalogError, Collection, DataService, QueryParams, Record, Resource, ResourceCache,
};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory resource cache
///
/// Uses RwLock for thread-safe access; the get/create/set sequence of
/// [`ResourceCache::get_or_insert_with`] runs under a single write lock.
pub struct InMemoryResourceCache<T> {
    entries: Arc<RwLock<HashMap<String, Resource<T>>>>,
}

impl<T> Clone for InMemoryResourceCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> InMemoryResourceCache<T> {
    /// Create a new, empty cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T> Default for InMemoryResourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for InMemoryResourceCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self.entries.read().map(|e| e.len()).unwrap_or_default();
        f.debug_struct("InMemoryResourceCache")
            .field("entries", &len)
            .finish()
    }
}

impl<T: Send + Sync> ResourceCache<T> for InMemoryResourceCache<T> {
    fn get(&self, key: &str) -> Result<Option<Resource<T>>, CatalogError> {
        let entries = self.entries.read().map_err(CatalogError::lock_poisoned)?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, resource: Resource<T>) -> Result<(), CatalogError> {
        let mut entries = self.entries.write().map_err(CatalogError::lock_poisoned)?;

        entries.insert(key.to_string(), resource);

        Ok(())
    }

    fn get_or_insert_with(
        &self,
        key: &str,
        create: &mut dyn FnMut() -> Resource<T>,
    ) -> Result<Resource<T>, CatalogError> {
        if let Some(resource) = self.get(key)? {
            tracing::debug!(key = key, "Resource cache hit");
            return Ok(resource);
        }

        let mut entries = self.entries.write().map_err(CatalogError::lock_poisoned)?;

        // Another caller may have inserted between the read and write locks
        let resource = entries.entry(key.to_string()).or_insert_with(|| {
            tracing::debug!(key = key, "Resource cache miss, creating resource");
            create()
        });

        Ok(resource.clone())
    }

    fn remove(&self, key: &str) -> Result<Option<Resource<T>>, CatalogError> {
        let mut entries = self.entries.write().map_err(CatalogError::lock_poisoned)?;

        Ok(entries.remove(key))
    }

    fn clear(&self) -> Result<(), CatalogError> {
        let mut entries = self.entries.write().map_err(CatalogError::lock_poisoned)?;

        tracing::debug!(entries = entries.len(), "Clearing resource cache");
        entries.clear();

        Ok(())
    }

    fn len(&self) -> Result<usize, CatalogError> {
        let entries = self.entries.read().map_err(CatalogError::lock_poisoned)?;

        Ok(entries.len())
    }
}

/// In-memory data service
///
/// Serves a fixed collection, narrowing it by the `category` query parameter
/// when one is given. Useful as a mock data collaborator; every call to
/// [`DataService::fetch`] is counted.
pub struct InMemoryDataService<T> {
    items: Arc<RwLock<Vec<T>>>,
    fetches: Arc<AtomicUsize>,
}

impl<T> Clone for InMemoryDataService<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            fetches: Arc::clone(&self.fetches),
        }
    }
}

impl<T: Record> InMemoryDataService<T> {
    /// Create an empty data service
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create a data service serving `items` in the given order
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load items from a JSON array
    pub fn from_json_str(json: &str) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        let items: Vec<T> = serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        Ok(Self::with_items(items))
    }

    /// Load items from a JSON file containing an array
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Append an item
    pub fn insert(&self, item: T) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.push(item);

        Ok(())
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl<T: Record> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> DataService<T> for InMemoryDataService<T> {
    async fn fetch(&self, params: &QueryParams) -> Result<Collection<T>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let matching = CategoryFilter::apply(&items, params.category());
        tracing::debug!(
            category = params.category().unwrap_or("all"),
            matched = matching.len(),
            "Served in-memory collection"
        );

        Ok(Collection::new(matching))
    }
}
