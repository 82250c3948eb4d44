//! Keyed memoization of resources

use crate::core::error::CatalogError;
use crate::core::resource::Resource;

/// Store mapping canonical query keys to resources
///
/// Keys are produced by [`QueryParams::canonical_key`](crate::core::query::QueryParams::canonical_key).
/// Entries live until removed explicitly; there is no expiry or eviction.
///
/// Implementations must make [`get_or_insert_with`](ResourceCache::get_or_insert_with)
/// atomic per key, so concurrent callers asking for the same key observe the
/// same resource and the fetch behind it starts at most once.
pub trait ResourceCache<T>: Send + Sync {
    /// Get the resource cached under `key`
    fn get(&self, key: &str) -> Result<Option<Resource<T>>, CatalogError>;

    /// Cache `resource` under `key`, replacing any previous entry
    fn set(&self, key: &str, resource: Resource<T>) -> Result<(), CatalogError>;

    /// Return the cached resource, or create, cache and return a new one
    ///
    /// `create` runs at most once, and only when `key` is absent.
    fn get_or_insert_with(
        &self,
        key: &str,
        create: &mut dyn FnMut() -> Resource<T>,
    ) -> Result<Resource<T>, CatalogError>;

    /// Remove the entry for `key` (used to retry a failed fetch)
    fn remove(&self, key: &str) -> Result<Option<Resource<T>>, CatalogError>;

    /// Remove every entry
    fn clear(&self) -> Result<(), CatalogError>;

    /// Number of cached entries
    fn len(&self) -> Result<usize, CatalogError>;

    /// Whether the cache holds no entries
    fn is_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.len()? == 0)
    }
}
