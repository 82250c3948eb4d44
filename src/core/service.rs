//! Data collaborator trait

use crate::core::query::QueryParams;
use crate::core::record::Record;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Collection delivered by one fetch
///
/// `items` is in source order, which is the canonical pre-sort order.
/// `total` is the collaborator's count of matching records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Collection<T> {
    /// Collection whose total is its own length
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Service trait fetching collections of records
///
/// Implementations decide where the data comes from. The catalog calls
/// [`fetch`](DataService::fetch) at most once per distinct canonical query
/// key and memoizes the outcome, failures included.
#[async_trait]
pub trait DataService<T: Record>: Send + Sync {
    /// Fetch the collection matching `params`
    async fn fetch(&self, params: &QueryParams) -> Result<Collection<T>>;
}
