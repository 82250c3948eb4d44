//! Query parameters and their canonical cache key

use crate::core::sort::SortSpec;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open key/value map of query parameters sent to the data collaborator
///
/// Keys keep the order they were inserted in, so the map round-trips the
/// caller's construction unchanged. The cache never uses that order: see
/// [`QueryParams::canonical_key`].
///
/// # Recognized keys
/// - `category`: narrows the collection to one category (`"all"` matches everything)
/// - `page`, `pageSize`, `sort`: reserved for server-side paging; they are
///   forwarded to the collaborator and folded into the cache key untouched
///
/// # Example
/// ```rust,ignore
/// let a = QueryParams::new().with("category", "Books").with("page", 1);
/// let b = QueryParams::new().with("page", 1).with("category", "Books");
/// assert_eq!(a.canonical_key(), b.canonical_key());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(IndexMap<String, Value>);

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a raw parameter value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterate parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Requested category, if any
    pub fn category(&self) -> Option<&str> {
        self.get("category").and_then(Value::as_str)
    }

    /// Requested page number, if any
    pub fn page(&self) -> Option<i64> {
        self.get("page").and_then(Value::as_i64)
    }

    /// Requested page size, if any
    pub fn page_size(&self) -> Option<usize> {
        self.get("pageSize")
            .and_then(Value::as_u64)
            .and_then(|size| usize::try_from(size).ok())
    }

    /// Requested sort specification, if present and well-formed
    pub fn sort(&self) -> Option<SortSpec> {
        self.get("sort")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Deterministic, order-independent encoding used as the cache key.
    ///
    /// Object keys are sorted at every nesting level before serializing, so
    /// two parameter sets with the same pairs map to the same cache entry no
    /// matter how they were built. Array order is significant.
    pub fn canonical_key(&self) -> String {
        let mut out = String::new();
        let mut entries: Vec<(&String, &Value)> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        write_object(&mut out, entries);
        out
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn write_object(out: &mut String, entries: Vec<(&String, &Value)>) {
    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&Value::String(key.clone()).to_string());
        out.push(':');
        write_canonical(out, value);
    }
    out.push('}');
}

fn write_canonical(out: &mut String, value: &Value) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            write_object(out, entries);
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
