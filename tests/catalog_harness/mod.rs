//! Shared test harness for catalog pipeline testing
//!
//! Provides `TestItem`, a record with fields covering every `FieldValue`
//! variant (including nulls), plus data services that count, gate or fail
//! their fetches.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod catalog_harness;
//! use catalog_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod resource_cache_tests;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use catalog::core::{Collection, DataService, FieldValue, QueryParams, Record};
use catalog::impl_record;

// ---------------------------------------------------------------------------
// TestItem — covers all FieldValue variants
// ---------------------------------------------------------------------------

/// A test record with fields spanning all `FieldValue` variants.
///
/// - `name`: String
/// - `price`: optional f64 (Float or Null)
/// - `rating`: i64 (Integer)
/// - `featured`: bool (Boolean)
/// - `added`: DateTime
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestItem {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price: Option<f64>,
    pub rating: i64,
    pub featured: bool,
    pub added: DateTime<Utc>,
}

impl_record!(
    TestItem,
    id: id,
    category: category,
    fields: [name, category, price, rating, featured, added],
    sortable: [name, price, rating, added],
);

// ---------------------------------------------------------------------------
// Helper functions — TestItem creation
// ---------------------------------------------------------------------------

/// Create a `TestItem` with neutral defaults for the non-key fields
pub fn item(id: u64, name: &str, category: &str, price: Option<f64>) -> TestItem {
    TestItem {
        id,
        name: name.to_string(),
        category: category.to_string(),
        price,
        rating: 0,
        featured: false,
        added: day(1),
    }
}

/// Midnight UTC on the given day of January 2024
pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
}

/// A batch of `n` items cycling through three categories
///
/// Names are `Item 01`.. so that name order equals id order. Every fifth
/// item has no price.
pub fn sample_batch(n: u64) -> Vec<TestItem> {
    const CATEGORIES: [&str; 3] = ["Books", "Games", "Music"];
    (1..=n)
        .map(|i| TestItem {
            id: i,
            name: format!("Item {:02}", i),
            category: CATEGORIES[((i - 1) % 3) as usize].to_string(),
            price: (i % 5 != 0).then(|| (i * 7 % 11) as f64 + 0.5),
            rating: (i % 4) as i64,
            featured: i % 2 == 0,
            added: day(((i - 1) % 28 + 1) as u32),
        })
        .collect()
}

/// The mixed-case, duplicated-price collection used by the sorting tests
pub fn sorting_fixture() -> Vec<TestItem> {
    vec![
        item(1, "banana", "Fruit", Some(2.0)),
        item(2, "Apple", "Fruit", Some(3.0)),
        item(3, "cherry", "Fruit", None),
        item(4, "apple", "Fruit", Some(2.0)),
        item(5, "Date", "Dried", Some(3.0)),
    ]
}

pub fn ids<T: Record>(items: &[T]) -> Vec<u64> {
    items.iter().map(Record::id).collect()
}

// ---------------------------------------------------------------------------
// Data services
// ---------------------------------------------------------------------------

/// Serves a fixed collection and counts fetches
#[derive(Clone)]
pub struct CountingService {
    items: Arc<Vec<TestItem>>,
    calls: Arc<AtomicUsize>,
}

impl CountingService {
    pub fn new(items: Vec<TestItem>) -> Self {
        Self {
            items: Arc::new(items),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataService<TestItem> for CountingService {
    async fn fetch(&self, _params: &QueryParams) -> Result<Collection<TestItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(Collection::new(self.items.as_ref().clone()))
    }
}

/// Holds every fetch until `release` is called
#[derive(Clone)]
pub struct GatedService {
    inner: CountingService,
    gate: Arc<Notify>,
}

impl GatedService {
    pub fn new(items: Vec<TestItem>) -> Self {
        Self {
            inner: CountingService::new(items),
            gate: Arc::new(Notify::new()),
        }
    }

    /// Let one pending (or the next) fetch through
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

#[async_trait]
impl DataService<TestItem> for GatedService {
    async fn fetch(&self, params: &QueryParams) -> Result<Collection<TestItem>> {
        self.gate.notified().await;
        self.inner.fetch(params).await
    }
}

/// Fails the first `failures` fetches, then serves its items
#[derive(Clone)]
pub struct FlakyService {
    inner: CountingService,
    failures: Arc<AtomicUsize>,
}

impl FlakyService {
    pub fn new(items: Vec<TestItem>, failures: usize) -> Self {
        Self {
            inner: CountingService::new(items),
            failures: Arc::new(AtomicUsize::new(failures)),
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

#[async_trait]
impl DataService<TestItem> for FlakyService {
    async fn fetch(&self, params: &QueryParams) -> Result<Collection<TestItem>> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            self.inner.calls.fetch_add(1, Ordering::SeqCst);
            return Err(anyhow!("upstream unavailable"));
        }
        self.inner.fetch(params).await
    }
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert that a `FieldValue` is the expected string.
pub fn assert_field_value_string(fv: &FieldValue, expected: &str) {
    match fv {
        FieldValue::String(s) => assert_eq!(s, expected),
        other => panic!("Expected FieldValue::String(\"{}\"), got {:?}", expected, other),
    }
}

/// Assert that a collection is in non-decreasing order of `column`.
pub fn assert_sorted_by<T: Record>(items: &[T], column: &str) {
    for pair in items.windows(2) {
        let a = pair[0].field_value(column).unwrap_or(FieldValue::Null);
        let b = pair[1].field_value(column).unwrap_or(FieldValue::Null);
        assert_ne!(
            a.compare(&b),
            std::cmp::Ordering::Greater,
            "{:?} should not come before {:?}",
            a,
            b
        );
    }
}
