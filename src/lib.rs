//! # Storefront Catalog
//!
//! A client-side data presentation pipeline for product catalogs.
//!
//! ## Features
//!
//! - **Suspending Resources**: Each fetch settles exactly once; readers poll
//!   it and see the same value or the same failure every time
//! - **Request Deduplication**: Resources are cached by a canonical query key,
//!   so equivalent parameter sets share one fetch
//! - **Category Filtering**: Category facet derived from the data, with an
//!   `"all"` sentinel
//! - **Multi-Column Sorting**: Ordered sort priorities with single and
//!   additive toggling, nulls always last
//! - **Pagination**: Clamped page requests with 1-based item ranges
//! - **Configuration-Based**: Page size, default sort and fetch parameters
//!   from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let catalog = Catalog::<Product>::builder()
//!     .with_data_service(InMemoryDataService::with_items(products))
//!     .build()?;
//!
//! let mut state = catalog.initial_state();
//! state.set_category("Furniture");
//! state.toggle_sort::<Product>("price", false)?;
//!
//! match catalog.render(&state) {
//!     Poll::Pending => println!("loading..."),
//!     Poll::Ready(Ok(page)) => println!("{} items", page.items.len()),
//!     Poll::Ready(Err(e)) => eprintln!("{}", e),
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod entities;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Pipeline ===
    pub use crate::catalog::{
        Catalog, CatalogBuilder, CatalogPage, CatalogSession, ErrorReporter, TracingReporter,
        ViewState,
    };

    // === Core Types ===
    pub use crate::core::{
        ALL, CatalogError, CategoryFilter, Collection, DataService, FetchError, FieldFilters,
        FieldValue, FilterOptions, ItemsRange, Page, PageMetadata, PageState, QueryParams,
        Record, Resource, ResourceCache, SortDirection, SortEntry, SortSpec,
    };
    pub use crate::core::pagination::paginate;
    pub use crate::core::sort::sorted;

    // === Configuration ===
    pub use crate::config::{CatalogConfig, ConfigError};

    // === Entities ===
    pub use crate::entities::Product;
    pub use crate::impl_record;

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, InMemoryResourceCache};

    // === External re-exports ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use std::task::Poll;
}
