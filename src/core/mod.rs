//! Core module containing the building blocks of the catalog pipeline

pub mod cache;
pub mod error;
pub mod field;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod record;
pub mod resource;
pub mod service;
pub mod sort;

pub use cache::ResourceCache;
pub use error::{CatalogError, FetchError};
pub use field::FieldValue;
pub use filter::{ALL, CategoryFilter, FieldFilters, FilterOptions};
pub use pagination::{ItemsRange, Page, PageMetadata, PageState};
pub use query::QueryParams;
pub use record::Record;
pub use resource::Resource;
pub use service::{Collection, DataService};
pub use sort::{SortDirection, SortEntry, SortSpec};
