//! Storage implementations for caches and data collaborators

pub mod in_memory;

pub use in_memory::{InMemoryDataService, InMemoryResourceCache};
