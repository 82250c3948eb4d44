//! Configuration loading and management

use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::core::{QueryParams, SortEntry, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a catalog view
///
/// # Example
/// ```yaml
/// page_size: 10
/// default_sort:
///   - column: name
///     direction: asc
/// fetch_params:
///   category: all
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Number of items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Sort applied before the user toggles any column
    #[serde(default = "default_sort")]
    pub default_sort: Vec<SortEntry>,

    /// Parameters forwarded to the data collaborator on every fetch
    #[serde(default)]
    pub fetch_params: QueryParams,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_sort() -> Vec<SortEntry> {
    vec![SortEntry::ascending("name")]
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_sort: default_sort(),
            fetch_params: QueryParams::new(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency
    ///
    /// Column names are checked against a record type when the catalog is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self
            .default_sort
            .iter()
            .find(|entry| !seen.insert(entry.column.as_str()))
        {
            return Err(ConfigError::Invalid(format!(
                "default_sort lists column '{}' more than once",
                dup.column
            )));
        }

        Ok(())
    }

    /// The default sort as a specification
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::from_entries(self.default_sort.iter().cloned())
    }
}
