//! Typed error handling for the catalog pipeline
//!
//! # Error Categories
//!
//! - [`FetchError`]: the data collaborator failed; shared so every read of a
//!   failed resource reports the very same failure
//! - [`CatalogError::MissingDependency`]: the pipeline was assembled without
//!   something it cannot run without (programmer error, fails fast)
//! - [`CatalogError::InvalidColumn`]: a sort toggle named a column the record
//!   type does not register
//! - [`ConfigError`](crate::config::ConfigError): configuration could not be
//!   loaded or is inconsistent
//!
//! # Example
//!
//! ```rust,ignore
//! match catalog.render(&state) {
//!     Poll::Pending => show_skeleton(),
//!     Poll::Ready(Ok(page)) => show(page),
//!     Poll::Ready(Err(CatalogError::Fetch(e))) => show_retry(e),
//!     Poll::Ready(Err(e)) => panic!("catalog misconfigured: {}", e),
//! }
//! ```

use crate::config::ConfigError;
use std::fmt;
use std::sync::Arc;

/// The main error type for the catalog pipeline
#[derive(Debug)]
pub enum CatalogError {
    /// The data collaborator failed to deliver the collection
    Fetch(FetchError),

    /// A required collaborator was not configured
    MissingDependency {
        dependency: &'static str,
    },

    /// A sort column that is not registered for the record type
    InvalidColumn {
        column: String,
        registered: &'static [&'static str],
    },

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Fetch(e) => write!(f, "{}", e),
            CatalogError::MissingDependency { dependency } => {
                write!(
                    f,
                    "Missing dependency: {} must be configured before the catalog is used",
                    dependency
                )
            }
            CatalogError::InvalidColumn { column, registered } => {
                write!(
                    f,
                    "Column '{}' is not sortable (sortable columns: {})",
                    column,
                    registered.join(", ")
                )
            }
            CatalogError::Config(e) => write!(f, "{}", e),
            CatalogError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Fetch(e) => Some(e),
            CatalogError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl CatalogError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Fetch(_) => "FETCH_FAILED",
            CatalogError::MissingDependency { .. } => "MISSING_DEPENDENCY",
            CatalogError::InvalidColumn { .. } => "INVALID_COLUMN",
            CatalogError::Config(_) => "CONFIG_ERROR",
            CatalogError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether a presentation layer can offer a retry for this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CatalogError::Fetch(_))
    }

    pub(crate) fn lock_poisoned(err: impl fmt::Display) -> Self {
        CatalogError::Internal(format!("lock poisoned: {}", err))
    }
}

impl From<FetchError> for CatalogError {
    fn from(err: FetchError) -> Self {
        CatalogError::Fetch(err)
    }
}

impl From<ConfigError> for CatalogError {
    fn from(err: ConfigError) -> Self {
        CatalogError::Config(err)
    }
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Failure reported by a data collaborator
///
/// Cloning shares the captured failure, so a failed resource hands out the
/// same error object on every read.
#[derive(Debug, Clone)]
pub struct FetchError {
    inner: Arc<anyhow::Error>,
}

impl FetchError {
    /// Wrap a collaborator failure
    pub fn new(err: anyhow::Error) -> Self {
        Self {
            inner: Arc::new(err),
        }
    }

    /// The underlying failure
    pub fn cause(&self) -> &anyhow::Error {
        &self.inner
    }

    /// Whether both handles point to the same captured failure
    pub fn same_failure(&self, other: &FetchError) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fetch failed: {:#}", self.inner)
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(AsRef::<dyn std::error::Error + 'static>::as_ref(&*self.inner))
    }
}

impl From<anyhow::Error> for FetchError {
    fn from(err: anyhow::Error) -> Self {
        FetchError::new(err)
    }
}
