//! Error boundary reporting

use crate::core::CatalogError;

/// Receives errors that reach the presentation boundary
///
/// The session reports each distinct failure once; implementations decide
/// where it goes (logs, telemetry, a toast).
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &CatalogError, context: &str);
}

/// Reporter that emits a `tracing` error event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &CatalogError, context: &str) {
        tracing::error!(
            code = error.error_code(),
            recoverable = error.is_recoverable(),
            context = context,
            "{}",
            error
        );
    }
}
