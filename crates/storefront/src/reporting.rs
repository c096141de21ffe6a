//! Injected error reporting for page load cycles.
//!
//! Failures that the page swallows (they collapse into the "not found" view)
//! are still handed to an [`ErrorSink`] so they can be logged or forwarded.
//! Any `Fn(ErrorKind, &ErrorContext) + Send + Sync` closure is a sink, which
//! keeps tests free of mocking frameworks.

use std::fmt;

/// Classification of a reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The "fetch all products" call to the catalog service failed.
    CatalogFetchFailure,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CatalogFetchFailure => "catalog_fetch_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was happening when the failure occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Raw identifier the page was loading.
    pub identifier: String,
    /// Load cycle generation.
    pub generation: u64,
    /// Rendered error message.
    pub message: String,
}

/// Destination for failures the page recovers from locally.
pub trait ErrorSink: Send + Sync {
    fn report(&self, kind: ErrorKind, context: &ErrorContext);
}

impl<F> ErrorSink for F
where
    F: Fn(ErrorKind, &ErrorContext) + Send + Sync,
{
    fn report(&self, kind: ErrorKind, context: &ErrorContext) {
        self(kind, context);
    }
}

/// Default sink: a structured `tracing` error event.
///
/// With the Sentry tracing layer installed, error-level events become Sentry
/// events, so this also covers error tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, kind: ErrorKind, context: &ErrorContext) {
        tracing::error!(
            error_kind = %kind,
            identifier = %context.identifier,
            generation = context.generation,
            error = %context.message,
            "Error al obtener producto"
        );
    }
}
