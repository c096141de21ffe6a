//! In-process catalog for tests and local previews.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use vitrina_core::Product;

use super::{CatalogError, CatalogService};

/// A catalog that serves a fixed snapshot, or always fails.
#[derive(Debug)]
pub struct InMemoryCatalog {
    snapshot: Result<Vec<Product>, String>,
    calls: AtomicUsize,
}

impl InMemoryCatalog {
    /// Serve `products` on every fetch.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self {
            snapshot: Ok(products),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every fetch with `CatalogError::Unavailable(reason)`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            snapshot: Err(reason.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot
            .clone()
            .map_err(CatalogError::Unavailable)
    }
}
