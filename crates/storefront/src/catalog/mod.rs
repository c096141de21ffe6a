//! Catalog service client.
//!
//! # Architecture
//!
//! - The listing service is the source of truth - NO local sync
//! - It only offers "fetch all products"; lookup by id happens locally via
//!   [`vitrina_core::resolve_product`]
//! - Optional in-memory snapshot caching via `moka` (disabled by default)
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrina_storefront::catalog::{CatalogService, HttpCatalog};
//!
//! let catalog = HttpCatalog::new(&config.catalog)?;
//! let products = catalog.fetch_all_products().await?;
//! ```

mod http;
mod memory;

pub use http::HttpCatalog;
pub use memory::InMemoryCatalog;

use async_trait::async_trait;
use thiserror::Error;
use vitrina_core::Product;

/// Errors that can occur when fetching the product collection.
///
/// Every variant is a catalog fetch failure from the page's point of view.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body is not a product array.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Any other source failure (used by in-process catalogs).
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Source of the full product collection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch every product, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the collection cannot be obtained.
    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogError>;
}
