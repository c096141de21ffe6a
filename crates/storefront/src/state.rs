//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{CatalogError, CatalogService, HttpCatalog};
use crate::config::StorefrontConfig;
use crate::page::{PageLinks, ProductPageController};
use crate::reporting::{ErrorSink, TracingSink};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, the error sink and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogService>,
    error_sink: Arc<dyn ErrorSink>,
}

impl AppState {
    /// Create application state from explicit collaborators.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Arc<dyn CatalogService>,
        error_sink: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                error_sink,
            }),
        }
    }

    /// Create application state backed by the HTTP catalog.
    ///
    /// Fetch failures are reported through [`TracingSink`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = HttpCatalog::new(&config.catalog)?;
        Ok(Self::new(config, Arc::new(catalog), Arc::new(TracingSink)))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogService {
        self.inner.catalog.as_ref()
    }

    /// Navigation targets for the product page.
    #[must_use]
    pub fn page_links(&self) -> PageLinks {
        PageLinks {
            home_href: self.inner.config.home_path.clone(),
        }
    }

    /// A fresh page controller sharing this state's catalog and sink.
    #[must_use]
    pub fn product_page(&self) -> ProductPageController {
        ProductPageController::new(
            Arc::clone(&self.inner.catalog),
            Arc::clone(&self.inner.error_sink),
        )
    }
}
