//! HTTP catalog client.
//!
//! Uses `reqwest` for HTTP and optionally caches the product snapshot with
//! `moka`.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;
use vitrina_core::Product;

use super::{CatalogError, CatalogService};
use crate::config::CatalogConfig;

const SNAPSHOT_KEY: &str = "products";

/// Longest slice of an error body kept for logs and errors.
const BODY_EXCERPT_CHARS: usize = 200;

/// Client for the product-listing service.
///
/// Cheap to clone; clones share the connection pool and cache.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    endpoint: Url,
    api_token: Option<SecretString>,
    cache: Option<Cache<&'static str, Arc<Vec<Product>>>>,
}

impl HttpCatalog {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let cache = config.cache_ttl.map(|ttl| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(HttpCatalogInner {
                client,
                endpoint: config.url.clone(),
                api_token: config.api_token.clone(),
                cache,
            }),
        })
    }

    /// Drop any cached snapshot so the next fetch hits the service.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate(SNAPSHOT_KEY).await;
        }
    }

    async fn request_products(&self) -> Result<Vec<Product>, CatalogError> {
        let mut request = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json");
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let excerpt = excerpt(&body);
            tracing::warn!(
                status = %status,
                body = %excerpt,
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: excerpt,
            });
        }

        parse_products(&body).map_err(|e| {
            tracing::warn!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse catalog response"
            );
            e
        })
    }
}

/// Parse a catalog body entry by entry.
///
/// The body must be a JSON array; an entry that is not a valid product is
/// dropped with a warning so it cannot hide its siblings.
fn parse_products(body: &str) -> Result<Vec<Product>, CatalogError> {
    let entries = serde_json::from_str::<Vec<serde_json::Value>>(body)?;
    let total = entries.len();

    let products: Vec<Product> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Product>(entry) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed catalog entry");
                None
            }
        })
        .collect();

    if products.len() < total {
        debug!(kept = products.len(), total, "Catalog snapshot had malformed entries");
    }
    Ok(products)
}

#[async_trait]
impl CatalogService for HttpCatalog {
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(cache) = &self.inner.cache
            && let Some(products) = cache.get(SNAPSHOT_KEY).await
        {
            debug!("Cache hit for product snapshot");
            return Ok(products.as_ref().clone());
        }

        let products = self.request_products().await?;
        debug!(count = products.len(), "Fetched product snapshot");

        if let Some(cache) = &self.inner.cache {
            cache
                .insert(SNAPSHOT_KEY, Arc::new(products.clone()))
                .await;
        }

        Ok(products)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
