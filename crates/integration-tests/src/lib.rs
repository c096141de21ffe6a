//! Integration tests for Vitrina.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrina-integration-tests
//! ```
//!
//! The storefront router is driven in-process with `tower::ServiceExt`, so no
//! server, network or catalog deployment is needed. Catalog client tests bind
//! a throwaway axum server on `127.0.0.1:0`.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header::CONTENT_TYPE},
};
use tower::ServiceExt;
use vitrina_core::Product;
use vitrina_storefront::{
    app,
    catalog::InMemoryCatalog,
    config::StorefrontConfig,
    reporting::{ErrorContext, ErrorKind, ErrorSink},
    state::AppState,
};

/// Catalog payload as the listing service sends it.
pub const SAMPLE_CATALOG_JSON: &str = r#"[
    {
        "id": 1,
        "nombre": "A",
        "descripcion": "Taza de cerámica",
        "precio": 10.005,
        "stock": 3,
        "categoria": "hogar",
        "imagen": "https://cdn.example.com/a.jpg",
        "rating": 4.5
    },
    {
        "id": 3,
        "nombre": "Lámpara",
        "descripcion": "Sin existencias",
        "precio": "25.5",
        "stock": 0
    },
    {
        "id": 1,
        "nombre": "Duplicado",
        "precio": 1,
        "stock": 9
    }
]"#;

/// Parsed [`SAMPLE_CATALOG_JSON`].
#[must_use]
pub fn sample_products() -> Vec<Product> {
    serde_json::from_str(SAMPLE_CATALOG_JSON).unwrap()
}

/// Configuration pointing at `catalog_url`, everything else defaulted.
#[must_use]
pub fn test_config(catalog_url: &str) -> StorefrontConfig {
    let vars = HashMap::from([("CATALOG_URL".to_string(), catalog_url.to_string())]);
    StorefrontConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Error sink that keeps every report for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<(ErrorKind, ErrorContext)>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn reports(&self) -> Vec<(ErrorKind, ErrorContext)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, kind: ErrorKind, context: &ErrorContext) {
        self.reports.lock().unwrap().push((kind, context.clone()));
    }
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// The storefront router wired to an in-memory catalog.
pub struct TestApp {
    router: Router,
    pub catalog: Arc<InMemoryCatalog>,
    pub sink: RecordingSink,
}

impl TestApp {
    /// Serve [`sample_products`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(InMemoryCatalog::new(sample_products()))
    }

    #[must_use]
    pub fn with_catalog(catalog: InMemoryCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let sink = RecordingSink::default();
        let state = AppState::new(
            test_config("http://catalog.invalid/productos"),
            Arc::clone(&catalog) as _,
            Arc::new(sink.clone()),
        );

        Self {
            router: app(state),
            catalog,
            sink,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        send(&self.router, request).await
    }
}

/// Drive `router` with one request and buffer the response.
pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
