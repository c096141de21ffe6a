//! Integration tests for the HTTP catalog client.
//!
//! Each test binds a throwaway axum server on `127.0.0.1:0` that plays the
//! product-listing service.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header::AUTHORIZATION},
    routing::get,
};
use vitrina_core::{ProductId, resolve_product};
use vitrina_integration_tests::{RecordingSink, SAMPLE_CATALOG_JSON, send, test_config};
use vitrina_storefront::{
    app,
    catalog::{CatalogError, CatalogService, HttpCatalog},
    config::{CatalogConfig, StorefrontConfig},
    state::AppState,
};

/// One valid product next to siblings the listing service got wrong.
const PARTLY_MALFORMED_JSON: &str = r#"[
    {"id": 1, "nombre": "A", "precio": 10.005, "stock": 3},
    {"id": 2, "nombre": "Negativo", "precio": -1, "stock": 5},
    {"nombre": "Sin id", "precio": 4, "stock": 1},
    {"id": 4, "nombre": "Texto", "precio": 2, "stock": 1, "rating": "4.5"}
]"#;

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn_catalog(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn catalog_config(vars: &[(&str, String)]) -> CatalogConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect();
    StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
        .unwrap()
        .catalog
}

#[tokio::test]
async fn test_fetches_and_resolves_products() {
    let base = spawn_catalog(Router::new().route("/productos", get(|| async { SAMPLE_CATALOG_JSON })))
        .await;
    let catalog = HttpCatalog::new(&test_config(&format!("{base}/productos")).catalog).unwrap();

    let products = catalog.fetch_all_products().await.unwrap();
    assert_eq!(products.len(), 3);

    let product = resolve_product(&products, ProductId::new(1)).unwrap();
    assert_eq!(product.name, "A");
    assert_eq!(product.unit_price().to_string(), "$10.01");
    assert!(resolve_product(&products, ProductId::new(2)).is_none());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let base = spawn_catalog(Router::new().route(
        "/productos",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    ))
    .await;
    let catalog = HttpCatalog::new(&test_config(&format!("{base}/productos")).catalog).unwrap();

    let err = catalog.fetch_all_products().await.unwrap_err();
    match err {
        CatalogError::Status { status, body } => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_a_parse_error() {
    let base = spawn_catalog(Router::new().route(
        "/productos",
        get(|| async { r#"{"productos": []}"# }),
    ))
    .await;
    let catalog = HttpCatalog::new(&test_config(&format!("{base}/productos")).catalog).unwrap();

    let err = catalog.fetch_all_products().await.unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn test_malformed_entries_do_not_hide_valid_products() {
    let base = spawn_catalog(Router::new().route("/productos", get(|| async { PARTLY_MALFORMED_JSON })))
        .await;
    let url = format!("{base}/productos");
    let catalog = HttpCatalog::new(&test_config(&url).catalog).unwrap();

    let products = catalog.fetch_all_products().await.unwrap();
    let ids: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![1, 4]);
    assert!(resolve_product(&products, ProductId::new(4)).unwrap().rating.is_none());

    let sink = RecordingSink::default();
    let state = AppState::new(test_config(&url), Arc::new(catalog), Arc::new(sink.clone()));
    let router = app(state);

    let request = Request::get("/products/1/panel").body(Body::empty()).unwrap();
    let resp = send(&router, request).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("$10.01"));
    assert!(sink.reports().is_empty());
}

#[tokio::test]
async fn test_unreachable_service_is_an_http_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let catalog = HttpCatalog::new(&test_config(&format!("http://{addr}/productos")).catalog).unwrap();
    let err = catalog.fetch_all_products().await.unwrap_err();
    assert!(matches!(err, CatalogError::Http(_)));
}

#[tokio::test]
async fn test_sends_bearer_token_when_configured() {
    let router = Router::new().route(
        "/productos",
        get(|headers: HeaderMap| async move {
            let authorized = headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                == Some("Bearer catalog-token-123");
            if authorized {
                (StatusCode::OK, SAMPLE_CATALOG_JSON)
            } else {
                (StatusCode::UNAUTHORIZED, "missing token")
            }
        }),
    );
    let base = spawn_catalog(router).await;

    let config = catalog_config(&[
        ("CATALOG_URL", format!("{base}/productos")),
        ("CATALOG_API_TOKEN", "catalog-token-123".to_string()),
    ]);
    let catalog = HttpCatalog::new(&config).unwrap();
    assert_eq!(catalog.fetch_all_products().await.unwrap().len(), 3);

    let anonymous = HttpCatalog::new(&test_config(&format!("{base}/productos")).catalog).unwrap();
    assert!(matches!(
        anonymous.fetch_all_products().await.unwrap_err(),
        CatalogError::Status { status, .. } if status == StatusCode::UNAUTHORIZED
    ));
}

#[tokio::test]
async fn test_snapshot_cache_avoids_refetching() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let router = Router::new().route(
        "/productos",
        get(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                SAMPLE_CATALOG_JSON
            }
        }),
    );
    let base = spawn_catalog(router).await;

    let config = catalog_config(&[
        ("CATALOG_URL", format!("{base}/productos")),
        ("CATALOG_CACHE_TTL_SECS", "60".to_string()),
    ]);
    let catalog = HttpCatalog::new(&config).unwrap();

    catalog.fetch_all_products().await.unwrap();
    catalog.fetch_all_products().await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    catalog.invalidate().await;
    catalog.fetch_all_products().await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_without_cache_every_fetch_hits_the_service() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let router = Router::new().route(
        "/productos",
        get(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                SAMPLE_CATALOG_JSON
            }
        }),
    );
    let base = spawn_catalog(router).await;
    let catalog = HttpCatalog::new(&test_config(&format!("{base}/productos")).catalog).unwrap();

    catalog.fetch_all_products().await.unwrap();
    catalog.fetch_all_products().await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
