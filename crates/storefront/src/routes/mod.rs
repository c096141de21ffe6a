//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (catalog reachable)
//!
//! # Products
//! GET  /products/{id}                - Product page shell (loading state)
//! GET  /products/{id}/panel          - Resolved page state (HTMX fragment)
//! POST /products/{id}/quantity       - Clamp quantity (returns selector fragment)
//! POST /products/{id}/cart           - Add to cart (returns notice, triggers cart-updated)
//! ```

pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/panel", get(products::panel))
        .route("/{id}/quantity", post(products::update_quantity))
        .route("/{id}/cart", post(products::add_to_cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/products", product_routes())
}
