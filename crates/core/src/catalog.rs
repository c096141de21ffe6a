//! Product lookup within a fetched catalog snapshot.
//!
//! The listing service has no lookup-by-id endpoint, so callers always fetch
//! the full collection and resolve locally.

use crate::types::{Product, ProductId};

/// Find the product with the given id.
///
/// Returns the first match in sequence order. A snapshot that breaks id
/// uniqueness is tolerated: the earliest occurrence wins and no error is raised.
#[must_use]
pub fn resolve_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|product| product.id == id)
}
