//! Vitrina Core - Shared catalog types.
//!
//! This crate provides the domain types used by the Vitrina storefront:
//! - `storefront` - Public product-detail pages
//! - `integration-tests` - Router-level tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and the catalog `Product`
//! - [`catalog`] - Lookup of a product within a fetched collection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::resolve_product;
pub use types::*;
