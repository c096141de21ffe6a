//! Core types for Vitrina.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{CURRENCY_SYMBOL, Price, PriceError};
pub use product::Product;
