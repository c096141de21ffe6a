//! Product-detail page.
//!
//! # Flow
//!
//! ```text
//! identifier changes
//!   -> ProductPageController::load      (fetch full collection, resolve by id)
//!   -> ViewState                        (loading / product / image / quantity)
//!   -> presenter::present               (Loading | NotFound | Loaded)
//!   -> askama templates
//! ```

pub mod controller;
pub mod presenter;
pub mod state;

pub use controller::{CartIntent, LoadOutcome, ProductPageController};
pub use presenter::{PageLinks, PageView, ProductDetailView, present};
pub use state::ViewState;
