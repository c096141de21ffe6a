//! Load cycle and commands for one product page.
//!
//! Every call to [`ProductPageController::load`] starts a new generation. A
//! fetch only applies its result if its generation is still current when it
//! settles, so a slow, superseded fetch can never overwrite fresher state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument};
use vitrina_core::{Product, ProductId, resolve_product};

use super::state::ViewState;
use crate::catalog::CatalogService;
use crate::error::add_breadcrumb;
use crate::reporting::{ErrorContext, ErrorKind, ErrorSink};

/// How a load cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No identifier; nothing fetched, state untouched.
    Skipped,
    /// Result written to the view state.
    Applied,
    /// A newer load started meanwhile; result discarded.
    Superseded,
}

/// Add-to-cart record handed to the downstream cart system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIntent {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
}

/// Owns the view state of one product page.
pub struct ProductPageController {
    catalog: Arc<dyn CatalogService>,
    sink: Arc<dyn ErrorSink>,
    inner: Mutex<Inner>,
}

struct Inner {
    generation: u64,
    identifier: Option<String>,
    state: ViewState,
}

impl ProductPageController {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogService>, sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            catalog,
            sink,
            inner: Mutex::new(Inner {
                generation: 0,
                identifier: None,
                state: ViewState::initial(),
            }),
        }
    }

    /// Run one fetch-and-match cycle for `identifier`.
    ///
    /// `None` performs no fetch and leaves the page loading. Otherwise the
    /// state is rebuilt from scratch, the full collection is fetched once and
    /// the product resolved locally. Fetch failures are reported to the sink
    /// and end in "no product". `loading = false` is always the last write.
    #[instrument(skip(self))]
    pub async fn load(&self, identifier: Option<&str>) -> LoadOutcome {
        let Some(raw) = identifier else {
            debug!("No identifier, skipping load");
            return LoadOutcome::Skipped;
        };

        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.identifier = Some(raw.to_string());
            inner.state = ViewState::initial();
            inner.generation
        };

        let Some(id) = ProductId::parse_identifier(raw) else {
            debug!(identifier = raw, "Identifier is not an integer, no product can match");
            return self.settle(generation, None);
        };

        let product = match self.catalog.fetch_all_products().await {
            Ok(products) => resolve_product(&products, id).cloned(),
            Err(e) => {
                self.sink.report(
                    ErrorKind::CatalogFetchFailure,
                    &ErrorContext {
                        identifier: raw.to_string(),
                        generation,
                        message: e.to_string(),
                    },
                );
                None
            }
        };

        self.settle(generation, product)
    }

    fn settle(
        &self,
        generation: u64,
        product: Option<Product>,
    ) -> LoadOutcome {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(
                generation,
                current = inner.generation,
                "Discarding superseded load"
            );
            return LoadOutcome::Superseded;
        }

        inner.state.product = product;
        inner.state.quantity = 1;
        inner.state.loading = false;
        LoadOutcome::Applied
    }

    /// Clamp `raw` into `[1, stock]` and store it.
    ///
    /// Without a product, or with no stock, the only valid quantity is 1.
    pub fn set_quantity(&self, raw: i64) -> u32 {
        let mut inner = self.lock();
        let quantity = inner.state.clamp_quantity(raw);
        inner.state.quantity = quantity;
        quantity
    }

    /// Like [`Self::set_quantity`], for raw form input.
    ///
    /// Fractional input is truncated toward zero; input that is not a
    /// number counts as the lower bound.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_quantity_input(&self, raw: &str) -> u32 {
        let raw = raw.trim();
        let requested = raw.parse::<i64>().ok().or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(|value| value.trunc() as i64)
        });
        self.set_quantity(requested.unwrap_or(1))
    }

    /// Record that the product image failed to load.
    ///
    /// Sticky until the next [`Self::load`] rebuilds the state.
    pub fn report_image_load_failure(&self) {
        self.lock().state.image_load_failed = true;
    }

    /// Record the intent to add the current quantity to the cart.
    ///
    /// Returns `None` when no product is loaded or it is sold out. No cart
    /// state is kept here; the intent is logged for the downstream cart.
    pub fn add_to_cart(&self) -> Option<CartIntent> {
        let intent = {
            let inner = self.lock();
            let product = inner.state.product.as_ref().filter(|p| p.in_stock())?;
            CartIntent {
                product_id: product.id,
                product_name: product.name.clone(),
                quantity: inner.state.quantity,
            }
        };

        info!(
            product_id = %intent.product_id,
            product_name = %intent.product_name,
            quantity = intent.quantity,
            "quantity {} of product {} added",
            intent.quantity,
            intent.product_id
        );
        let product_id = intent.product_id.to_string();
        let quantity = intent.quantity.to_string();
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[
                ("product_id", product_id.as_str()),
                ("quantity", quantity.as_str()),
            ]),
        );

        Some(intent)
    }

    /// Copy of the current view state.
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.lock().state.clone()
    }

    /// Identifier of the most recent load, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<String> {
        self.lock().identifier.clone()
    }

    /// Number of load cycles started.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
