//! Page-local view state.

use vitrina_core::Product;

/// Everything the product page renders from.
///
/// One instance per subject identifier. A new identifier gets a fresh
/// [`ViewState::initial`]; state is never patched across subjects.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// True only while a catalog fetch is in flight.
    pub loading: bool,
    /// Present only after a successful match.
    pub product: Option<Product>,
    /// Set once the product image fails to load; never cleared.
    pub image_load_failed: bool,
    /// Selected quantity, within `[1, stock]` when stock is available.
    pub quantity: u32,
}

impl ViewState {
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            loading: true,
            product: None,
            image_load_failed: false,
            quantity: 1,
        }
    }

    /// Upper bound for the quantity selector. Never below 1.
    #[must_use]
    pub fn max_quantity(&self) -> u32 {
        self.product
            .as_ref()
            .map_or(1, |product| product.stock.max(1))
    }

    /// Clamp a raw quantity into `[1, max_quantity]`.
    #[must_use]
    pub fn clamp_quantity(&self, raw: i64) -> u32 {
        let clamped = raw.clamp(1, i64::from(self.max_quantity()));
        u32::try_from(clamped).unwrap_or(1)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial()
    }
}
