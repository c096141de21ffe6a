//! Type-safe price representation using decimal arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Symbol of the single store currency.
pub const CURRENCY_SYMBOL: &str = "$";

/// Errors constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Amount rounded to cents, midpoints away from zero (`10.005` -> `10.01`).
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_SYMBOL}{:.2}", self.rounded())
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn price(amount: &str) -> Price {
        Price::new(Decimal::from_str(amount).unwrap()).unwrap()
    }

    #[test]
    fn test_display_rounds_midpoint_up() {
        assert_eq!(price("10.005").display(), "$10.01");
        assert_eq!(price("10.004").display(), "$10.00");
        assert_eq!(price("0.125").to_string(), "$0.13");
    }

    #[test]
    fn test_display_pads_to_two_decimals() {
        assert_eq!(price("10").display(), "$10.00");
        assert_eq!(price("0.5").display(), "$0.50");
        assert_eq!(Price::zero().display(), "$0.00");
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Price::new(Decimal::from_str("-1.00").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "price must not be negative (got -1.00)");
        assert!(Price::new(Decimal::from_str("-0").unwrap()).is_ok());
    }
}
