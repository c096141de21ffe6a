//! Catalog product as served by the product-listing service.
//!
//! The listing service speaks Spanish field names (`nombre`, `precio`, ...);
//! they are mapped onto English Rust names here so the rest of the workspace
//! never sees the wire names.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _, de::IgnoredAny};

use super::id::ProductId;
use super::price::Price;

/// A product from one catalog snapshot.
///
/// Immutable from the storefront's perspective. `id` is unique within a
/// snapshot; optional fields degrade to `None` rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Unit price in the store currency.
    #[serde(rename = "precio", deserialize_with = "non_negative_decimal")]
    pub price: Decimal,
    /// Units available.
    pub stock: u32,
    #[serde(
        rename = "categoria",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    /// Image URI.
    #[serde(
        rename = "imagen",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    /// Average rating; anything but a number reads as unrated.
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
}

impl Product {
    /// Unit price in the store currency.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        // Deserialization already rejected negative amounts.
        Price::new(self.price).unwrap_or_else(|_| Price::zero())
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

fn non_negative_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(D::Error::custom(format!(
            "precio must not be negative (got {amount})"
        )));
    }
    Ok(amount)
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RatingValue {
    Number(f64),
    Other(IgnoredAny),
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RatingValue::deserialize(deserializer)? {
        RatingValue::Number(rating) if rating.is_finite() => Some(rating),
        RatingValue::Number(_) | RatingValue::Other(_) => None,
    })
}
