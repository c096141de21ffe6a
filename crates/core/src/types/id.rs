//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
/// - `FromStr`, accepting surrounding whitespace (route segments, form values)
///
/// # Example
///
/// ```rust
/// # use vitrina_core::define_id;
/// define_id!(CategoryId);
/// define_id!(ReviewId);
///
/// let category_id = CategoryId::new(1);
/// let review_id: ReviewId = " 7 ".parse().unwrap();
///
/// assert_eq!(review_id.as_i32(), 7);
/// // These are different types, so this won't compile:
/// // let _: CategoryId = review_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);

impl ProductId {
    /// Interpret a page identifier as a product id.
    ///
    /// Besides plain integers, any integral numeric spelling (`"1.0"`,
    /// `"1e0"`) names the same product. Blank, fractional, non-finite or
    /// out-of-range input names no product.
    #[must_use]
    #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
    pub fn parse_identifier(raw: &str) -> Option<Self> {
        if let Ok(id) = raw.parse::<Self>() {
            return Some(id);
        }

        let value = raw.trim().parse::<f64>().ok()?;
        let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&value);
        (value.is_finite() && value.trunc() == value && in_range).then(|| Self(value as i32))
    }
}
