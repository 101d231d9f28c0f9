//! Products

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use smallvec::SmallVec;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Availability of a product in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductStatus {
    /// Can be sold.
    #[default]
    Available,

    /// Temporarily unavailable.
    OutOfStock,

    /// No longer sold.
    Discontinued,
}

impl ProductStatus {
    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OutOfStock => "out_of_stock",
            Self::Discontinued => "discontinued",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised product status string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown product status: {0}")]
pub struct UnknownProductStatus(pub String);

impl FromStr for ProductStatus {
    type Err = UnknownProductStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "out_of_stock" => Ok(Self::OutOfStock),
            "discontinued" => Ok(Self::Discontinued),
            other => Err(UnknownProductStatus(other.to_string())),
        }
    }
}

/// A named color option of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorVariant {
    /// Display name, also the variant identity in a cart.
    pub name: String,

    /// Swatch value, e.g. `#1d1d1f`.
    pub hex: String,
}

impl ColorVariant {
    /// Create a new color variant.
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product UUID
    pub uuid: ProductUuid,

    /// Display name
    pub name: String,

    /// Brand
    pub brand: String,

    /// Model
    pub model: String,

    /// Base price
    pub price: Decimal,

    /// Promotional price, if any
    pub promotional_price: Option<Decimal>,

    /// Availability
    pub status: ProductStatus,

    /// Selectable colors
    pub colors: SmallVec<[ColorVariant; 4]>,
}

impl Product {
    /// Create an available product with no promotion and no colors.
    pub fn new(uuid: ProductUuid, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            uuid,
            name: name.into(),
            brand: String::new(),
            model: String::new(),
            price,
            promotional_price: None,
            status: ProductStatus::Available,
            colors: SmallVec::new(),
        }
    }

    /// Price charged for one unit right now.
    ///
    /// The promotional price wins whenever it is set and non-zero, even if it
    /// is not lower than the base price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.promotional_price {
            Some(promotional) if !promotional.is_zero() => promotional,
            _ => self.price,
        }
    }

    /// Whether the promotional price is an actual reduction.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        matches!(
            self.promotional_price,
            Some(promotional) if !promotional.is_zero() && promotional < self.price
        )
    }

    /// Whole-percent reduction of the promotional price, for badges.
    #[must_use]
    pub fn discount_percent(&self) -> Option<Decimal> {
        if !self.has_discount() || self.price.is_zero() {
            return None;
        }

        let reduction = self.price.checked_sub(self.effective_price())?;
        let ratio = reduction.checked_div(self.price)?;

        Some(
            ratio
                .checked_mul(Decimal::ONE_HUNDRED)?
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Look up a color by name.
    #[must_use]
    pub fn color(&self, name: &str) -> Option<&ColorVariant> {
        self.colors.iter().find(|color| color.name == name)
    }

    /// Brand and model joined for display, skipping empty parts.
    #[must_use]
    pub fn brand_model(&self) -> String {
        [self.brand.trim(), self.model.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use smallvec::smallvec;

    use super::*;

    fn product(price: Decimal, promotional_price: Option<Decimal>) -> Product {
        Product {
            promotional_price,
            ..Product::new(ProductUuid::new(), "Phone", price)
        }
    }

    #[test]
    fn effective_price_prefers_promotional_price() {
        assert_eq!(
            product(dec!(100), Some(dec!(80))).effective_price(),
            dec!(80)
        );
    }

    #[test]
    fn effective_price_ignores_zero_promotional_price() {
        assert_eq!(product(dec!(100), Some(dec!(0))).effective_price(), dec!(100));
        assert_eq!(product(dec!(100), None).effective_price(), dec!(100));
    }

    #[test]
    fn non_discounting_promotional_price_is_still_charged() {
        let product = product(dec!(100), Some(dec!(120)));

        assert_eq!(product.effective_price(), dec!(120));
        assert!(!product.has_discount());
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn discount_percent_rounds_to_whole_percent() {
        let product = product(dec!(3), Some(dec!(2)));

        assert!(product.has_discount());
        assert_eq!(product.discount_percent(), Some(dec!(33)));
    }

    #[test]
    fn status_round_trips_through_strings() -> Result<(), UnknownProductStatus> {
        for status in [
            ProductStatus::Available,
            ProductStatus::OutOfStock,
            ProductStatus::Discontinued,
        ] {
            assert_eq!(status.as_str().parse::<ProductStatus>()?, status);
        }

        assert!("sold".parse::<ProductStatus>().is_err());

        Ok(())
    }

    #[test]
    fn color_lookup_and_brand_model() {
        let product = Product {
            brand: "Acme".to_string(),
            model: " X1 ".to_string(),
            colors: smallvec![ColorVariant::new("Black", "#000000")],
            ..product(dec!(10), None)
        };

        assert_eq!(product.brand_model(), "Acme X1");
        assert_eq!(
            product.color("Black").map(|color| color.hex.as_str()),
            Some("#000000")
        );
        assert!(product.color("Blue").is_none());
    }
}
