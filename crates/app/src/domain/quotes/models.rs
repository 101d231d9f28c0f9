//! Quote Models

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use tally::{
    discounts::Discount,
    pricing::LineEntry,
    products::ProductUuid,
    uuids::TypedUuid,
};
use thiserror::Error;

/// Quote UUID
pub type QuoteUuid = TypedUuid<Quote>;

/// Quote Item UUID
pub type QuoteItemUuid = TypedUuid<QuoteItem>;

/// Lifecycle status of a quote. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Approved,
    Rejected,
    Expired,
}

impl QuoteStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Sent,
        Self::Approved,
        Self::Rejected,
        Self::Expired,
    ];

    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised quote status string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown quote status: {0}")]
pub struct UnknownQuoteStatus(pub String);

impl FromStr for QuoteStatus {
    type Err = UnknownQuoteStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownQuoteStatus(s.to_string()))
    }
}

/// Customer block of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Customer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Customer {
    /// Customer with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Current catalog view of the product a line refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub uuid: ProductUuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub price: Decimal,
}

/// Quote Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteItem {
    pub uuid: QuoteItemUuid,
    pub quote_uuid: QuoteUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,

    /// Unit price charged when the line was priced.
    pub unit_price: Decimal,
    pub total_price: Decimal,

    /// Absent when the product row no longer exists.
    pub product: Option<ProductSummary>,
}

impl QuoteItem {
    /// Product name for display, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.product
            .as_ref()
            .map_or_else(|| self.product_uuid.to_string(), |product| product.name.clone())
    }
}

/// Quote Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub uuid: QuoteUuid,
    pub customer: Customer,
    pub items: Vec<QuoteItem>,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,

    /// Informational; `discount_amount` is what the total trusts.
    pub discount_percentage: Option<Decimal>,
    pub total: Decimal,
    pub status: QuoteStatus,
    pub notes: Option<String>,
    pub valid_until: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Quote {
    /// Pricing entries for the stored lines, keeping their charged prices.
    #[must_use]
    pub fn line_entries(&self) -> Vec<LineEntry> {
        self.items
            .iter()
            .map(|item| LineEntry::frozen(item.product_uuid, item.quantity, item.unit_price))
            .collect()
    }

    /// The discount this quote was priced with.
    #[must_use]
    pub fn discount(&self) -> Discount {
        match self.discount_percentage {
            Some(percentage) => Discount::Percentage(percentage),
            None => Discount::from_fields(Some(self.discount_amount), None),
        }
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn quote(discount_amount: Decimal, discount_percentage: Option<Decimal>) -> Quote {
        let uuid = QuoteUuid::new();
        let now = Timestamp::now();

        Quote {
            uuid,
            customer: Customer::new("Ana"),
            items: vec![QuoteItem {
                uuid: QuoteItemUuid::new(),
                quote_uuid: uuid,
                product_uuid: ProductUuid::new(),
                quantity: 3,
                unit_price: dec!(10),
                total_price: dec!(30),
                product: None,
            }],
            subtotal: dec!(30),
            discount_amount,
            discount_percentage,
            total: dec!(30) - discount_amount,
            status: QuoteStatus::Draft,
            notes: None,
            valid_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn status_parses_every_stored_value() -> Result<(), UnknownQuoteStatus> {
        for status in QuoteStatus::ALL {
            assert_eq!(status.as_str().parse::<QuoteStatus>()?, status);
        }

        assert_eq!(
            "archived".parse::<QuoteStatus>(),
            Err(UnknownQuoteStatus("archived".to_string()))
        );

        Ok(())
    }

    #[test]
    fn discount_reconstructs_percentage_first() {
        assert_eq!(
            quote(dec!(3), Some(dec!(10))).discount(),
            Discount::Percentage(dec!(10))
        );
        assert_eq!(quote(dec!(5), None).discount(), Discount::Amount(dec!(5)));
        assert_eq!(quote(dec!(0), None).discount(), Discount::None);
    }

    #[test]
    fn line_entries_freeze_charged_prices() {
        let quote = quote(dec!(0), None);

        let entries = quote.line_entries();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().map(LineEntry::unit_price), Some(dec!(10)));
        assert_eq!(quote.item_count(), 3);
    }
}
