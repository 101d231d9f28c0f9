//! Pricing
//!
//! Pure conversion of selected products into priced line items and document
//! totals.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    discounts::Discount,
    money::round_currency,
    products::{Product, ProductUuid},
};

/// Errors that can occur while pricing a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Decimal arithmetic overflowed.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// One product selection to be priced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEntry {
    /// Product being sold.
    pub product_uuid: ProductUuid,

    /// Units sold.
    pub quantity: u32,

    /// Effective catalog price read when the entry was built.
    pub catalog_price: Decimal,

    /// Unit price to charge instead of the catalog price.
    pub unit_price_override: Option<Decimal>,
}

impl LineEntry {
    /// Entry priced from the product's current effective price.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_uuid: product.uuid,
            quantity,
            catalog_price: product.effective_price(),
            unit_price_override: None,
        }
    }

    /// Entry with an already charged unit price, used when re-pricing a
    /// persisted line so a later catalog change does not leak into it.
    #[must_use]
    pub fn frozen(product_uuid: ProductUuid, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            product_uuid,
            quantity,
            catalog_price: unit_price,
            unit_price_override: Some(unit_price),
        }
    }

    /// Unit price this entry will be charged at.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price_override.unwrap_or(self.catalog_price)
    }
}

/// A priced line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    /// Product sold.
    pub product_uuid: ProductUuid,

    /// Units sold.
    pub quantity: u32,

    /// Unit price charged, at currency precision.
    pub unit_price: Decimal,

    /// Unrounded unit price × quantity, rounded at the line. Differs from
    /// `unit_price × quantity` only for sub-cent unit prices.
    pub total_price: Decimal,
}

/// Document totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Sum of line totals.
    pub subtotal: Decimal,

    /// Discount taken off the subtotal.
    pub discount_amount: Decimal,

    /// Percentage the discount amount was derived from, if any.
    pub discount_percentage: Option<Decimal>,

    /// `max(0, subtotal − discount_amount)`.
    pub total: Decimal,
}

/// A fully priced document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedDocument {
    /// Priced lines, in entry order.
    pub lines: Vec<PricedLine>,

    /// Document totals.
    pub totals: Totals,
}

/// Price each entry.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if a line total overflows.
pub fn price_line_items(entries: &[LineEntry]) -> Result<Vec<PricedLine>, PricingError> {
    entries.iter().map(price_line).collect()
}

fn price_line(entry: &LineEntry) -> Result<PricedLine, PricingError> {
    let unit = entry.unit_price();

    let total_price = unit
        .checked_mul(Decimal::from(entry.quantity))
        .map(round_currency)
        .ok_or(PricingError::Overflow)?;

    let unit_price = round_currency(unit);

    Ok(PricedLine {
        product_uuid: entry.product_uuid,
        quantity: entry.quantity,
        unit_price,
        total_price,
    })
}

/// Compute subtotal, discount and total for priced lines.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum or discount overflows.
pub fn compute_totals(lines: &[PricedLine], discount: &Discount) -> Result<Totals, PricingError> {
    let subtotal = lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.total_price))
        .ok_or(PricingError::Overflow)?;

    let applied = discount.resolve(subtotal)?;

    let total = subtotal
        .checked_sub(applied.amount)
        .ok_or(PricingError::Overflow)?
        .max(Decimal::ZERO);

    Ok(Totals {
        subtotal,
        discount_amount: applied.amount,
        discount_percentage: applied.percentage,
        total: round_currency(total),
    })
}

/// Price entries and compute totals in one step.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any arithmetic overflows.
pub fn price_document(
    entries: &[LineEntry],
    discount: &Discount,
) -> Result<PricedDocument, PricingError> {
    let lines = price_line_items(entries)?;
    let totals = compute_totals(&lines, discount)?;

    Ok(PricedDocument { lines, totals })
}
