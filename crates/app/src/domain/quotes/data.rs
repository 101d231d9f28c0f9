//! Quotes Data

use jiff::civil::Date;
use tally::{cart::Cart, discounts::Discount, pricing::LineEntry};

use crate::domain::quotes::{
    errors::ValidationError,
    models::{Customer, QuoteUuid},
};

/// New Quote Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuote {
    pub uuid: QuoteUuid,
    pub customer: Customer,
    pub entries: Vec<LineEntry>,
    pub discount: Discount,
    pub notes: Option<String>,
    pub valid_until: Option<Date>,
}

impl NewQuote {
    /// Build a quote from the current cart selection.
    ///
    /// The cart is left untouched; callers clear it once the quote has been
    /// stored.
    #[must_use]
    pub fn from_cart(customer: Customer, cart: &Cart, discount: Discount) -> Self {
        Self {
            uuid: QuoteUuid::new(),
            customer,
            entries: cart.entries(),
            discount,
            notes: None,
            valid_until: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_customer(&self.customer)?;
        validate_entries(&self.entries)
    }
}

/// Quote Update Data
///
/// Fields left as `None` keep their stored value. Supplying `lines` replaces
/// the whole line set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteUpdate {
    pub customer: Option<Customer>,
    pub lines: Option<Vec<LineEntry>>,
    pub discount: Option<Discount>,
    pub notes: Option<Option<String>>,
    pub valid_until: Option<Option<Date>>,
}

impl QuoteUpdate {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if let Some(customer) = &self.customer {
            validate_customer(customer)?;
        }

        if let Some(lines) = &self.lines {
            validate_entries(lines)?;
        }

        Ok(())
    }
}

fn validate_customer(customer: &Customer) -> Result<(), ValidationError> {
    if customer.name.trim().is_empty() {
        return Err(ValidationError::MissingCustomerName);
    }

    Ok(())
}

fn validate_entries(entries: &[LineEntry]) -> Result<(), ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::EmptyQuote);
    }

    if entries.iter().any(|entry| entry.quantity == 0) {
        return Err(ValidationError::InvalidQuantity);
    }

    Ok(())
}
