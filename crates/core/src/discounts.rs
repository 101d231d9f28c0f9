//! Discounts

use rust_decimal::Decimal;

use crate::{money::round_currency, pricing::PricingError};

/// A document-level discount.
///
/// The percentage form is converted to an amount when totals are computed;
/// the amount is what a persisted document trusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Discount {
    /// No discount.
    #[default]
    None,

    /// An absolute amount taken off the subtotal.
    Amount(Decimal),

    /// A percentage of the subtotal, in `[0, 100]`.
    Percentage(Decimal),
}

impl Discount {
    /// Build a discount from the two independently editable fields of a
    /// quote form.
    ///
    /// A non-zero percentage takes precedence over the amount, so the amount
    /// is always derived from it when both are filled in.
    #[must_use]
    pub fn from_fields(amount: Option<Decimal>, percentage: Option<Decimal>) -> Self {
        match (amount, percentage) {
            (_, Some(percentage)) if !percentage.is_zero() => Self::Percentage(percentage),
            (Some(amount), _) if !amount.is_zero() => Self::Amount(amount),
            _ => Self::None,
        }
    }

    /// Resolve the discount against a subtotal.
    ///
    /// Percentages are clamped into `[0, 100]` and amounts into
    /// `[0, subtotal]`, so the result never exceeds the subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the percentage calculation
    /// overflows.
    pub fn resolve(&self, subtotal: Decimal) -> Result<AppliedDiscount, PricingError> {
        let subtotal = subtotal.max(Decimal::ZERO);

        match *self {
            Self::None => Ok(AppliedDiscount::default()),
            Self::Amount(amount) => Ok(AppliedDiscount {
                amount: round_currency(amount.clamp(Decimal::ZERO, subtotal)),
                percentage: None,
            }),
            Self::Percentage(percentage) => {
                let percentage = clamp_percentage(percentage);

                let amount = subtotal
                    .checked_mul(percentage)
                    .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
                    .ok_or(PricingError::Overflow)?;

                Ok(AppliedDiscount {
                    amount: round_currency(amount).min(subtotal),
                    percentage: Some(percentage),
                })
            }
        }
    }
}

/// A discount resolved against a concrete subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppliedDiscount {
    /// Amount taken off the subtotal.
    pub amount: Decimal,

    /// The percentage it was derived from, if any.
    pub percentage: Option<Decimal>,
}

/// Clamp a percentage into `[0, 100]`.
#[must_use]
pub fn clamp_percentage(percentage: Decimal) -> Decimal {
    percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}
