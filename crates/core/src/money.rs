//! Money
//!
//! Amounts are carried as [`Decimal`] and rounded to two fractional digits
//! only at line-total and document-total boundaries. Storage uses integer
//! minor units (cents).

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Number of fractional digits kept for stored and displayed amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Errors converting amounts between representations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The amount cannot be represented as `i64` minor units.
    #[error("amount {0} does not fit in minor units")]
    OutOfRange(Decimal),
}

/// Round to currency precision using round-half-up (away from zero).
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an amount to minor units, rounding to currency precision first.
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] if the amount overflows `i64` cents.
pub fn to_minor_units(amount: Decimal) -> Result<i64, AmountError> {
    round_currency(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.to_i64())
        .ok_or(AmountError::OutOfRange(amount))
}

/// Convert minor units back to a two-digit decimal amount.
#[must_use]
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, CURRENCY_SCALE)
}

/// Format an amount for humans in the given currency.
///
/// Amounts too large for minor units fall back to the plain decimal.
#[must_use]
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    match to_minor_units(amount) {
        Ok(minor) => Money::from_minor(minor, currency).to_string(),
        Err(_) => format!("{} {}", currency.iso_alpha_code, round_currency(amount)),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn round_currency_rounds_half_up() {
        assert_eq!(round_currency(dec!(0.005)), dec!(0.01));
        assert_eq!(round_currency(dec!(0.015)), dec!(0.02));
        assert_eq!(round_currency(dec!(2.344)), dec!(2.34));
        assert_eq!(round_currency(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn minor_units_round_trip() -> TestResult {
        assert_eq!(to_minor_units(dec!(49.90))?, 4_990);
        assert_eq!(from_minor_units(4_990), dec!(49.90));

        Ok(())
    }

    #[test]
    fn to_minor_units_rounds_before_converting() -> TestResult {
        assert_eq!(to_minor_units(dec!(10.125))?, 1_013);

        Ok(())
    }

    #[test]
    fn to_minor_units_rejects_overflow() {
        let result = to_minor_units(Decimal::MAX);

        assert!(matches!(result, Err(AmountError::OutOfRange(_))));
    }

    #[test]
    fn format_amount_uses_currency_symbol() {
        let formatted = format_amount(dec!(99.80), BRL);

        assert!(formatted.contains("R$"), "unexpected format: {formatted}");
    }
}
