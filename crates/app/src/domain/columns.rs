//! Column encoding shared by the repositories.
//!
//! Amounts are stored as integer minor units and timestamps as integer
//! microseconds since the Unix epoch.

use std::{error::Error as StdError, str::FromStr};

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use sqlx::{Row, sqlite::SqliteRow};
use tally::money::{from_minor_units, to_minor_units};

fn decode_error(col: &str, source: impl StdError + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}

pub(crate) fn encode_amount(amount: Decimal) -> Result<i64, sqlx::Error> {
    to_minor_units(amount).map_err(|error| sqlx::Error::Encode(Box::new(error)))
}

pub(crate) fn encode_optional_amount(amount: Option<Decimal>) -> Result<Option<i64>, sqlx::Error> {
    amount.map(encode_amount).transpose()
}

pub(crate) fn encode_timestamp(timestamp: Timestamp) -> i64 {
    timestamp.as_microsecond()
}

pub(crate) fn try_get_amount(row: &SqliteRow, col: &str) -> Result<Decimal, sqlx::Error> {
    let minor: i64 = row.try_get(col)?;

    Ok(from_minor_units(minor))
}

pub(crate) fn try_get_optional_amount(
    row: &SqliteRow,
    col: &str,
) -> Result<Option<Decimal>, sqlx::Error> {
    let minor: Option<i64> = row.try_get(col)?;

    Ok(minor.map(from_minor_units))
}

pub(crate) fn try_get_timestamp(row: &SqliteRow, col: &str) -> Result<Timestamp, sqlx::Error> {
    let micros: i64 = row.try_get(col)?;

    Timestamp::from_microsecond(micros).map_err(|error| decode_error(col, error))
}

pub(crate) fn try_get_optional_timestamp(
    row: &SqliteRow,
    col: &str,
) -> Result<Option<Timestamp>, sqlx::Error> {
    let micros: Option<i64> = row.try_get(col)?;

    micros
        .map(|micros| Timestamp::from_microsecond(micros).map_err(|error| decode_error(col, error)))
        .transpose()
}

pub(crate) fn try_get_optional_date(
    row: &SqliteRow,
    col: &str,
) -> Result<Option<Date>, sqlx::Error> {
    let text: Option<String> = row.try_get(col)?;

    text.map(|text| text.parse::<Date>().map_err(|error| decode_error(col, error)))
        .transpose()
}

pub(crate) fn try_get_optional_decimal(
    row: &SqliteRow,
    col: &str,
) -> Result<Option<Decimal>, sqlx::Error> {
    let text: Option<String> = row.try_get(col)?;

    text.map(|text| Decimal::from_str(&text).map_err(|error| decode_error(col, error)))
        .transpose()
}

/// Parse an enum stored as text.
pub(crate) fn try_get_parsed<T>(row: &SqliteRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let text: String = row.try_get(col)?;

    text.parse::<T>().map_err(|error| decode_error(col, error))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sqlx::{query, sqlite::SqlitePoolOptions};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn encode_amount_rejects_unrepresentable_values() {
        assert!(matches!(
            encode_amount(Decimal::MAX),
            Err(sqlx::Error::Encode(_))
        ));
    }

    #[tokio::test]
    async fn columns_decode_from_sqlite_rows() -> TestResult {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let now = Timestamp::from_microsecond(1_767_225_600_000_000)?;

        let row = query(
            "SELECT ?1 AS amount, NULL AS missing, ?2 AS at, '2026-01-31' AS day, '12.5' AS pct",
        )
        .bind(encode_amount(dec!(49.90))?)
        .bind(encode_timestamp(now))
        .fetch_one(&pool)
        .await?;

        assert_eq!(try_get_amount(&row, "amount")?, dec!(49.90));
        assert_eq!(try_get_optional_amount(&row, "missing")?, None);
        assert_eq!(try_get_timestamp(&row, "at")?, now);
        assert_eq!(try_get_optional_timestamp(&row, "missing")?, None);
        assert_eq!(
            try_get_optional_date(&row, "day")?,
            Some(jiff::civil::date(2026, 1, 31))
        );
        assert_eq!(try_get_optional_decimal(&row, "pct")?, Some(dec!(12.5)));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_columns_are_decode_errors() -> TestResult {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let row = query("SELECT 'not-a-date' AS day")
            .fetch_one(&pool)
            .await?;

        assert!(matches!(
            try_get_optional_date(&row, "day"),
            Err(sqlx::Error::ColumnDecode { .. })
        ));

        Ok(())
    }
}
