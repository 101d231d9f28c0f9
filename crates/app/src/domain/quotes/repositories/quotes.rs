//! Quotes Repository

use jiff::Timestamp;
use sqlx::{Sqlite, Transaction, query, query_as, query_scalar};
use tally::pricing::Totals;

use crate::domain::{
    columns::{encode_amount, encode_timestamp},
    quotes::{
        filters::DateBounds,
        models::{Customer, Quote, QuoteStatus, QuoteUuid},
    },
};

const CREATE_QUOTE_SQL: &str = include_str!("../sql/create_quote.sql");
const GET_QUOTE_SQL: &str = include_str!("../sql/get_quote.sql");
const LIST_QUOTES_SQL: &str = include_str!("../sql/list_quotes.sql");
const COUNT_QUOTES_SQL: &str = include_str!("../sql/count_quotes.sql");
const UPDATE_QUOTE_SQL: &str = include_str!("../sql/update_quote.sql");
const UPDATE_QUOTE_STATUS_SQL: &str = include_str!("../sql/update_quote_status.sql");
const DELETE_QUOTE_SQL: &str = include_str!("../sql/delete_quote.sql");

/// Header columns written on create and update.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QuoteHeader<'a> {
    pub(crate) customer: &'a Customer,
    pub(crate) totals: &'a Totals,
    pub(crate) notes: Option<&'a str>,
    pub(crate) valid_until: Option<jiff::civil::Date>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlQuotesRepository;

impl SqlQuotesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_quote(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote: QuoteUuid,
        header: QuoteHeader<'_>,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_QUOTE_SQL)
            .bind(quote.into_uuid())
            .bind(&header.customer.name)
            .bind(header.customer.email.as_deref())
            .bind(header.customer.phone.as_deref())
            .bind(header.customer.address.as_deref())
            .bind(encode_amount(header.totals.subtotal)?)
            .bind(encode_amount(header.totals.discount_amount)?)
            .bind(header.totals.discount_percentage.map(|pct| pct.to_string()))
            .bind(encode_amount(header.totals.total)?)
            .bind(QuoteStatus::Draft.as_str())
            .bind(header.notes)
            .bind(header.valid_until.map(|date| date.to_string()))
            .bind(encode_timestamp(now))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_quote(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote: QuoteUuid,
    ) -> Result<Quote, sqlx::Error> {
        query_as::<Sqlite, Quote>(GET_QUOTE_SQL)
            .bind(quote.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_quotes(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        status: Option<QuoteStatus>,
        bounds: DateBounds,
    ) -> Result<Vec<Quote>, sqlx::Error> {
        query_as::<Sqlite, Quote>(LIST_QUOTES_SQL)
            .bind(status.map(QuoteStatus::as_str))
            .bind(bounds.from.map(encode_timestamp))
            .bind(bounds.until.map(encode_timestamp))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_quotes(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<usize, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_QUOTES_SQL).fetch_one(&mut **tx).await?;

        usize::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn update_quote(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote: QuoteUuid,
        header: QuoteHeader<'_>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_QUOTE_SQL)
            .bind(quote.into_uuid())
            .bind(&header.customer.name)
            .bind(header.customer.email.as_deref())
            .bind(header.customer.phone.as_deref())
            .bind(header.customer.address.as_deref())
            .bind(encode_amount(header.totals.subtotal)?)
            .bind(encode_amount(header.totals.discount_amount)?)
            .bind(header.totals.discount_percentage.map(|pct| pct.to_string()))
            .bind(encode_amount(header.totals.total)?)
            .bind(header.notes)
            .bind(header.valid_until.map(|date| date.to_string()))
            .bind(encode_timestamp(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote: QuoteUuid,
        status: QuoteStatus,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_QUOTE_STATUS_SQL)
            .bind(quote.into_uuid())
            .bind(status.as_str())
            .bind(encode_timestamp(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_quote(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote: QuoteUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_QUOTE_SQL)
            .bind(quote.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
