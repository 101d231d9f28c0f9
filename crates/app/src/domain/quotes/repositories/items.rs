//! Quote Items Repository

use rustc_hash::FxHashMap;
use sqlx::{Sqlite, Transaction, query, query_as};
use tally::pricing::PricedLine;

use crate::domain::{
    columns::{encode_amount, encode_timestamp},
    quotes::{
        filters::DateBounds,
        models::{QuoteItem, QuoteItemUuid, QuoteStatus, QuoteUuid},
    },
};

const GET_QUOTE_ITEMS_SQL: &str = include_str!("../sql/get_quote_items.sql");
const LIST_QUOTE_ITEMS_SQL: &str = include_str!("../sql/list_quote_items.sql");
const CREATE_QUOTE_ITEM_SQL: &str = include_str!("../sql/create_quote_item.sql");
const DELETE_QUOTE_ITEMS_SQL: &str = include_str!("../sql/delete_quote_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlQuoteItemsRepository;

impl SqlQuoteItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_quote_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote: QuoteUuid,
    ) -> Result<Vec<QuoteItem>, sqlx::Error> {
        query_as::<Sqlite, QuoteItem>(GET_QUOTE_ITEMS_SQL)
            .bind(quote.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Items of every quote matching the listing filter, grouped by quote.
    pub(crate) async fn list_quote_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        status: Option<QuoteStatus>,
        bounds: DateBounds,
    ) -> Result<FxHashMap<QuoteUuid, Vec<QuoteItem>>, sqlx::Error> {
        let items = query_as::<Sqlite, QuoteItem>(LIST_QUOTE_ITEMS_SQL)
            .bind(status.map(QuoteStatus::as_str))
            .bind(bounds.from.map(encode_timestamp))
            .bind(bounds.until.map(encode_timestamp))
            .fetch_all(&mut **tx)
            .await?;

        let mut grouped: FxHashMap<QuoteUuid, Vec<QuoteItem>> = FxHashMap::default();

        for item in items {
            grouped.entry(item.quote_uuid).or_default().push(item);
        }

        Ok(grouped)
    }

    pub(crate) async fn create_quote_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote: QuoteUuid,
        lines: &[PricedLine],
    ) -> Result<(), sqlx::Error> {
        for (position, line) in (0_i64..).zip(lines) {
            query(CREATE_QUOTE_ITEM_SQL)
                .bind(QuoteItemUuid::new().into_uuid())
                .bind(quote.into_uuid())
                .bind(line.product_uuid.into_uuid())
                .bind(position)
                .bind(i64::from(line.quantity))
                .bind(encode_amount(line.unit_price)?)
                .bind(encode_amount(line.total_price)?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn delete_quote_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote: QuoteUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_QUOTE_ITEMS_SQL)
            .bind(quote.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
