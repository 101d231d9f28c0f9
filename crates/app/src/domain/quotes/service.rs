//! Quotes service.

use async_trait::async_trait;
use jiff::{Timestamp, Zoned};
use mockall::automock;
use sqlx::{Sqlite, Transaction};
use tally::pricing::price_document;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::quotes::{
        data::{NewQuote, QuoteUpdate},
        errors::QuotesServiceError,
        filters::{QuoteFilter, QuoteListing, matches_search},
        models::{Quote, QuoteStatus, QuoteUuid},
        repositories::{QuoteHeader, SqlQuoteItemsRepository, SqlQuotesRepository},
    },
};

#[derive(Debug, Clone)]
pub struct SqlQuotesService {
    db: Db,
    quotes: SqlQuotesRepository,
    items: SqlQuoteItemsRepository,
}

impl SqlQuotesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            quotes: SqlQuotesRepository::new(),
            items: SqlQuoteItemsRepository::new(),
        }
    }

    async fn load_quote(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        quote: QuoteUuid,
    ) -> Result<Quote, sqlx::Error> {
        let mut loaded = self.quotes.get_quote(tx, quote).await?;

        loaded.items = self.items.get_quote_items(tx, quote).await?;

        Ok(loaded)
    }
}

#[async_trait]
impl QuotesService for SqlQuotesService {
    #[tracing::instrument(
        name = "quotes.service.create_quote",
        skip(self, quote),
        fields(quote_uuid = %quote.uuid, line_count = quote.entries.len()),
        err
    )]
    async fn create_quote(&self, quote: NewQuote) -> Result<Quote, QuotesServiceError> {
        quote.validate()?;

        let document = price_document(&quote.entries, &quote.discount)?;

        let mut tx = self.db.begin().await?;

        self.quotes
            .create_quote(
                &mut tx,
                quote.uuid,
                QuoteHeader {
                    customer: &quote.customer,
                    totals: &document.totals,
                    notes: quote.notes.as_deref(),
                    valid_until: quote.valid_until,
                },
                Timestamp::now(),
            )
            .await?;

        self.items
            .create_quote_items(&mut tx, quote.uuid, &document.lines)
            .await?;

        let created = self.load_quote(&mut tx, quote.uuid).await?;

        tx.commit().await?;

        info!(quote_uuid = %created.uuid, total = %created.total, "created quote");

        Ok(created)
    }

    async fn get_quote(&self, quote: QuoteUuid) -> Result<Quote, QuotesServiceError> {
        let mut tx = self.db.begin().await?;

        let quote = self.load_quote(&mut tx, quote).await?;

        tx.commit().await?;

        Ok(quote)
    }

    #[tracing::instrument(
        name = "quotes.service.list_quotes",
        skip(self, filter),
        fields(filtered_count = tracing::field::Empty),
        err
    )]
    async fn list_quotes(&self, filter: QuoteFilter) -> Result<QuoteListing, QuotesServiceError> {
        let bounds = filter
            .date
            .map(|bucket| bucket.bounds(&Zoned::now()))
            .transpose()?
            .unwrap_or_default();

        let status = filter.status.status();

        let mut tx = self.db.begin().await?;

        let total_count = self.quotes.count_quotes(&mut tx).await?;
        let mut quotes = self.quotes.list_quotes(&mut tx, status, bounds).await?;
        let mut items = self.items.list_quote_items(&mut tx, status, bounds).await?;

        tx.commit().await?;

        for quote in &mut quotes {
            if let Some(quote_items) = items.remove(&quote.uuid) {
                quote.items = quote_items;
            }
        }

        if let Some(term) = filter.search_term() {
            quotes.retain(|quote| matches_search(quote, &term));
        }

        let filtered_count = quotes.len();

        Span::current().record("filtered_count", filtered_count);

        Ok(QuoteListing {
            quotes,
            total_count,
            filtered_count,
        })
    }

    #[tracing::instrument(
        name = "quotes.service.update_quote",
        skip(self, update),
        fields(quote_uuid = %quote, replaces_lines = update.lines.is_some()),
        err
    )]
    async fn update_quote(
        &self,
        quote: QuoteUuid,
        update: QuoteUpdate,
    ) -> Result<Quote, QuotesServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let current = self.load_quote(&mut tx, quote).await?;

        let replaces_lines = update.lines.is_some();
        let entries = update.lines.unwrap_or_else(|| current.line_entries());
        let discount = update.discount.unwrap_or_else(|| current.discount());

        let document = price_document(&entries, &discount)?;

        let customer = update.customer.unwrap_or(current.customer);
        let notes = update.notes.unwrap_or(current.notes);
        let valid_until = update.valid_until.unwrap_or(current.valid_until);

        self.quotes
            .update_quote(
                &mut tx,
                quote,
                QuoteHeader {
                    customer: &customer,
                    totals: &document.totals,
                    notes: notes.as_deref(),
                    valid_until,
                },
                Timestamp::now(),
            )
            .await?;

        if replaces_lines {
            self.items.delete_quote_items(&mut tx, quote).await?;

            self.items
                .create_quote_items(&mut tx, quote, &document.lines)
                .await?;
        }

        let updated = self.load_quote(&mut tx, quote).await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "quotes.service.update_status",
        skip(self),
        fields(quote_uuid = %quote, status = %status),
        err
    )]
    async fn update_status(
        &self,
        quote: QuoteUuid,
        status: QuoteStatus,
    ) -> Result<Quote, QuotesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .quotes
            .update_status(&mut tx, quote, status, Timestamp::now())
            .await?;

        if rows_affected == 0 {
            return Err(QuotesServiceError::NotFound);
        }

        let updated = self.load_quote(&mut tx, quote).await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "quotes.service.delete_quote",
        skip(self),
        fields(quote_uuid = %quote),
        err
    )]
    async fn delete_quote(&self, quote: QuoteUuid) -> Result<(), QuotesServiceError> {
        let mut tx = self.db.begin().await?;

        self.items.delete_quote_items(&mut tx, quote).await?;

        let rows_affected = self.quotes.delete_quote(&mut tx, quote).await?;

        if rows_affected == 0 {
            return Err(QuotesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(quote_uuid = %quote, "deleted quote");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait QuotesService: Send + Sync {
    /// Validates, prices and stores a new draft quote with its lines.
    async fn create_quote(&self, quote: NewQuote) -> Result<Quote, QuotesServiceError>;

    /// Retrieve a single quote with its lines.
    async fn get_quote(&self, quote: QuoteUuid) -> Result<Quote, QuotesServiceError>;

    /// Lists quotes matching the filter, newest first.
    async fn list_quotes(&self, filter: QuoteFilter) -> Result<QuoteListing, QuotesServiceError>;

    /// Edits a quote and recomputes its totals.
    async fn update_quote(
        &self,
        quote: QuoteUuid,
        update: QuoteUpdate,
    ) -> Result<Quote, QuotesServiceError>;

    /// Sets the status. Any status may follow any other.
    async fn update_status(
        &self,
        quote: QuoteUuid,
        status: QuoteStatus,
    ) -> Result<Quote, QuotesServiceError>;

    /// Deletes a quote and its lines.
    async fn delete_quote(&self, quote: QuoteUuid) -> Result<(), QuotesServiceError>;
}
