mod items;
mod quotes;

pub(crate) use items::SqlQuoteItemsRepository;
pub(crate) use quotes::{QuoteHeader, SqlQuotesRepository};
