//! Quotes service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use tally::pricing::PricingError;
use thiserror::Error;

/// Input refused before the store is touched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("customer name is required")]
    MissingCustomerName,

    #[error("a quote needs at least one line")]
    EmptyQuote,

    #[error("line quantities must be at least one")]
    InvalidQuantity,

    #[error("invalid date range")]
    InvalidDateRange,
}

#[derive(Debug, Error)]
pub enum QuotesServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("quote not found")]
    NotFound,

    #[error("quote already exists")]
    AlreadyExists,

    #[error("referenced product not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("quote store unavailable")]
    StoreUnavailable(#[source] Error),
}

impl From<Error> for QuotesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if matches!(
            error,
            Error::Encode(_) | Error::Decode(_) | Error::ColumnDecode { .. }
        ) {
            return Self::InvalidData;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::StoreUnavailable(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_not_a_store_failure() {
        assert!(matches!(
            QuotesServiceError::from(Error::RowNotFound),
            QuotesServiceError::NotFound
        ));
        assert!(matches!(
            QuotesServiceError::from(Error::PoolTimedOut),
            QuotesServiceError::StoreUnavailable(_)
        ));
    }
}
