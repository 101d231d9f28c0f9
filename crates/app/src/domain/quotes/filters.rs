//! Quote listing filters.

use jiff::{SignedDuration, Timestamp, Zoned, civil::Date};

use crate::domain::quotes::{
    errors::ValidationError,
    models::{Quote, QuoteStatus},
};

/// Status part of a listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Any status.
    #[default]
    All,

    /// Only quotes in this status.
    Only(QuoteStatus),
}

impl StatusFilter {
    pub(crate) fn status(self) -> Option<QuoteStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

/// Creation date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    /// Since local midnight.
    Today,

    /// The last seven days.
    Week,

    /// The last thirty days.
    Month,

    /// Between two calendar days, both inclusive.
    Custom {
        /// First day included.
        start: Date,

        /// Last day included.
        end: Date,
    },
}

/// Half-open `[from, until)` creation time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    /// Inclusive lower bound.
    pub from: Option<Timestamp>,

    /// Exclusive upper bound.
    pub until: Option<Timestamp>,
}

impl DateBucket {
    /// Resolve the bucket against the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDateRange`] when a custom range ends
    /// before it starts or falls outside the supported calendar.
    pub fn bounds(&self, now: &Zoned) -> Result<DateBounds, ValidationError> {
        match *self {
            Self::Today => Ok(DateBounds {
                from: Some(
                    now.start_of_day()
                        .map_err(|_err| ValidationError::InvalidDateRange)?
                        .timestamp(),
                ),
                until: None,
            }),
            Self::Week => trailing_hours(now, 7 * 24),
            Self::Month => trailing_hours(now, 30 * 24),
            Self::Custom { start, end } => {
                if end < start {
                    return Err(ValidationError::InvalidDateRange);
                }

                let tz = now.time_zone().clone();

                let from = start
                    .to_zoned(tz.clone())
                    .map_err(|_err| ValidationError::InvalidDateRange)?
                    .timestamp();

                let until = end
                    .tomorrow()
                    .and_then(|day| day.to_zoned(tz))
                    .map_err(|_err| ValidationError::InvalidDateRange)?
                    .timestamp();

                Ok(DateBounds {
                    from: Some(from),
                    until: Some(until),
                })
            }
        }
    }
}

fn trailing_hours(now: &Zoned, hours: i64) -> Result<DateBounds, ValidationError> {
    let from = now
        .timestamp()
        .checked_sub(SignedDuration::from_hours(hours))
        .map_err(|_err| ValidationError::InvalidDateRange)?;

    Ok(DateBounds {
        from: Some(from),
        until: None,
    })
}

/// Quote listing filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteFilter {
    /// Case-insensitive text matched against the customer name, email and
    /// product names.
    pub search: Option<String>,

    /// Status to keep.
    pub status: StatusFilter,

    /// Creation window; `None` keeps every date.
    pub date: Option<DateBucket>,
}

impl QuoteFilter {
    pub(crate) fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

pub(crate) fn matches_search(quote: &Quote, term: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(term);

    contains(&quote.customer.name)
        || quote.customer.email.as_deref().is_some_and(contains)
        || quote
            .items
            .iter()
            .filter_map(|item| item.product.as_ref())
            .any(|product| contains(&product.name))
}

/// Result of a listing query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteListing {
    /// Matching quotes, newest first.
    pub quotes: Vec<Quote>,

    /// Number of stored quotes, ignoring the filter.
    pub total_count: usize,

    /// Number of quotes matching the filter.
    pub filtered_count: usize,
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz::TimeZone};
    use rust_decimal::Decimal;
    use tally::products::ProductUuid;
    use testresult::TestResult;

    use crate::domain::quotes::models::{
        Customer, ProductSummary, QuoteItem, QuoteItemUuid, QuoteUuid,
    };

    use super::*;

    fn now() -> Result<Zoned, jiff::Error> {
        date(2026, 3, 15).at(14, 30, 0, 0).to_zoned(TimeZone::UTC)
    }

    #[test]
    fn today_starts_at_local_midnight() -> TestResult {
        let bounds = DateBucket::Today.bounds(&now()?)?;

        assert_eq!(
            bounds.from,
            Some(date(2026, 3, 15).to_zoned(TimeZone::UTC)?.timestamp())
        );
        assert_eq!(bounds.until, None);

        Ok(())
    }

    #[test]
    fn week_and_month_trail_from_now() -> TestResult {
        let now = now()?;

        let week = DateBucket::Week.bounds(&now)?;
        let month = DateBucket::Month.bounds(&now)?;

        assert_eq!(
            week.from,
            Some(date(2026, 3, 8).at(14, 30, 0, 0).to_zoned(TimeZone::UTC)?.timestamp())
        );
        assert_eq!(
            month.from,
            Some(date(2026, 2, 13).at(14, 30, 0, 0).to_zoned(TimeZone::UTC)?.timestamp())
        );

        Ok(())
    }

    #[test]
    fn custom_range_includes_the_end_day() -> TestResult {
        let bounds = DateBucket::Custom {
            start: date(2026, 3, 1),
            end: date(2026, 3, 10),
        }
        .bounds(&now()?)?;

        assert_eq!(
            bounds.from,
            Some(date(2026, 3, 1).to_zoned(TimeZone::UTC)?.timestamp())
        );
        assert_eq!(
            bounds.until,
            Some(date(2026, 3, 11).to_zoned(TimeZone::UTC)?.timestamp())
        );

        Ok(())
    }

    #[test]
    fn reversed_custom_range_is_rejected() -> TestResult {
        let result = DateBucket::Custom {
            start: date(2026, 3, 10),
            end: date(2026, 3, 1),
        }
        .bounds(&now()?);

        assert_eq!(result, Err(ValidationError::InvalidDateRange));

        Ok(())
    }

    #[test]
    fn blank_search_is_ignored() {
        let filter = QuoteFilter {
            search: Some("   ".to_string()),
            ..QuoteFilter::default()
        };

        assert_eq!(filter.search_term(), None);
    }

    #[test]
    fn search_matches_customer_email_and_products() {
        let uuid = QuoteUuid::new();
        let product_uuid = ProductUuid::new();
        let now = Timestamp::now();

        let quote = Quote {
            uuid,
            customer: Customer {
                email: Some("Diego@Example.com".to_string()),
                ..Customer::new("Diego Souza")
            },
            items: vec![QuoteItem {
                uuid: QuoteItemUuid::new(),
                quote_uuid: uuid,
                product_uuid,
                quantity: 1,
                unit_price: Decimal::ONE,
                total_price: Decimal::ONE,
                product: Some(ProductSummary {
                    uuid: product_uuid,
                    name: "Galaxy Watch".to_string(),
                    brand: String::new(),
                    model: String::new(),
                    price: Decimal::ONE,
                }),
            }],
            subtotal: Decimal::ONE,
            discount_amount: Decimal::ZERO,
            discount_percentage: None,
            total: Decimal::ONE,
            status: QuoteStatus::Draft,
            notes: None,
            valid_until: None,
            created_at: now,
            updated_at: now,
        };

        assert!(matches_search(&quote, "souza"));
        assert!(matches_search(&quote, "example.com"));
        assert!(matches_search(&quote, "watch"));
        assert!(!matches_search(&quote, "iphone"));
    }
}
