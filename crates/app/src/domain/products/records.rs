//! Product Records

use jiff::Timestamp;
use smallvec::SmallVec;
use sqlx::{FromRow, Row, sqlite::SqliteRow};
use tally::products::{Product, ProductStatus, ProductUuid};

use crate::domain::columns::{
    try_get_amount, try_get_optional_amount, try_get_optional_timestamp, try_get_parsed,
    try_get_timestamp,
};

/// Product Record
///
/// A catalog product together with its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub product: Product,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl<'r> FromRow<'r, SqliteRow> for ProductRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: Product {
                uuid: ProductUuid::from_uuid(row.try_get("id")?),
                name: row.try_get("name")?,
                brand: row.try_get("brand")?,
                model: row.try_get("model")?,
                price: try_get_amount(row, "price")?,
                promotional_price: try_get_optional_amount(row, "promotional_price")?,
                status: try_get_parsed::<ProductStatus>(row, "status")?,
                colors: SmallVec::new(),
            },
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            deleted_at: try_get_optional_timestamp(row, "deleted_at")?,
        })
    }
}
