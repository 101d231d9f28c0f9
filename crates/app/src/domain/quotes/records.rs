//! Quote row decoding.

use sqlx::{FromRow, Row, sqlite::SqliteRow};
use tally::products::ProductUuid;

use crate::domain::{
    columns::{
        try_get_amount, try_get_optional_amount, try_get_optional_date, try_get_optional_decimal,
        try_get_parsed, try_get_timestamp,
    },
    quotes::models::{
        Customer, ProductSummary, Quote, QuoteItem, QuoteItemUuid, QuoteStatus, QuoteUuid,
    },
};

impl<'r> FromRow<'r, SqliteRow> for Quote {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: QuoteUuid::from_uuid(row.try_get("id")?),
            customer: Customer {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
                address: row.try_get("customer_address")?,
            },
            items: Vec::new(),
            subtotal: try_get_amount(row, "subtotal")?,
            discount_amount: try_get_amount(row, "discount_amount")?,
            discount_percentage: try_get_optional_decimal(row, "discount_percentage")?,
            total: try_get_amount(row, "total")?,
            status: try_get_parsed::<QuoteStatus>(row, "status")?,
            notes: row.try_get("notes")?,
            valid_until: try_get_optional_date(row, "valid_until")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for QuoteItem {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let quantity: i64 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        let product_uuid = ProductUuid::from_uuid(row.try_get("product_id")?);

        let product_name: Option<String> = row.try_get("product_name")?;
        let product_price = try_get_optional_amount(row, "product_price")?;

        let product = match (product_name, product_price) {
            (Some(name), Some(price)) => Some(ProductSummary {
                uuid: product_uuid,
                name,
                brand: row.try_get("product_brand")?,
                model: row.try_get("product_model")?,
                price,
            }),
            _ => None,
        };

        Ok(Self {
            uuid: QuoteItemUuid::from_uuid(row.try_get("id")?),
            quote_uuid: QuoteUuid::from_uuid(row.try_get("quote_id")?),
            product_uuid,
            quantity,
            unit_price: try_get_amount(row, "unit_price")?,
            total_price: try_get_amount(row, "total_price")?,
            product,
        })
    }
}
