//! Products Repository

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sqlx::{Sqlite, Transaction, query, query_as};
use tally::products::{ColorVariant, Product, ProductUuid};
use uuid::Uuid;

use crate::domain::{
    columns::{encode_amount, encode_optional_amount, encode_timestamp},
    products::{data::NewProduct, records::ProductRecord},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const LIST_PRODUCT_COLORS_SQL: &str = include_str!("sql/list_product_colors.sql");
const GET_PRODUCT_COLORS_SQL: &str = include_str!("sql/get_product_colors.sql");
const CREATE_PRODUCT_COLOR_SQL: &str = include_str!("sql/create_product_color.sql");
const DELETE_PRODUCT_COLORS_SQL: &str = include_str!("sql/delete_product_colors.sql");

type ColorRow = (Uuid, String, String);

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlProductsRepository;

impl SqlProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let mut records = query_as::<Sqlite, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        let color_rows = query_as::<Sqlite, ColorRow>(LIST_PRODUCT_COLORS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        let mut colors: FxHashMap<ProductUuid, SmallVec<[ColorVariant; 4]>> =
            FxHashMap::default();

        for (product_id, name, hex) in color_rows {
            colors
                .entry(ProductUuid::from_uuid(product_id))
                .or_default()
                .push(ColorVariant { name, hex });
        }

        for record in &mut records {
            if let Some(product_colors) = colors.remove(&record.product.uuid) {
                record.product.colors = product_colors;
            }
        }

        Ok(records)
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut record = query_as::<Sqlite, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        record.product.colors = self.get_product_colors(tx, product).await?;

        Ok(record)
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: &NewProduct,
        now: Timestamp,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut record = query_as::<Sqlite, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.brand)
            .bind(&product.model)
            .bind(encode_amount(product.price)?)
            .bind(encode_optional_amount(product.promotional_price)?)
            .bind(product.status.as_str())
            .bind(encode_timestamp(now))
            .fetch_one(&mut **tx)
            .await?;

        self.create_product_colors(tx, product.uuid, &product.colors)
            .await?;

        record.product.colors = product.colors.iter().cloned().collect();

        Ok(record)
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: &Product,
        now: Timestamp,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut record = query_as::<Sqlite, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.brand)
            .bind(&product.model)
            .bind(encode_amount(product.price)?)
            .bind(encode_optional_amount(product.promotional_price)?)
            .bind(product.status.as_str())
            .bind(encode_timestamp(now))
            .fetch_one(&mut **tx)
            .await?;

        query(DELETE_PRODUCT_COLORS_SQL)
            .bind(product.uuid.into_uuid())
            .execute(&mut **tx)
            .await?;

        self.create_product_colors(tx, product.uuid, &product.colors)
            .await?;

        record.product.colors.clone_from(&product.colors);

        Ok(record)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductUuid,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(encode_timestamp(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn get_product_colors(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductUuid,
    ) -> Result<SmallVec<[ColorVariant; 4]>, sqlx::Error> {
        let rows = query_as::<Sqlite, ColorRow>(GET_PRODUCT_COLORS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(_, name, hex)| ColorVariant { name, hex })
            .collect())
    }

    async fn create_product_colors(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductUuid,
        colors: &[ColorVariant],
    ) -> Result<(), sqlx::Error> {
        for (position, color) in (0_i64..).zip(colors) {
            query(CREATE_PRODUCT_COLOR_SQL)
                .bind(product.into_uuid())
                .bind(position)
                .bind(&color.name)
                .bind(&color.hex)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}
