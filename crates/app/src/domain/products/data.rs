//! Products Data

use rust_decimal::Decimal;
use tally::products::{ColorVariant, Product, ProductStatus, ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    pub promotional_price: Option<Decimal>,
    pub status: ProductStatus,
    pub colors: Vec<ColorVariant>,
}

impl NewProduct {
    /// Available product with no promotion, brand, model or colors.
    pub fn new(uuid: ProductUuid, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            uuid,
            name: name.into(),
            brand: String::new(),
            model: String::new(),
            price,
            promotional_price: None,
            status: ProductStatus::Available,
            colors: Vec::new(),
        }
    }
}

/// Product Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub promotional_price: Option<Option<Decimal>>,
    pub status: Option<ProductStatus>,
    pub colors: Option<Vec<ColorVariant>>,
}

impl ProductUpdate {
    /// Apply the update to a product snapshot.
    pub(crate) fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }

        if let Some(price) = self.price {
            product.price = price;
        }

        if let Some(promotional_price) = self.promotional_price {
            product.promotional_price = promotional_price;
        }

        if let Some(status) = self.status {
            product.status = status;
        }

        if let Some(colors) = self.colors {
            product.colors = colors.into_iter().collect();
        }
    }
}
