//! Company profile printed on exported documents.

use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};

/// Issuer details shown in the document header.
#[derive(Debug, Clone)]
pub struct CompanyProfile {
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    /// Percentage suggested for new quotes.
    pub default_discount: Decimal,

    /// Currency amounts are printed in.
    pub currency: &'static Currency,
}

impl CompanyProfile {
    /// Profile with only a name, printing amounts in Brazilian reais.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tax_id: None,
            address: None,
            phone: None,
            email: None,
            default_discount: Decimal::ZERO,
            currency: iso::BRL,
        }
    }
}
