//! Company Config

use clap::Args;
use rust_decimal::Decimal;
use rusty_money::iso;

use crate::{config::ConfigError, domain::documents::CompanyProfile};

/// Issuer details printed on exported quotes.
#[derive(Debug, Clone, Args)]
pub struct CompanyConfig {
    /// Company display name
    #[arg(long, env = "COMPANY_NAME", default_value = "Tally")]
    pub company_name: String,

    /// Company tax id (CNPJ)
    #[arg(long, env = "COMPANY_TAX_ID")]
    pub company_tax_id: Option<String>,

    /// Company postal address
    #[arg(long, env = "COMPANY_ADDRESS")]
    pub company_address: Option<String>,

    /// Company phone number
    #[arg(long, env = "COMPANY_PHONE")]
    pub company_phone: Option<String>,

    /// Company contact email
    #[arg(long, env = "COMPANY_EMAIL")]
    pub company_email: Option<String>,

    /// Discount percentage suggested for new quotes
    #[arg(long, env = "COMPANY_DEFAULT_DISCOUNT", default_value = "0")]
    pub company_default_discount: Decimal,

    /// ISO 4217 currency code amounts are printed in
    #[arg(long, env = "CURRENCY", default_value = "BRL")]
    pub currency: String,
}

impl CompanyConfig {
    /// Build the profile printed on documents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] when the currency code is not
    /// recognised.
    pub fn profile(&self) -> Result<CompanyProfile, ConfigError> {
        let code = self.currency.trim().to_uppercase();

        let currency =
            iso::find(&code).ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))?;

        Ok(CompanyProfile {
            name: self.company_name.clone(),
            tax_id: self.company_tax_id.clone(),
            address: self.company_address.clone(),
            phone: self.company_phone.clone(),
            email: self.company_email.clone(),
            default_discount: self.company_default_discount,
            currency,
        })
    }
}
