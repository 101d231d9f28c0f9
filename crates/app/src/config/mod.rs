//! Configuration
//!
//! Settings are read from command line flags with environment fallbacks.
//! Binaries flatten the groups they need into their own arguments.

use thiserror::Error;

mod company;
mod db;
mod logging;
mod renderer;

pub use company::CompanyConfig;
pub use db::DatabaseConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use renderer::RendererConfig;

/// Load a `.env` file from the working directory, if present.
pub fn load_dotenv() {
    _ = dotenvy::dotenv();
}

/// Errors raised while turning settings into runtime values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured currency is not an ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}
