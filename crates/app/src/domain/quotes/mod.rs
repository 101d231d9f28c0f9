//! Quotes
//!
//! Persisted, priced documents built from a cart. Line prices are frozen when
//! a quote is created and only change when the caller replaces the lines.

pub mod data;
pub mod errors;
pub mod filters;
pub mod models;
mod records;
mod repositories;
pub mod service;

pub use errors::{QuotesServiceError, ValidationError};
pub use service::*;
