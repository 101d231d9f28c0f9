//! Tally Domain Concerns

mod columns;
pub mod documents;
pub mod products;
pub mod quotes;
