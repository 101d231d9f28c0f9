//! Tally
//!
//! Tally is the pricing core of a retail quoting system: a session cart,
//! a pure pricing engine and document-level discounts.

pub mod cart;
pub mod discounts;
pub mod money;
pub mod pricing;
pub mod products;
pub mod uuids;
