//! Tally application layer: persistence, quote services, document export
//! and configuration for the `tally` binary.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;
