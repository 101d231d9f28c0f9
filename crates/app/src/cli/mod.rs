use clap::{Parser, Subcommand};
use tally_app::{
    config::{DatabaseConfig, LoggingConfig},
    context::AppContext,
};

mod db;
mod product;
mod quote;

#[derive(Debug, Parser)]
#[command(name = "tally", about = "Tally quoting CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Product(product::ProductCommand),
    Quote(quote::QuoteCommand),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Quote(command) => quote::run(command).await,
        }
    }
}

pub(crate) async fn connect(config: &DatabaseConfig) -> Result<AppContext, String> {
    AppContext::from_config(config)
        .await
        .map_err(|error| error.to_string())
}
