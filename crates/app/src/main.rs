//! Tally CLI

use std::process::ExitCode;

use clap::Parser;
use tally_app::{config, observability};

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    config::load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = observability::init_logging(cli.logging()) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
