use clap::Args;
use tally_app::config::DatabaseConfig;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ShowQuoteArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Quote to show
    #[arg(long)]
    quote_uuid: Uuid,
}

pub(crate) async fn run(args: ShowQuoteArgs) -> Result<(), String> {
    let ctx = crate::cli::connect(&args.database).await?;

    let quote = ctx
        .quotes
        .get_quote(args.quote_uuid.into())
        .await
        .map_err(|error| format!("failed to load quote: {error}"))?;

    super::print_quote(&quote);

    Ok(())
}
