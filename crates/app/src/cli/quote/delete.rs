use clap::Args;
use tally_app::config::DatabaseConfig;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct DeleteQuoteArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Quote to delete
    #[arg(long)]
    quote_uuid: Uuid,
}

pub(crate) async fn run(args: DeleteQuoteArgs) -> Result<(), String> {
    let ctx = crate::cli::connect(&args.database).await?;

    ctx.quotes
        .delete_quote(args.quote_uuid.into())
        .await
        .map_err(|error| format!("failed to delete quote: {error}"))?;

    println!("quote_uuid: {}", args.quote_uuid);
    println!("deleted: true");

    Ok(())
}
