use clap::Args;
use tally_app::{config::DatabaseConfig, domain::quotes::models::QuoteStatus};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Quote to update
    #[arg(long)]
    quote_uuid: Uuid,

    /// New status (draft, sent, approved, rejected, expired)
    #[arg(long)]
    status: QuoteStatus,
}

pub(crate) async fn run(args: SetStatusArgs) -> Result<(), String> {
    let ctx = crate::cli::connect(&args.database).await?;

    let quote = ctx
        .quotes
        .update_status(args.quote_uuid.into(), args.status)
        .await
        .map_err(|error| format!("failed to update quote status: {error}"))?;

    println!("quote_uuid: {}", quote.uuid);
    println!("status: {}", quote.status);
    println!("updated_at: {}", quote.updated_at);

    Ok(())
}
