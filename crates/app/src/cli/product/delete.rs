use clap::Args;
use tally_app::config::DatabaseConfig;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct DeleteProductArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Product to remove
    #[arg(long)]
    product_uuid: Uuid,
}

pub(crate) async fn run(args: DeleteProductArgs) -> Result<(), String> {
    let ctx = crate::cli::connect(&args.database).await?;

    ctx.products
        .delete_product(args.product_uuid.into())
        .await
        .map_err(|error| format!("failed to delete product: {error}"))?;

    println!("product_uuid: {}", args.product_uuid);
    println!("deleted: true");

    Ok(())
}
