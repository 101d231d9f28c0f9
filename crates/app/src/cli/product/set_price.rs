use clap::Args;
use rust_decimal::Decimal;
use tally_app::{config::DatabaseConfig, domain::products::data::ProductUpdate};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct SetPriceArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Product to update
    #[arg(long)]
    product_uuid: Uuid,

    /// New regular price
    #[arg(long)]
    price: Option<Decimal>,

    /// New promotional price
    #[arg(long, conflicts_with = "clear_promotion")]
    promotional_price: Option<Decimal>,

    /// Remove the promotional price
    #[arg(long)]
    clear_promotion: bool,
}

pub(crate) async fn run(args: SetPriceArgs) -> Result<(), String> {
    let promotional_price = if args.clear_promotion {
        Some(None)
    } else {
        args.promotional_price.map(Some)
    };

    if args.price.is_none() && promotional_price.is_none() {
        return Err(
            "nothing to update: pass --price, --promotional-price or --clear-promotion"
                .to_string(),
        );
    }

    let ctx = crate::cli::connect(&args.database).await?;

    let record = ctx
        .products
        .update_product(
            args.product_uuid.into(),
            ProductUpdate {
                price: args.price,
                promotional_price,
                ..ProductUpdate::default()
            },
        )
        .await
        .map_err(|error| format!("failed to update product: {error}"))?;

    super::print_product(&record);

    Ok(())
}
