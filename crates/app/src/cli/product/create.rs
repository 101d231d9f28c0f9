use clap::Args;
use rust_decimal::Decimal;
use tally::products::{ColorVariant, ProductStatus, ProductUuid};
use tally_app::{config::DatabaseConfig, domain::products::data::NewProduct};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Product display name
    #[arg(long)]
    name: String,

    /// Regular price
    #[arg(long)]
    price: Decimal,

    /// Promotional price, charged instead of the regular price when non-zero
    #[arg(long)]
    promotional_price: Option<Decimal>,

    /// Brand
    #[arg(long, default_value = "")]
    brand: String,

    /// Model
    #[arg(long, default_value = "")]
    model: String,

    /// Availability (available, out_of_stock, discontinued)
    #[arg(long, default_value = "available")]
    status: ProductStatus,

    /// Color variant as `name:#hex`; repeat for several
    #[arg(long = "color", value_parser = parse_color)]
    colors: Vec<ColorVariant>,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let ctx = crate::cli::connect(&args.database).await?;

    let uuid = args
        .product_uuid
        .map_or_else(ProductUuid::new, ProductUuid::from);

    let record = ctx
        .products
        .create_product(NewProduct {
            brand: args.brand,
            model: args.model,
            promotional_price: args.promotional_price,
            status: args.status,
            colors: args.colors,
            ..NewProduct::new(uuid, args.name, args.price)
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    super::print_product(&record);

    Ok(())
}

fn parse_color(value: &str) -> Result<ColorVariant, String> {
    let (name, hex) = value
        .split_once(':')
        .ok_or_else(|| format!("expected name:#hex, got {value:?}"))?;

    if name.trim().is_empty() {
        return Err("color name cannot be empty".to_string());
    }

    Ok(ColorVariant::new(name.trim(), hex.trim()))
}
