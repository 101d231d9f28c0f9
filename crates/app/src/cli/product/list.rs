use clap::Args;
use tabled::{builder::Builder, settings::Style};
use tally_app::config::DatabaseConfig;

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let ctx = crate::cli::connect(&args.database).await?;

    let products = ctx
        .products
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["UUID", "Name", "Brand / Model", "Price", "Effective", "Status"]);

    for record in &products {
        let product = &record.product;

        builder.push_record([
            product.uuid.to_string(),
            product.name.clone(),
            product.brand_model(),
            product.price.to_string(),
            product.effective_price().to_string(),
            product.status.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    println!("{table}");

    Ok(())
}
