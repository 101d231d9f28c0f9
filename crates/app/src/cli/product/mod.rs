use clap::{Args, Subcommand};
use tally_app::domain::products::records::ProductRecord;

mod create;
mod delete;
mod list;
mod set_price;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Add a product to the catalog
    Create(create::CreateProductArgs),
    /// List catalog products
    List(list::ListProductsArgs),
    /// Change the regular or promotional price of a product
    SetPrice(set_price::SetPriceArgs),
    /// Remove a product from the catalog
    Delete(delete::DeleteProductArgs),
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create::run(args).await,
        ProductSubcommand::List(args) => list::run(args).await,
        ProductSubcommand::SetPrice(args) => set_price::run(args).await,
        ProductSubcommand::Delete(args) => delete::run(args).await,
    }
}

fn print_product(record: &ProductRecord) {
    let product = &record.product;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("brand_model: {}", product.brand_model());
    println!("price: {}", product.price);
    println!(
        "promotional_price: {}",
        product
            .promotional_price
            .map_or_else(|| "none".to_string(), |price| price.to_string())
    );
    println!("effective_price: {}", product.effective_price());
    println!("status: {}", product.status);
    println!(
        "colors: {}",
        product
            .colors
            .iter()
            .map(|color| format!("{} ({})", color.name, color.hex))
            .collect::<Vec<_>>()
            .join(", ")
    );
}
