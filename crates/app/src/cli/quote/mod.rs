use clap::{Args, Subcommand};
use tally_app::domain::quotes::models::Quote;

mod create;
mod delete;
mod edit;
mod export;
mod list;
mod show;
mod status;

#[derive(Debug, Args)]
pub(crate) struct QuoteCommand {
    #[command(subcommand)]
    command: QuoteSubcommand,
}

#[derive(Debug, Subcommand)]
enum QuoteSubcommand {
    /// Create a quote from catalog products
    Create(create::CreateQuoteArgs),
    /// List quotes, newest first
    List(list::ListQuotesArgs),
    /// Show one quote with its lines
    Show(show::ShowQuoteArgs),
    /// Edit customer, lines, discount, notes or validity of a quote
    Edit(edit::EditQuoteArgs),
    /// Change the status of a quote
    Status(status::SetStatusArgs),
    /// Delete a quote and its lines
    Delete(delete::DeleteQuoteArgs),
    /// Render a quote to PDF
    Export(export::ExportQuoteArgs),
}

pub(crate) async fn run(command: QuoteCommand) -> Result<(), String> {
    match command.command {
        QuoteSubcommand::Create(args) => create::run(args).await,
        QuoteSubcommand::List(args) => list::run(args).await,
        QuoteSubcommand::Show(args) => show::run(args).await,
        QuoteSubcommand::Edit(args) => edit::run(args).await,
        QuoteSubcommand::Status(args) => status::run(args).await,
        QuoteSubcommand::Delete(args) => delete::run(args).await,
        QuoteSubcommand::Export(args) => export::run(args).await,
    }
}

fn print_quote(quote: &Quote) {
    let or_none = |value: Option<&str>| value.unwrap_or("none").to_string();

    println!("quote_uuid: {}", quote.uuid);
    println!("status: {}", quote.status);
    println!("customer_name: {}", quote.customer.name);
    println!("customer_email: {}", or_none(quote.customer.email.as_deref()));
    println!("customer_phone: {}", or_none(quote.customer.phone.as_deref()));
    println!(
        "customer_address: {}",
        or_none(quote.customer.address.as_deref())
    );
    println!("subtotal: {}", quote.subtotal);
    println!("discount_amount: {}", quote.discount_amount);
    println!(
        "discount_percentage: {}",
        quote
            .discount_percentage
            .map_or_else(|| "none".to_string(), |percentage| percentage.to_string())
    );
    println!("total: {}", quote.total);
    println!("notes: {}", or_none(quote.notes.as_deref()));
    println!(
        "valid_until: {}",
        quote
            .valid_until
            .map_or_else(|| "none".to_string(), |date| date.to_string())
    );
    println!("created_at: {}", quote.created_at);
    println!("updated_at: {}", quote.updated_at);

    for item in &quote.items {
        println!(
            "item: {} x{} @ {} = {}",
            item.display_name(),
            item.quantity,
            item.unit_price,
            item.total_price
        );
    }
}
