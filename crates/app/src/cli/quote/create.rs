use clap::Args;
use jiff::{ToSpan, Zoned, civil::Date};
use rust_decimal::Decimal;
use tally::{cart::Cart, discounts::Discount};
use tally_app::{
    config::{CompanyConfig, DatabaseConfig},
    domain::{
        documents::CompanyProfile,
        quotes::{data::NewQuote, models::Customer},
    },
};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateQuoteArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    company: CompanyConfig,

    /// Customer name
    #[arg(long)]
    customer_name: String,

    /// Customer email
    #[arg(long)]
    customer_email: Option<String>,

    /// Customer phone
    #[arg(long)]
    customer_phone: Option<String>,

    /// Customer address
    #[arg(long)]
    customer_address: Option<String>,

    /// Line as `product-uuid:quantity[:color]`; repeat for several
    #[arg(long = "item", required = true, value_parser = parse_item)]
    items: Vec<ItemArg>,

    /// Absolute discount; ignored when a percentage is given
    #[arg(long)]
    discount_amount: Option<Decimal>,

    /// Discount percentage; defaults to the company default discount
    #[arg(long)]
    discount_percentage: Option<Decimal>,

    /// Free-form notes printed on the quote
    #[arg(long)]
    notes: Option<String>,

    /// Days the quote stays valid
    #[arg(long, default_value_t = 30u16, conflicts_with = "valid_until")]
    valid_days: u16,

    /// Last day the quote is valid (YYYY-MM-DD)
    #[arg(long)]
    valid_until: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemArg {
    product_uuid: Uuid,
    quantity: u32,
    color: Option<String>,
}

pub(crate) async fn run(args: CreateQuoteArgs) -> Result<(), String> {
    let company = args
        .company
        .profile()
        .map_err(|error| format!("invalid company settings: {error}"))?;

    let ctx = crate::cli::connect(&args.database).await?;

    let mut cart = Cart::new();

    for item in args.items {
        let record = ctx
            .products
            .get_product(item.product_uuid.into())
            .await
            .map_err(|error| format!("failed to load product {}: {error}", item.product_uuid))?;

        if let Some(color) = item
            .color
            .as_deref()
            .filter(|color| record.product.color(color).is_none())
        {
            return Err(format!(
                "product {} has no color named {color:?}",
                item.product_uuid
            ));
        }

        cart.add(record.product, item.quantity, item.color);
    }

    let discount = initial_discount(args.discount_amount, args.discount_percentage, &company);

    let valid_until = match args.valid_until {
        Some(date) => date,
        None => Zoned::now()
            .date()
            .checked_add(i32::from(args.valid_days).days())
            .map_err(|error| format!("invalid validity period: {error}"))?,
    };

    let quote = ctx
        .quotes
        .create_quote(NewQuote {
            customer: Customer {
                email: args.customer_email,
                phone: args.customer_phone,
                address: args.customer_address,
                ..Customer::new(args.customer_name)
            },
            notes: args.notes,
            valid_until: Some(valid_until),
            ..NewQuote::from_cart(Customer::default(), &cart, discount)
        })
        .await
        .map_err(|error| format!("failed to create quote: {error}"))?;

    cart.clear();

    info!(quote_uuid = %quote.uuid, "cart converted to quote");

    super::print_quote(&quote);

    Ok(())
}

fn initial_discount(
    amount: Option<Decimal>,
    percentage: Option<Decimal>,
    company: &CompanyProfile,
) -> Discount {
    match (amount, percentage) {
        (None, None) => Discount::from_fields(None, Some(company.default_discount)),
        (amount, percentage) => Discount::from_fields(amount, percentage),
    }
}

fn parse_item(value: &str) -> Result<ItemArg, String> {
    let mut parts = value.splitn(3, ':');

    let product_uuid = parts
        .next()
        .unwrap_or_default()
        .parse::<Uuid>()
        .map_err(|error| format!("invalid product uuid in {value:?}: {error}"))?;

    let quantity = parts
        .next()
        .ok_or_else(|| format!("expected product-uuid:quantity, got {value:?}"))?
        .parse::<u32>()
        .map_err(|error| format!("invalid quantity in {value:?}: {error}"))?;

    if quantity == 0 {
        return Err(format!("quantity must be at least 1 in {value:?}"));
    }

    let color = parts
        .next()
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .map(str::to_string);

    Ok(ItemArg {
        product_uuid,
        quantity,
        color,
    })
}
