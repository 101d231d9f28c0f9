use clap::Args;
use jiff::civil::Date;
use rust_decimal::Decimal;
use tally::{discounts::Discount, pricing::LineEntry};
use tally_app::{
    config::DatabaseConfig,
    domain::quotes::{data::QuoteUpdate, models::Customer},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct EditQuoteArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Quote to edit
    #[arg(long)]
    quote_uuid: Uuid,

    /// New customer name
    #[arg(long)]
    customer_name: Option<String>,

    /// New customer email
    #[arg(long)]
    customer_email: Option<String>,

    /// New customer phone
    #[arg(long)]
    customer_phone: Option<String>,

    /// New customer address
    #[arg(long)]
    customer_address: Option<String>,

    /// Replacement line as `product-uuid:quantity[:unit_price]`; repeat for
    /// several. Any item replaces every stored line.
    #[arg(long = "item", value_parser = parse_item)]
    items: Vec<EditItemArg>,

    /// Absolute discount; ignored when a percentage is given
    #[arg(long)]
    discount_amount: Option<Decimal>,

    /// Discount percentage
    #[arg(long)]
    discount_percentage: Option<Decimal>,

    /// Replacement notes
    #[arg(long)]
    notes: Option<String>,

    /// Last day the quote is valid (YYYY-MM-DD)
    #[arg(long)]
    valid_until: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditItemArg {
    product_uuid: Uuid,
    quantity: u32,
    unit_price: Option<Decimal>,
}

pub(crate) async fn run(args: EditQuoteArgs) -> Result<(), String> {
    let ctx = crate::cli::connect(&args.database).await?;

    let customer = if args.customer_name.is_some()
        || args.customer_email.is_some()
        || args.customer_phone.is_some()
        || args.customer_address.is_some()
    {
        let current = ctx
            .quotes
            .get_quote(args.quote_uuid.into())
            .await
            .map_err(|error| format!("failed to load quote: {error}"))?
            .customer;

        Some(Customer {
            name: args.customer_name.unwrap_or(current.name),
            email: args.customer_email.or(current.email),
            phone: args.customer_phone.or(current.phone),
            address: args.customer_address.or(current.address),
        })
    } else {
        None
    };

    let lines = if args.items.is_empty() {
        None
    } else {
        let mut lines = Vec::with_capacity(args.items.len());

        for item in args.items {
            let record = ctx
                .products
                .get_product(item.product_uuid.into())
                .await
                .map_err(|error| {
                    format!("failed to load product {}: {error}", item.product_uuid)
                })?;

            lines.push(LineEntry {
                unit_price_override: item.unit_price,
                ..LineEntry::from_product(&record.product, item.quantity)
            });
        }

        Some(lines)
    };

    let discount = (args.discount_amount.is_some() || args.discount_percentage.is_some())
        .then(|| Discount::from_fields(args.discount_amount, args.discount_percentage));

    let quote = ctx
        .quotes
        .update_quote(
            args.quote_uuid.into(),
            QuoteUpdate {
                customer,
                lines,
                discount,
                notes: args.notes.map(Some),
                valid_until: args.valid_until.map(Some),
            },
        )
        .await
        .map_err(|error| format!("failed to update quote: {error}"))?;

    super::print_quote(&quote);

    Ok(())
}

fn parse_item(value: &str) -> Result<EditItemArg, String> {
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

    let unit_price = parts
        .next()
        .map(|price| {
            price
                .trim()
                .parse::<Decimal>()
                .map_err(|error| format!("invalid unit price in {value:?}: {error}"))
        })
        .transpose()?;

    if unit_price.is_some_and(|price| price.is_sign_negative()) {
        return Err(format!("unit price cannot be negative in {value:?}"));
    }

    Ok(EditItemArg {
        product_uuid,
        quantity,
        unit_price,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_item_with_and_without_unit_price() -> TestResult {
        let uuid = Uuid::now_v7();

        assert_eq!(
            parse_item(&format!("{uuid}:2"))?,
            EditItemArg {
                product_uuid: uuid,
                quantity: 2,
                unit_price: None,
            }
        );
        assert_eq!(
            parse_item(&format!("{uuid}:3:49.90"))?,
            EditItemArg {
                product_uuid: uuid,
                quantity: 3,
                unit_price: Some(dec!(49.90)),
            }
        );

        Ok(())
    }

    #[test]
    fn rejects_malformed_edit_items() {
        let uuid = Uuid::now_v7();

        assert!(parse_item("nope:1").is_err(), "uuid must parse");
        assert!(parse_item(&format!("{uuid}:0")).is_err(), "zero quantity");
        assert!(
            parse_item(&format!("{uuid}:1:cheap")).is_err(),
            "unit price must be a decimal"
        );
        assert!(
            parse_item(&format!("{uuid}:1:-5")).is_err(),
            "unit price cannot be negative"
        );
    }
}
