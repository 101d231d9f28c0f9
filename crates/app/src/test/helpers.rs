//! Test Helpers

use rust_decimal::Decimal;
use tally::{
    cart::Cart,
    discounts::Discount,
    products::{Product, ProductUuid},
};

use crate::{
    domain::{
        products::{ProductsService, ProductsServiceError, data::NewProduct},
        quotes::{
            QuotesService, QuotesServiceError,
            data::NewQuote,
            models::{Customer, Quote},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
) -> Result<Product, ProductsServiceError> {
    let record = ctx
        .products
        .create_product(NewProduct::new(ProductUuid::new(), name, price))
        .await?;

    Ok(record.product)
}

pub(crate) fn cart_of(lines: &[(&Product, u32)]) -> Cart {
    let mut cart = Cart::new();

    for (product, quantity) in lines {
        cart.add((*product).clone(), *quantity, None);
    }

    cart
}

pub(crate) async fn create_quote(
    ctx: &TestContext,
    customer: &str,
    lines: &[(&Product, u32)],
    discount: Discount,
) -> Result<Quote, QuotesServiceError> {
    ctx.quotes
        .create_quote(NewQuote::from_cart(
            Customer::new(customer),
            &cart_of(lines),
            discount,
        ))
        .await
}
