//! Quote HTML
//!
//! Self-contained markup for a stored quote. Every style is inlined so the
//! renderer needs nothing but the document itself.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tally::money::format_amount;

use crate::domain::{
    documents::company::CompanyProfile,
    quotes::models::{Quote, QuoteItem},
};

const PAGE_STYLE: &str = "font-family: Helvetica, Arial, sans-serif; color: #1f2933; \
     font-size: 12px; margin: 0; padding: 0;";

const CELL_STYLE: &str = "padding: 8px; border-bottom: 1px solid #e4e7eb;";

const HEADER_CELL_STYLE: &str = "padding: 8px; border-bottom: 2px solid #1f2933; \
     text-align: left; font-weight: bold;";

/// Render a quote as a printable HTML document.
///
/// Quote and company text is escaped; amounts are printed in the company
/// currency.
#[must_use]
pub fn render_quote_html(quote: &Quote, company: &CompanyProfile) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n");
    push_line(
        &mut html,
        format_args!("<title>Orçamento {}</title>", quote.uuid),
    );
    html.push_str("</head>\n");
    push_line(&mut html, format_args!("<body style=\"{PAGE_STYLE}\">"));

    push_company(&mut html, company);
    push_heading(&mut html, quote);
    push_customer(&mut html, quote);
    push_items(&mut html, &quote.items, company.currency);
    push_totals(&mut html, quote, company.currency);
    push_notes(&mut html, quote);
    push_signature(&mut html, company);

    html.push_str("</body>\n</html>\n");

    html
}

fn push_line(html: &mut String, args: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    _ = html.write_fmt(args);
    html.push('\n');
}

fn push_company(html: &mut String, company: &CompanyProfile) {
    html.push_str(
        "<header style=\"padding: 24px; border-bottom: 3px solid #1f2933;\">\n",
    );
    push_line(
        html,
        format_args!(
            "<h1 style=\"margin: 0 0 8px 0; font-size: 22px;\">{}</h1>",
            html_escape(&company.name)
        ),
    );

    let details = [
        company.tax_id.as_deref().map(|tax_id| format!("CNPJ: {}", html_escape(tax_id))),
        company.address.as_deref().map(html_escape),
        company.phone.as_deref().map(|phone| format!("Tel: {}", html_escape(phone))),
        company.email.as_deref().map(html_escape),
    ];

    for detail in details.into_iter().flatten() {
        push_line(html, format_args!("<div>{detail}</div>"));
    }

    html.push_str("</header>\n");
}

fn push_heading(html: &mut String, quote: &Quote) {
    html.push_str("<section style=\"padding: 24px 24px 0 24px;\">\n");
    push_line(
        html,
        format_args!(
            "<h2 style=\"margin: 0; font-size: 18px;\">Orçamento nº {}</h2>",
            quote.uuid
        ),
    );
    push_line(
        html,
        format_args!(
            "<div>Emitido em: {}</div>",
            quote.created_at.strftime("%d/%m/%Y")
        ),
    );
    html.push_str("</section>\n");
}

fn push_customer(html: &mut String, quote: &Quote) {
    let customer = &quote.customer;

    html.push_str("<section style=\"padding: 16px 24px;\">\n");
    html.push_str("<h3 style=\"margin: 0 0 8px 0; font-size: 14px;\">Cliente</h3>\n");
    push_line(
        html,
        format_args!("<div><strong>{}</strong></div>", html_escape(&customer.name)),
    );

    for detail in [&customer.email, &customer.phone, &customer.address]
        .into_iter()
        .flatten()
    {
        push_line(html, format_args!("<div>{}</div>", html_escape(detail)));
    }

    html.push_str("</section>\n");
}

fn push_items(html: &mut String, items: &[QuoteItem], currency: &'static Currency) {
    html.push_str(
        "<table style=\"width: calc(100% - 48px); margin: 0 24px; border-collapse: collapse;\">\n",
    );
    html.push_str("<thead>\n<tr>\n");

    for heading in ["Produto", "Marca / Modelo", "Qtd.", "Valor unitário", "Total"] {
        push_line(
            html,
            format_args!("<th style=\"{HEADER_CELL_STYLE}\">{heading}</th>"),
        );
    }

    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for item in items {
        let brand_model = item
            .product
            .as_ref()
            .map(|product| {
                [product.brand.as_str(), product.model.as_str()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" / ")
            })
            .unwrap_or_default();

        html.push_str("<tr>\n");
        push_line(
            html,
            format_args!(
                "<td style=\"{CELL_STYLE}\">{}</td>",
                html_escape(&item.display_name())
            ),
        );
        push_line(
            html,
            format_args!(
                "<td style=\"{CELL_STYLE}\">{}</td>",
                html_escape(&brand_model)
            ),
        );
        push_line(
            html,
            format_args!("<td style=\"{CELL_STYLE}\">{}</td>", item.quantity),
        );
        push_line(
            html,
            format_args!(
                "<td style=\"{CELL_STYLE}\">{}</td>",
                html_escape(&format_amount(item.unit_price, currency))
            ),
        );
        push_line(
            html,
            format_args!(
                "<td style=\"{CELL_STYLE}\">{}</td>",
                html_escape(&format_amount(item.total_price, currency))
            ),
        );
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
}

fn push_totals(html: &mut String, quote: &Quote, currency: &'static Currency) {
    html.push_str("<section style=\"padding: 16px 24px; text-align: right;\">\n");
    push_total_row(html, "Subtotal", quote.subtotal, currency);

    if quote.discount_amount > Decimal::ZERO {
        let label = quote
            .discount_percentage
            .map_or_else(
                || "Desconto".to_string(),
                |percentage| format!("Desconto ({}%)", percentage.normalize()),
            );

        push_total_row(html, &label, -quote.discount_amount, currency);
    }

    push_line(
        html,
        format_args!(
            "<div style=\"font-size: 16px; font-weight: bold; margin-top: 8px;\">Total: {}</div>",
            html_escape(&format_amount(quote.total, currency))
        ),
    );
    html.push_str("</section>\n");
}

fn push_total_row(html: &mut String, label: &str, amount: Decimal, currency: &'static Currency) {
    push_line(
        html,
        format_args!(
            "<div>{}: {}</div>",
            html_escape(label),
            html_escape(&format_amount(amount, currency))
        ),
    );
}

fn push_notes(html: &mut String, quote: &Quote) {
    html.push_str("<section style=\"padding: 0 24px 16px 24px;\">\n");

    if let Some(notes) = quote.notes.as_deref().filter(|notes| !notes.trim().is_empty()) {
        html.push_str("<h3 style=\"margin: 0 0 8px 0; font-size: 14px;\">Observações</h3>\n");
        push_line(
            html,
            format_args!(
                "<p style=\"white-space: pre-wrap; margin: 0 0 8px 0;\">{}</p>",
                html_escape(notes)
            ),
        );
    }

    if let Some(valid_until) = quote.valid_until {
        push_line(
            html,
            format_args!(
                "<div>Válido até: {}</div>",
                valid_until.strftime("%d/%m/%Y")
            ),
        );
    }

    html.push_str("</section>\n");
}

fn push_signature(html: &mut String, company: &CompanyProfile) {
    html.push_str("<footer style=\"padding: 48px 24px 24px 24px; text-align: center;\">\n");
    html.push_str(
        "<div style=\"width: 260px; margin: 0 auto; border-top: 1px solid #1f2933;\"></div>\n",
    );
    push_line(html, format_args!("<div>{}</div>", html_escape(&company.name)));
    html.push_str("</footer>\n");
}

/// Escape text for inclusion in HTML content or attribute values.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use rust_decimal_macros::dec;
    use tally::products::ProductUuid;

    use crate::domain::quotes::models::{
        Customer, ProductSummary, QuoteItemUuid, QuoteStatus, QuoteUuid,
    };

    use super::*;

    fn company() -> CompanyProfile {
        CompanyProfile {
            tax_id: Some("12.345.678/0001-90".to_string()),
            phone: Some("(11) 4000-0000".to_string()),
            ..CompanyProfile::new("Loja & Cia")
        }
    }

    fn quote() -> Quote {
        let uuid = QuoteUuid::new();
        let product_uuid = ProductUuid::new();

        Quote {
            uuid,
            customer: Customer {
                email: Some("ana@example.com".to_string()),
                ..Customer::new("Ana <Lima>")
            },
            items: vec![QuoteItem {
                uuid: QuoteItemUuid::new(),
                quote_uuid: uuid,
                product_uuid,
                quantity: 2,
                unit_price: dec!(49.90),
                total_price: dec!(99.80),
                product: Some(ProductSummary {
                    uuid: product_uuid,
                    name: "Smartwatch \"Pro\"".to_string(),
                    brand: "Acme".to_string(),
                    model: "W1".to_string(),
                    price: dec!(49.90),
                }),
            }],
            subtotal: dec!(99.80),
            discount_amount: Decimal::ZERO,
            discount_percentage: None,
            total: dec!(99.80),
            status: QuoteStatus::Draft,
            notes: None,
            valid_until: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn renders_company_customer_and_lines() {
        let company = company();
        let quote = quote();

        let html = render_quote_html(&quote, &company);

        assert!(html.contains("Loja &amp; Cia"), "company name is escaped");
        assert!(html.contains("12.345.678/0001-90"), "tax id is printed");
        assert!(html.contains("Ana &lt;Lima&gt;"), "customer name is escaped");
        assert!(html.contains("ana@example.com"), "customer email is printed");
        assert!(
            html.contains("Smartwatch &quot;Pro&quot;"),
            "product name is escaped"
        );
        assert!(html.contains("Acme / W1"), "brand and model are printed");
        assert!(
            html.contains(&html_escape(&format_amount(dec!(99.80), company.currency))),
            "line total is printed"
        );
        assert!(html.contains(&quote.uuid.to_string()), "quote id is printed");
        assert!(!html.contains("<Lima>"), "raw customer markup must not leak");
    }

    #[test]
    fn discount_row_only_when_positive() {
        let company = company();
        let mut quote = quote();

        assert!(
            !render_quote_html(&quote, &company).contains("Desconto"),
            "no discount row without a discount"
        );

        quote.discount_amount = dec!(9.98);
        quote.discount_percentage = Some(dec!(10));
        quote.total = dec!(89.82);

        let html = render_quote_html(&quote, &company);

        assert!(html.contains("Desconto (10%)"), "percentage is labelled");
        assert!(
            html.contains(&html_escape(&format_amount(dec!(89.82), company.currency))),
            "discounted total is printed"
        );
    }

    #[test]
    fn notes_and_validity_are_optional() {
        let company = company();
        let mut quote = quote();

        let html = render_quote_html(&quote, &company);

        assert!(!html.contains("Observações"), "no notes heading");
        assert!(!html.contains("Válido até"), "no validity line");

        quote.notes = Some("Entrega em <5> dias".to_string());
        quote.valid_until = Some(date(2026, 4, 14));

        let html = render_quote_html(&quote, &company);

        assert!(html.contains("Entrega em &lt;5&gt; dias"), "notes are escaped");
        assert!(html.contains("Válido até: 14/04/2026"), "validity is formatted");
    }

    #[test]
    fn missing_product_falls_back_to_id() {
        let company = company();
        let mut quote = quote();

        let product_uuid = quote.items.first().map(|item| item.product_uuid);

        for item in &mut quote.items {
            item.product = None;
        }

        let html = render_quote_html(&quote, &company);

        assert!(
            product_uuid.is_some_and(|uuid| html.contains(&uuid.to_string())),
            "line shows the product id"
        );
    }
}
