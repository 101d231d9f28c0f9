use clap::{Args, ValueEnum};
use jiff::civil::Date;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tally_app::{
    config::DatabaseConfig,
    domain::quotes::{
        filters::{DateBucket, QuoteFilter, StatusFilter},
        models::QuoteStatus,
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Period {
    Today,
    Week,
    Month,
}

#[derive(Debug, Args)]
pub(crate) struct ListQuotesArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Match customer name, email or product names
    #[arg(long)]
    search: Option<String>,

    /// Only quotes with this status
    #[arg(long)]
    status: Option<QuoteStatus>,

    /// Only quotes created in this period
    #[arg(long, value_enum, conflicts_with_all = ["from", "to"])]
    period: Option<Period>,

    /// First creation day to include (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<Date>,

    /// Last creation day to include (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<Date>,
}

impl ListQuotesArgs {
    fn filter(&self) -> QuoteFilter {
        let date = match (self.period, self.from, self.to) {
            (Some(Period::Today), _, _) => Some(DateBucket::Today),
            (Some(Period::Week), _, _) => Some(DateBucket::Week),
            (Some(Period::Month), _, _) => Some(DateBucket::Month),
            (None, Some(start), Some(end)) => Some(DateBucket::Custom { start, end }),
            _ => None,
        };

        QuoteFilter {
            search: self.search.clone(),
            status: self.status.map_or(StatusFilter::All, StatusFilter::Only),
            date,
        }
    }
}

pub(crate) async fn run(args: ListQuotesArgs) -> Result<(), String> {
    let ctx = crate::cli::connect(&args.database).await?;

    let listing = ctx
        .quotes
        .list_quotes(args.filter())
        .await
        .map_err(|error| format!("failed to list quotes: {error}"))?;

    if listing.quotes.is_empty() {
        println!("no quotes found ({} stored)", listing.total_count);
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["UUID", "Customer", "Items", "Total", "Status", "Created"]);

    for quote in &listing.quotes {
        builder.push_record([
            quote.uuid.to_string(),
            quote.customer.name.clone(),
            quote.item_count().to_string(),
            quote.total.to_string(),
            quote.status.to_string(),
            quote.created_at.strftime("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..4), Alignment::right());

    println!("{table}");
    println!(
        "showing {} of {} quotes",
        listing.filtered_count, listing.total_count
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use jiff::civil::date;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: ListQuotesArgs,
    }

    fn parse(argv: &[&str]) -> Result<ListQuotesArgs, clap::Error> {
        Harness::try_parse_from(std::iter::once("tally").chain(argv.iter().copied()))
            .map(|harness| harness.args)
    }

    #[test]
    fn builds_filter_from_flags() -> Result<(), clap::Error> {
        let args = parse(&[
            "--database-url",
            "sqlite::memory:",
            "--status",
            "sent",
            "--search",
            "ana",
            "--from",
            "2026-01-01",
            "--to",
            "2026-01-31",
        ])?;

        assert_eq!(
            args.filter(),
            QuoteFilter {
                search: Some("ana".to_string()),
                status: StatusFilter::Only(QuoteStatus::Sent),
                date: Some(DateBucket::Custom {
                    start: date(2026, 1, 1),
                    end: date(2026, 1, 31),
                }),
            }
        );

        Ok(())
    }

    #[test]
    fn period_excludes_custom_range() {
        let result = parse(&[
            "--database-url",
            "sqlite::memory:",
            "--period",
            "week",
            "--from",
            "2026-01-01",
            "--to",
            "2026-01-31",
        ]);

        assert!(result.is_err(), "period and range are exclusive");
    }
}
