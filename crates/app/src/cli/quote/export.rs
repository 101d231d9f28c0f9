use std::path::PathBuf;

use clap::Args;
use tally_app::config::{CompanyConfig, DatabaseConfig, RendererConfig};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ExportQuoteArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    renderer: RendererConfig,

    #[command(flatten)]
    company: CompanyConfig,

    /// Quote to export
    #[arg(long)]
    quote_uuid: Uuid,

    /// Where to write the PDF; defaults to `orcamento-<id>.pdf`
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) async fn run(args: ExportQuoteArgs) -> Result<(), String> {
    let company = args
        .company
        .profile()
        .map_err(|error| format!("invalid company settings: {error}"))?;

    let ctx = crate::cli::connect(&args.database).await?;

    let exports = ctx.exports(&args.renderer).map_err(|error| error.to_string())?;

    let exported = exports
        .export_quote(args.quote_uuid.into(), &company)
        .await
        .map_err(|error| format!("failed to export quote: {error}"))?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&exported.file_name));

    tokio::fs::write(&path, &exported.pdf)
        .await
        .map_err(|error| format!("failed to write {}: {error}", path.display()))?;

    println!("quote_uuid: {}", args.quote_uuid);
    println!("file: {}", path.display());
    println!("bytes: {}", exported.pdf.len());

    Ok(())
}
