//! Quote export service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    documents::{
        company::CompanyProfile, errors::ExportError, html::render_quote_html,
        renderer::DocumentRenderer,
    },
    quotes::{
        QuotesService,
        models::{Quote, QuoteUuid},
    },
};

/// A rendered quote ready to be saved or sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedQuote {
    pub file_name: String,
    pub pdf: Vec<u8>,
}

/// File name used for an exported quote.
#[must_use]
pub fn export_file_name(quote: &Quote) -> String {
    format!("orcamento-{}.pdf", quote.uuid)
}

/// Loads quotes and turns them into PDF documents.
#[derive(Clone)]
pub struct ExportService {
    quotes: Arc<dyn QuotesService>,
    renderer: Arc<dyn DocumentRenderer>,
}

impl std::fmt::Debug for ExportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportService").finish_non_exhaustive()
    }
}

impl ExportService {
    #[must_use]
    pub fn new(quotes: Arc<dyn QuotesService>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self { quotes, renderer }
    }

    /// Render a stored quote to PDF.
    ///
    /// The quote is only read; a failed render leaves it as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Quote`] when the quote cannot be loaded and
    /// [`ExportError::RenderFailed`] when the renderer fails.
    #[tracing::instrument(
        name = "documents.service.export_quote",
        skip(self, company),
        fields(quote_uuid = %quote),
        err
    )]
    pub async fn export_quote(
        &self,
        quote: QuoteUuid,
        company: &CompanyProfile,
    ) -> Result<ExportedQuote, ExportError> {
        let quote = self.quotes.get_quote(quote).await?;

        let html = render_quote_html(&quote, company);

        let pdf = self.renderer.render_pdf(&html).await.map_err(|error| {
            warn!(quote_uuid = %quote.uuid, %error, "renderer failed");

            ExportError::from(error)
        })?;

        info!(quote_uuid = %quote.uuid, pdf_bytes = pdf.len(), "exported quote");

        Ok(ExportedQuote {
            file_name: export_file_name(&quote),
            pdf,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::domain::{
        documents::{errors::RendererError, renderer::MockDocumentRenderer},
        quotes::{
            MockQuotesService, QuotesServiceError,
            models::{Customer, QuoteStatus},
        },
    };

    use super::*;

    fn stored_quote(uuid: QuoteUuid) -> Quote {
        Quote {
            uuid,
            customer: Customer::new("Paula"),
            items: Vec::new(),
            subtotal: dec!(10),
            discount_amount: dec!(0),
            discount_percentage: None,
            total: dec!(10),
            status: QuoteStatus::Sent,
            notes: None,
            valid_until: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn service(quotes: MockQuotesService, renderer: MockDocumentRenderer) -> ExportService {
        ExportService::new(Arc::new(quotes), Arc::new(renderer))
    }

    #[test]
    fn file_name_uses_quote_id() {
        let uuid = QuoteUuid::new();

        assert_eq!(
            export_file_name(&stored_quote(uuid)),
            format!("orcamento-{uuid}.pdf")
        );
    }

    #[tokio::test]
    async fn export_renders_the_stored_quote() -> TestResult {
        let uuid = QuoteUuid::new();

        let mut quotes = MockQuotesService::new();

        quotes
            .expect_get_quote()
            .with(eq(uuid))
            .times(1)
            .return_once(move |_| Ok(stored_quote(uuid)));

        let mut renderer = MockDocumentRenderer::new();

        renderer
            .expect_render_pdf()
            .withf(|html| html.contains("Paula") && html.contains("Loja"))
            .times(1)
            .return_once(|_| Ok(b"%PDF".to_vec()));

        let exported = service(quotes, renderer)
            .export_quote(uuid, &CompanyProfile::new("Loja"))
            .await?;

        assert_eq!(exported.pdf, b"%PDF".to_vec());
        assert_eq!(exported.file_name, format!("orcamento-{uuid}.pdf"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_quote_skips_the_renderer() {
        let mut quotes = MockQuotesService::new();

        quotes
            .expect_get_quote()
            .return_once(|_| Err(QuotesServiceError::NotFound));

        let mut renderer = MockDocumentRenderer::new();

        renderer.expect_render_pdf().never();

        let result = service(quotes, renderer)
            .export_quote(QuoteUuid::new(), &CompanyProfile::new("Loja"))
            .await;

        assert!(
            matches!(result, Err(ExportError::Quote(QuotesServiceError::NotFound))),
            "expected Quote(NotFound), got {result:?}"
        );
    }

    #[tokio::test]
    async fn renderer_failure_becomes_render_failed() {
        let uuid = QuoteUuid::new();

        let mut quotes = MockQuotesService::new();

        quotes
            .expect_get_quote()
            .return_once(move |_| Ok(stored_quote(uuid)));

        let mut renderer = MockDocumentRenderer::new();

        renderer.expect_render_pdf().return_once(|_| {
            Err(RendererError::UnexpectedResponse(
                "render request failed with status 500 Internal Server Error: boom".to_string(),
            ))
        });

        let result = service(quotes, renderer)
            .export_quote(uuid, &CompanyProfile::new("Loja"))
            .await;

        assert!(
            matches!(&result, Err(ExportError::RenderFailed(message)) if message.contains("boom")),
            "expected RenderFailed, got {result:?}"
        );
    }
}
