//! PDF renderer client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Serialize;

use crate::domain::documents::errors::RendererError;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Converts an HTML document into PDF bytes.
#[automock]
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Render `html` to a PDF.
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RendererError>;
}

/// Page margins sent with every render request.
#[derive(Debug, Clone, Serialize)]
pub struct PageMargins {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            top: "20mm".to_string(),
            right: "15mm".to_string(),
            bottom: "20mm".to_string(),
            left: "15mm".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    html: &'a str,
    options: RenderOptions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderOptions<'a> {
    format: &'static str,
    print_background: bool,
    margin: &'a PageMargins,
}

/// HTTP client for an HTML-to-PDF rendering service.
#[derive(Debug, Clone)]
pub struct HttpDocumentRenderer {
    url: String,
    margins: PageMargins,
    http: Client,
}

impl HttpDocumentRenderer {
    /// Create a renderer posting to `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RendererError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            margins: PageMargins::default(),
            http,
        })
    }

    /// Replace the page margins.
    #[must_use]
    pub fn with_margins(mut self, margins: PageMargins) -> Self {
        self.margins = margins;
        self
    }
}

#[async_trait]
impl DocumentRenderer for HttpDocumentRenderer {
    #[tracing::instrument(
        name = "documents.renderer.render_pdf",
        skip(self, html),
        fields(html_bytes = html.len()),
        err
    )]
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RendererError> {
        let body = RenderRequest {
            html,
            options: RenderOptions {
                format: "A4",
                print_background: true,
                margin: &self.margins,
            },
        };

        let response = self.http.post(&self.url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(RendererError::UnexpectedResponse(format!(
                "render request failed with status {status}: {text}"
            )));
        }

        let pdf = response.bytes().await?;

        Ok(pdf.to_vec())
    }
}
