//! Document export errors.

use thiserror::Error;

use crate::domain::quotes::QuotesServiceError;

/// Errors that can occur when talking to the PDF renderer.
#[derive(Debug, Error)]
pub enum RendererError {
    /// An HTTP transport, timeout or body error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The renderer returned a non-2xx response.
    #[error("unexpected response from renderer: {0}")]
    UnexpectedResponse(String),
}

/// Errors that can occur when exporting a quote.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The quote could not be loaded.
    #[error(transparent)]
    Quote(#[from] QuotesServiceError),

    /// The renderer failed; the quote is left untouched.
    #[error("failed to render document: {0}")]
    RenderFailed(String),
}

impl From<RendererError> for ExportError {
    fn from(error: RendererError) -> Self {
        ExportError::RenderFailed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_errors_become_render_failed_with_message() {
        let error = ExportError::from(RendererError::UnexpectedResponse(
            "render request failed with status 502 Bad Gateway: upstream".to_string(),
        ));

        assert!(
            matches!(&error, ExportError::RenderFailed(message) if message.contains("502")),
            "expected RenderFailed carrying the status, got {error:?}"
        );
    }
}
