//! Renderer Config

use std::time::Duration;

use clap::Args;

use crate::domain::documents::renderer::PageMargins;

/// PDF renderer settings.
#[derive(Debug, Clone, Args)]
pub struct RendererConfig {
    /// Endpoint that converts HTML to PDF
    #[arg(long, env = "RENDERER_URL", default_value = "http://localhost:3000/pdf")]
    pub renderer_url: String,

    /// Seconds to wait for a rendered document
    #[arg(long, env = "RENDERER_TIMEOUT_SECONDS", default_value_t = 30u64)]
    pub renderer_timeout_seconds: u64,

    /// Top page margin (CSS length)
    #[arg(long, env = "RENDERER_MARGIN_TOP", default_value = "20mm")]
    pub renderer_margin_top: String,

    /// Right page margin (CSS length)
    #[arg(long, env = "RENDERER_MARGIN_RIGHT", default_value = "15mm")]
    pub renderer_margin_right: String,

    /// Bottom page margin (CSS length)
    #[arg(long, env = "RENDERER_MARGIN_BOTTOM", default_value = "20mm")]
    pub renderer_margin_bottom: String,

    /// Left page margin (CSS length)
    #[arg(long, env = "RENDERER_MARGIN_LEFT", default_value = "15mm")]
    pub renderer_margin_left: String,
}

impl RendererConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.renderer_timeout_seconds)
    }

    /// Page margins sent with every render request.
    #[must_use]
    pub fn margins(&self) -> PageMargins {
        PageMargins {
            top: self.renderer_margin_top.clone(),
            right: self.renderer_margin_right.clone(),
            bottom: self.renderer_margin_bottom.clone(),
            left: self.renderer_margin_left.clone(),
        }
    }
}
