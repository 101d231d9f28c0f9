//! Documents
//!
//! Printable quote documents: an HTML rendering of a stored quote and its
//! conversion to PDF through an external renderer.

pub mod company;
pub mod errors;
pub mod html;
pub mod renderer;
pub mod service;

pub use company::CompanyProfile;
pub use errors::{ExportError, RendererError};
pub use renderer::{DocumentRenderer, HttpDocumentRenderer, MockDocumentRenderer};
pub use service::*;
