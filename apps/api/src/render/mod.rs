//! PDF Emitter: HTML-to-PDF conversion and delivery of the rendered file.
//!
//! Two engines implement [`PdfRenderer`]:
//! - [`CommandPdfRenderer`]: pipes the HTML through an external converter
//!   (`wkhtmltopdf` by default). Full CSS support.
//! - [`BuiltinPdfRenderer`]: lays the document out as paginated text with
//!   `printpdf`. No external binary; styling is reduced to headings and body text.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Config, PdfEngine};

pub mod builtin;
pub mod command;
pub mod html_text;
pub mod output;

pub use builtin::BuiltinPdfRenderer;
pub use command::CommandPdfRenderer;

/// Leading bytes of every PDF file.
pub const PDF_SIGNATURE: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to start PDF converter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF converter exited with {status}: {stderr}")]
    Converter { status: String, stderr: String },

    #[error("PDF layout failed: {0}")]
    Layout(String),

    #[error("Converter output is not a PDF document")]
    InvalidOutput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Converts a self-contained HTML document into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// Builds the renderer selected by `PDF_ENGINE`.
pub fn renderer_from_config(config: &Config) -> Arc<dyn PdfRenderer> {
    match config.pdf_engine {
        PdfEngine::Wkhtmltopdf => Arc::new(CommandPdfRenderer::wkhtmltopdf(
            config.wkhtmltopdf_path.clone(),
        )),
        PdfEngine::Builtin => Arc::new(BuiltinPdfRenderer),
    }
}

/// Rejects converter output that does not start with the PDF signature.
pub(crate) fn ensure_pdf(bytes: Vec<u8>) -> Result<Vec<u8>, RenderError> {
    if bytes.starts_with(PDF_SIGNATURE) {
        Ok(bytes)
    } else {
        Err(RenderError::InvalidOutput)
    }
}
