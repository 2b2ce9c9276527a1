//! Error types for PDF extraction

use thiserror::Error;

/// Errors that can occur while reading a PDF
#[derive(Error, Debug)]
pub enum PdfError {
    /// The input could not be read as a PDF
    #[error("Not a readable PDF: {0}")]
    Format(String),
}

impl From<lopdf::Error> for PdfError {
    fn from(e: lopdf::Error) -> Self {
        PdfError::Format(e.to_string())
    }
}
