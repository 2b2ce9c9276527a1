//! Page-by-page PDF text extraction

use crate::error::PdfError;
use lopdf::Document;
use tracing::{debug, warn};
use ucp_audit_domain::traits::TextExtractor;

/// Text of a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Extracted text with trailing line breaks removed
    pub text: String,
}

/// PDF text extractor backed by lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of every page that yields any, in page order
    ///
    /// Pages lopdf cannot decode are treated like image-only pages: they are
    /// logged and skipped.
    ///
    /// # Errors
    /// - `PdfError::Format` - the bytes are not a loadable PDF
    pub fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, PdfError> {
        let doc = Document::load_mem(pdf_bytes)?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        debug!("PDF has {} pages", page_numbers.len());

        let mut pages = Vec::new();
        for page_number in page_numbers {
            let raw = match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping page {}: {}", page_number, e);
                    continue;
                }
            };

            let text = raw.trim_end_matches(['\r', '\n']);
            // Whitespace-only counts as empty
            if text.trim().is_empty() {
                debug!("Page {} has no extractable text", page_number);
                continue;
            }

            pages.push(PageText {
                page_number,
                text: text.to_string(),
            });
        }

        Ok(pages)
    }
}

impl TextExtractor for PdfTextExtractor {
    type Error = PdfError;

    fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error> {
        let pages = self.extract_pages(bytes)?;
        Ok(pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
