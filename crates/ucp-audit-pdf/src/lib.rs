//! UCP Audit PDF text extraction
//!
//! Reads a PDF page by page with `lopdf` and joins the text of every page
//! that yields any, in page order. Image-only pages (scans) contribute
//! nothing.
//!
//! # Example
//!
//! ```no_run
//! use ucp_audit_pdf::PdfTextExtractor;
//! use ucp_audit_domain::traits::TextExtractor;
//!
//! # fn example(bytes: &[u8]) -> Result<(), ucp_audit_pdf::PdfError> {
//! let text = PdfTextExtractor::new().extract_text(bytes)?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod extractor;

pub use error::PdfError;
pub use extractor::{PageText, PdfTextExtractor};
