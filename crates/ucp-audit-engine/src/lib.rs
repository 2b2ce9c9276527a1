//! UCP 600 Audit Engine
//!
//! Compares a Letter of Credit against its Invoice and Bill of Lading by
//! handing the extracted texts to a generative model and parsing the
//! structured verdict it returns.
//!
//! # Architecture
//!
//! ```text
//! PDFs → TextExtractor → PromptBuilder → LlmProvider → parser → AuditReport
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use ucp_audit_engine::{AuditConfig, AuditRequest, PdfAuditor};
//! use ucp_audit_domain::{Document, DocumentKind};
//! use ucp_audit_llm::MockProvider;
//! use ucp_audit_pdf::PdfTextExtractor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let auditor: PdfAuditor<_> = PdfAuditor::new(
//!     MockProvider::new("[]"),
//!     PdfTextExtractor::new(),
//!     AuditConfig::default(),
//! );
//!
//! let request = AuditRequest::new(
//!     Document::new(DocumentKind::LetterOfCredit, "lc.pdf", std::fs::read("lc.pdf")?),
//!     Document::new(DocumentKind::Invoice, "invoice.pdf", std::fs::read("invoice.pdf")?),
//!     Document::new(DocumentKind::BillOfLading, "bl.pdf", std::fs::read("bl.pdf")?),
//! );
//!
//! let report = auditor.audit(request).await?;
//! println!("{} checks, {} discrepancies", report.total_checks(), report.discrepancy_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod auditor;
mod config;
mod error;
mod parser;
mod prompt;
mod types;


pub use auditor::Auditor;
pub use config::{AuditConfig, DEFAULT_MODELS};
pub use error::AuditError;
pub use parser::parse_model_response;
pub use prompt::PromptBuilder;
pub use types::{AuditRequest, DocumentTexts};

/// Auditor reading PDF documents
pub type PdfAuditor<L> = Auditor<L, ucp_audit_pdf::PdfTextExtractor>;

/// Result type for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
