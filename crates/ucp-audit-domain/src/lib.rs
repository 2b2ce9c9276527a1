//! UCP Audit Domain Layer
//!
//! Core value types shared by every other crate in the workspace: the
//! documents under audit, the discrepancy records produced by the model, and
//! the report built from them.
//!
//! ## Key Concepts
//!
//! - **Document**: a named PDF blob (LC, Invoice, Bill of Lading, Reference)
//!   whose text is extracted once
//! - **DiscrepancyRecord**: one row of the audit, strongly typed
//! - **AuditReport**: the ordered records of one run plus summary counts
//!
//! ## Architecture
//!
//! - No I/O, no network, no global state
//! - Trait definitions for the two external boundaries (text extraction and
//!   the generative model) live in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod record;
pub mod report;
pub mod traits;

// Re-exports for convenience
pub use document::{Document, DocumentKind};
pub use record::{Category, DiscrepancyRecord, Status, NOTHING_TO_COMPARE};
pub use report::{AuditId, AuditReport, AuditSummary, ReportRow, StatusMarker};
