//! Error types for the audit pipeline

use thiserror::Error;
use ucp_audit_domain::DocumentKind;

/// Errors that can end an audit run
///
/// None of these are retried; every one aborts the run.
#[derive(Error, Debug)]
pub enum AuditError {
    /// A document could not be read as a PDF
    #[error("Could not read {document}: {message}")]
    Format {
        /// Which document failed
        document: DocumentKind,
        /// Underlying extractor message
        message: String,
    },

    /// The model call failed (network, auth, quota, bad request)
    #[error("Model provider error: {0}")]
    Provider(String),

    /// The model's response was not a JSON array of discrepancy records
    #[error("Could not parse model response: {reason}")]
    Parse {
        /// What was wrong with the response
        reason: String,
        /// The response exactly as received
        raw_response: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuditError {
    /// Raw model response, when the failure was a parse error
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AuditError::Parse { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    pub(crate) fn parse(reason: impl Into<String>, raw_response: &str) -> Self {
        AuditError::Parse {
            reason: reason.into(),
            raw_response: raw_response.to_string(),
        }
    }
}
