//! Error types for the CLI application.

use thiserror::Error;
use ucp_audit_engine::AuditError;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The audit pipeline failed
    #[error("{0}")]
    Audit(#[from] AuditError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No API key from flag, environment or config file
    #[error("No Gemini API key. Pass --api-key, set GEMINI_API_KEY, or run 'ucp-audit config set-key <KEY>'.")]
    MissingApiKey,
}

impl CliError {
    /// Raw model response to show next to the error, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            CliError::Audit(e) => e.raw_response(),
            _ => None,
        }
    }
}
