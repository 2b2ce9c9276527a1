//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the audit pipeline and its
//! infrastructure. Implementations live in other crates.

/// Trait for turning a document's bytes into plain text
///
/// Implemented by the infrastructure layer (ucp-audit-pdf)
pub trait TextExtractor {
    /// Error type for extraction
    type Error;

    /// Extract the full text of a document
    fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error>;
}

/// Trait for generative model operations
///
/// Implemented by the infrastructure layer (ucp-audit-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a free-text completion
    fn generate(&self, model: &str, prompt: &str) -> Result<String, Self::Error>;

    /// Generate a completion constrained to JSON output
    ///
    /// The constraint is a hint to the provider; callers must still validate
    /// the returned text.
    fn generate_json(&self, model: &str, prompt: &str) -> Result<String, Self::Error>;
}
