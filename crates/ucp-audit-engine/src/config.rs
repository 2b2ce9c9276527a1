//! Configuration for the Auditor

use serde::{Deserialize, Serialize};

/// Models offered when no list is configured
pub const DEFAULT_MODELS: [&str; 3] = ["gemini-2.5-flash", "gemini-2.5-pro", "gemini-2.0-flash"];

/// Configuration passed explicitly into the audit pipeline
///
/// The pipeline reads nothing from the environment; everything it needs
/// arrives through this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Model identifier sent to the provider
    pub model: String,

    /// Models a caller may select from
    #[serde(default = "default_models")]
    pub allowed_models: Vec<String>,

    /// Truncate each extracted document to this many characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_document_chars: Option<usize>,
}

impl AuditConfig {
    /// Default configuration using `model`
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.allowed_models.is_empty() {
            return Err("allowed_models must list at least one model".to_string());
        }
        if !self.allowed_models.iter().any(|m| m == &self.model) {
            return Err(format!(
                "model '{}' is not one of: {}",
                self.model,
                self.allowed_models.join(", ")
            ));
        }
        if self.max_document_chars == Some(0) {
            return Err("max_document_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODELS[0].to_string(),
            allowed_models: default_models(),
            max_document_chars: None,
        }
    }
}

fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
}
