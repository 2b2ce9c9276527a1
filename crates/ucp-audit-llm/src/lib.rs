//! UCP Audit LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `ucp-audit-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Generative Language API
//!
//! # Examples
//!
//! ```
//! use ucp_audit_llm::MockProvider;
//! use ucp_audit_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("[]");
//! let result = provider.generate_json("gemini-2.5-flash", "audit these").unwrap();
//! assert_eq!(result, "[]");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use ucp_audit_domain::traits::LlmProvider as LlmProviderTrait;

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// API key rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns a pre-configured response without making any network calls.
///
/// # Examples
///
/// ```
/// use ucp_audit_llm::MockProvider;
/// use ucp_audit_domain::traits::LlmProvider;
///
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("m", "any prompt").unwrap(), "Fixed response");
///
/// let call = provider.last_call().unwrap();
/// assert_eq!(call.prompt, "any prompt");
/// assert!(!call.json);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    response: String,
    fail_all: Option<String>,
    call_count: Arc<Mutex<usize>>,
    last_call: Arc<Mutex<Option<MockCall>>>,
}

/// A call recorded by [`MockProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// Model identifier passed by the caller
    pub model: String,
    /// Prompt text
    pub prompt: String,
    /// Whether JSON output was requested (`generate_json`)
    pub json: bool,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail_all: None,
            call_count: Arc::new(Mutex::new(0)),
            last_call: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a MockProvider that fails every call with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_all: Some(message.into()),
            ..Self::default()
        }
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// The most recent call
    pub fn last_call(&self) -> Option<MockCall> {
        lock(&self.last_call).clone()
    }

    fn respond(&self, model: &str, prompt: &str, json: bool) -> Result<String, LlmError> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_call) = Some(MockCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            json,
        });

        match &self.fail_all {
            Some(message) => Err(LlmError::Other(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, model: &str, prompt: &str) -> Result<String, Self::Error> {
        self.respond(model, prompt, false)
    }

    fn generate_json(&self, model: &str, prompt: &str) -> Result<String, Self::Error> {
        self.respond(model, prompt, true)
    }
}

// A poisoned lock only means another test thread panicked mid-call
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_json("gemini-2.5-flash", "any prompt");
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("m", "prompt1").unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate_json("m", "prompt2").unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_mock_provider_records_last_call() {
        let provider = MockProvider::new("[]");
        assert!(provider.last_call().is_none());

        provider.generate_json("gemini-2.5-pro", "compare LC and BL").unwrap();
        assert_eq!(
            provider.last_call(),
            Some(MockCall {
                model: "gemini-2.5-pro".to_string(),
                prompt: "compare LC and BL".to_string(),
                json: true,
            })
        );
    }

    #[test]
    fn test_mock_provider_distinguishes_plain_calls() {
        let provider = MockProvider::new("text");

        provider.generate("m", "hello").unwrap();
        assert!(!provider.last_call().unwrap().json);

        provider.generate_json("m", "hello").unwrap();
        assert!(provider.last_call().unwrap().json);
    }

    #[test]
    fn test_mock_provider_failing() {
        let provider = MockProvider::failing("quota exhausted");
        let err = provider.generate_json("m", "anything").unwrap_err();
        assert_eq!(err.to_string(), "LLM error: quota exhausted");
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("m", "test").unwrap();

        // Both should share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
