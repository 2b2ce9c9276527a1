//! Gemini Provider Implementation
//!
//! Talks to the Google Generative Language REST API (`generateContent`).
//!
//! # Features
//!
//! - JSON-constrained output via `responseMimeType`
//! - Configurable endpoint and HTTP timeout
//! - One request per call: no retry, no streaming
//!
//! # Examples
//!
//! ```no_run
//! use ucp_audit_llm::GeminiProvider;
//! use ucp_audit_domain::traits::LlmProvider;
//!
//! let provider = GeminiProvider::new("my-api-key");
//! let json = provider.generate_json("gemini-2.5-flash", "Return []").unwrap();
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use ucp_audit_domain::traits::LlmProvider as LlmProviderTrait;

/// Default Generative Language API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default HTTP timeout for a generation request (5 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

const JSON_MIME_TYPE: &str = "application/json";

/// Gemini API provider
///
/// The blocking HTTP client is built per call, inside whatever thread runs
/// the call; callers in an async context must use `spawn_blocking`.
#[derive(Clone)]
pub struct GeminiProvider {
    endpoint: String,
    api_key: String,
    timeout: Option<Duration>,
}

/// Request body for `models/{model}:generateContent`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

/// Response from `generateContent`
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a provider for the default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    /// Use a different API endpoint (e.g. a proxy)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the HTTP timeout; `None` waits indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL for a model's `generateContent` method
    fn url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }

    /// Send one `generateContent` request and return the response text unmodified
    ///
    /// # Errors
    ///
    /// - `Communication` - transport failure or unexpected HTTP status
    /// - `Authentication` - the key was rejected (401/403)
    /// - `ModelNotAvailable` - unknown model (404)
    /// - `RateLimitExceeded` - quota or rate limit hit (429)
    /// - `InvalidResponse` - the body carried no candidate text
    pub fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        mime_type: Option<&str>,
    ) -> Result<String, LlmError> {
        let body = build_request(prompt, mime_type);

        debug!("Calling Gemini model '{}' ({} prompt chars)", model, prompt.len());

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        let response = client
            .post(self.url(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error = error_for_status(status.as_u16(), model, &text);
            warn!("Gemini call failed: {}", error);
            return Err(error);
        }

        let content = parse_response(&text)?;
        debug!("Gemini returned {} chars", content.len());
        Ok(content)
    }
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, model: &str, prompt: &str) -> Result<String, Self::Error> {
        self.generate_content(model, prompt, None)
    }

    fn generate_json(&self, model: &str, prompt: &str) -> Result<String, Self::Error> {
        self.generate_content(model, prompt, Some(JSON_MIME_TYPE))
    }
}

fn build_request<'a>(prompt: &'a str, mime_type: Option<&'a str>) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: mime_type.map(|m| GenerationConfig {
            response_mime_type: m,
        }),
    }
}

/// Concatenate the text parts of the first candidate
fn parse_response(body: &str) -> Result<String, LlmError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response has no candidates".to_string()))?;

    let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
    if texts.is_empty() {
        return Err(LlmError::InvalidResponse("Candidate has no text".to_string()));
    }

    Ok(texts.concat())
}

fn error_for_status(status: u16, model: &str, body: &str) -> LlmError {
    match status {
        401 | 403 => LlmError::Authentication(format!("HTTP {}: {}", status, body)),
        404 => LlmError::ModelNotAvailable(model.to_string()),
        429 => LlmError::RateLimitExceeded(format!("HTTP {}: {}", status, body)),
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}
