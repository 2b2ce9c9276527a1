//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use ucp_audit_engine::{AuditConfig, DEFAULT_MODELS};
use ucp_audit_llm::GeminiProvider;

/// CLI configuration, stored at `~/.ucp-audit/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Saved Gemini API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// UCP 600 rulebook PDF attached to every audit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_path: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Default model
    #[serde(default = "default_model")]
    pub model: String,

    /// Models offered for selection
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Truncate each document's text to this many characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_document_chars: Option<usize>,

    /// Gemini API base URL, if not the public endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// HTTP timeout for a model call in seconds; 0 waits indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".ucp-audit").join("config.toml"))
    }

    /// Resolve the configuration path, preferring an explicit override.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or the defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Pick the API key: flag or `GEMINI_API_KEY` first, then the saved key.
    pub fn resolve_api_key(&self, from_cli: Option<&str>) -> Result<String> {
        from_cli
            .into_iter()
            .chain(self.api_key.as_deref())
            .map(str::trim)
            .find(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(CliError::MissingApiKey)
    }

    /// Change the default model; it must be in the configured list.
    pub fn set_model(&mut self, model: &str) -> Result<()> {
        if !self.settings.models.iter().any(|m| m == model) {
            return Err(CliError::InvalidInput(format!(
                "Unknown model '{}'. Available: {}",
                model,
                self.settings.models.join(", ")
            )));
        }
        self.settings.model = model.to_string();
        Ok(())
    }

    /// Engine configuration for one audit, optionally overriding the model.
    pub fn audit_config(&self, model: Option<&str>) -> Result<AuditConfig> {
        let config = AuditConfig {
            model: model.unwrap_or(&self.settings.model).to_string(),
            allowed_models: self.settings.models.clone(),
            max_document_chars: self.settings.max_document_chars,
        };
        config.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Gemini provider for `api_key`, honouring the endpoint and timeout settings.
    pub fn provider(&self, api_key: impl Into<String>) -> GeminiProvider {
        let mut provider = GeminiProvider::new(api_key);
        if let Some(endpoint) = &self.settings.endpoint {
            provider = provider.with_endpoint(endpoint.as_str());
        }
        match self.settings.timeout_secs {
            Some(0) => provider.with_timeout(None),
            Some(secs) => provider.with_timeout(Some(Duration::from_secs(secs))),
            None => provider,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            models: default_models(),
            max_document_chars: None,
            endpoint: None,
            timeout_secs: None,
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODELS[0].to_string()
}

fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
