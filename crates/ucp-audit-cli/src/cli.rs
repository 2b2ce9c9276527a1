//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// UCP Audit - Check a Letter of Credit against its Invoice and Bill of Lading under UCP 600.
#[derive(Debug, Parser)]
#[command(name = "ucp-audit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table with summary metrics (default)
    Table,
    /// JSON array of records
    Json,
    /// Quiet format (`<total> <discrepancies>`)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Audit an LC, Invoice and Bill of Lading
    Audit(AuditArgs),

    /// List available models
    Models,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the audit command.
#[derive(Debug, Parser)]
pub struct AuditArgs {
    /// Letter of Credit PDF
    #[arg(long)]
    pub lc: Option<PathBuf>,

    /// Commercial invoice PDF
    #[arg(long)]
    pub invoice: Option<PathBuf>,

    /// Bill of Lading PDF
    #[arg(long)]
    pub bl: Option<PathBuf>,

    /// UCP 600 rulebook PDF (overrides the configured reference)
    #[arg(long, conflicts_with = "no_reference")]
    pub reference: Option<PathBuf>,

    /// Audit without any reference rulebook
    #[arg(long)]
    pub no_reference: bool,

    /// Model to use (must be in the configured list)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Print the raw model response after the report
    #[arg(long)]
    pub show_raw: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,

    /// Save an API key
    SetKey {
        /// Gemini API key
        key: String,
    },

    /// Remove the saved API key
    ClearKey,

    /// Set the default model
    SetModel {
        /// Model identifier
        model: String,
    },

    /// Set or clear the reference rulebook
    SetReference {
        /// Path to the UCP 600 PDF; omit to clear
        path: Option<PathBuf>,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
