//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::{Path, PathBuf};

/// Execute the config command.
///
/// Changes are written back to `path` immediately.
pub async fn execute_config(
    args: ConfigArgs,
    config: &mut Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", show_config(config, path));
            Ok(())
        }
        ConfigAction::SetKey { key } => set_key(config, path, key, formatter),
        ConfigAction::ClearKey => clear_key(config, path, formatter),
        ConfigAction::SetModel { model } => set_model(config, path, &model, formatter),
        ConfigAction::SetReference { path: reference } => {
            set_reference(config, path, reference, formatter)
        }
    }
}

/// Render the configuration, masking the API key.
fn show_config(config: &Config, path: &Path) -> String {
    let mut lines = vec![
        format!("Config file: {}", path.display()),
        format!(
            "API key: {}",
            config.api_key.as_deref().map(mask_key).unwrap_or_else(|| "(not set)".to_string())
        ),
        format!(
            "Reference: {}",
            config
                .reference_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        ),
        format!("Model: {}", config.settings.model),
        format!("Models: {}", config.settings.models.join(", ")),
    ];
    if let Some(limit) = config.settings.max_document_chars {
        lines.push(format!("Max document chars: {}", limit));
    }
    if let Some(endpoint) = &config.settings.endpoint {
        lines.push(format!("Endpoint: {}", endpoint));
    }
    if let Some(secs) = config.settings.timeout_secs {
        lines.push(format!("Timeout: {}s", secs));
    }
    lines.push(format!("Format: {:?}", config.settings.format));
    lines.push(format!("Color: {}", config.settings.color));
    lines.join("\n")
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn set_key(config: &mut Config, path: &Path, key: String, formatter: &Formatter) -> Result<()> {
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(crate::error::CliError::InvalidInput(
            "API key must not be empty".to_string(),
        ));
    }
    config.api_key = Some(key);
    config.save_to(path)?;
    println!("{}", formatter.success("API key saved"));
    Ok(())
}

fn clear_key(config: &mut Config, path: &Path, formatter: &Formatter) -> Result<()> {
    if config.api_key.take().is_some() {
        config.save_to(path)?;
        println!("{}", formatter.success("API key removed"));
    } else {
        println!("{}", formatter.warning("No API key was saved"));
    }
    Ok(())
}

fn set_model(config: &mut Config, path: &Path, model: &str, formatter: &Formatter) -> Result<()> {
    config.set_model(model)?;
    config.save_to(path)?;
    println!(
        "{}",
        formatter.success(&format!("Default model set to '{}'", model))
    );
    Ok(())
}

fn set_reference(
    config: &mut Config,
    path: &Path,
    reference: Option<PathBuf>,
    formatter: &Formatter,
) -> Result<()> {
    match reference {
        Some(reference) => {
            if !reference.exists() {
                println!(
                    "{}",
                    formatter.warning(&format!("{} does not exist yet", reference.display()))
                );
            }
            println!(
                "{}",
                formatter.success(&format!("Reference set to {}", reference.display()))
            );
            config.reference_path = Some(reference);
        }
        None => {
            config.reference_path = None;
            println!("{}", formatter.success("Reference cleared"));
        }
    }
    config.save_to(path)
}
