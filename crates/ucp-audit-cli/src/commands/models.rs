//! Models command implementation.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the models command.
pub async fn execute_models(config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", render_models(config, formatter)?);
    Ok(())
}

fn render_models(config: &Config, formatter: &Formatter) -> Result<String> {
    let settings = &config.settings;
    match formatter.format() {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "default": settings.model,
            "models": settings.models,
        }))?),
        OutputFormat::Quiet => Ok(settings.models.join("\n")),
        OutputFormat::Table => Ok(formatter.models(&settings.models, &settings.model)),
    }
}
