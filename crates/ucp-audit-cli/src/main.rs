//! UCP Audit CLI - audit trade-finance documents against UCP 600.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use ucp_audit_cli::commands;
use ucp_audit_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        if let Some(raw) = e.raw_response() {
            eprintln!("Raw response:\n{}", raw);
        }
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default = if verbose { "ucp_audit=debug" } else { "ucp_audit=info" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default)?,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

async fn run(cli: Cli) -> ucp_audit_cli::Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Audit(args) => commands::execute_audit(args, &config, &formatter).await,
        Command::Models => commands::execute_models(&config, &formatter).await,
        Command::Config(args) => {
            commands::execute_config(args, &mut config, &config_path, &formatter).await
        }
    }
}
