//! Backtester CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use backtest_config::{load_config, AppConfig};
use backtest_monitor::setup_logging;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so `[logging]` applies
    let config = if cli.config.exists() {
        Some(
            load_config(&cli.config)
                .with_context(|| format!("Failed to load config {}", cli.config.display()))?,
        )
    } else {
        None
    };

    // Setup logging, command line flags win over the config file
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default()
        .with_overrides(
            cli.log_level.map(cli::LogLevel::as_str),
            cli.json_logs,
            cli.log_file.clone(),
        );
    let _log_guard = setup_logging(&logging.level, logging.is_json(), logging.file.as_deref());

    let config = config.unwrap_or_else(|| {
        warn!("Config file {:?} not found, using defaults", cli.config);
        AppConfig::default()
    });

    // Execute command
    match cli.command {
        Commands::Run(args) => cli::commands::run::run(args, config).await,
        Commands::Strategies => cli::commands::strategies::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
