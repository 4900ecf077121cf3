//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "backtest")]
#[command(author, version, about = "Deterministic step-by-step strategy backtester")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", env = "BACKTEST_CONFIG")]
    pub config: PathBuf,

    /// Log level (overrides `[logging] level`)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format (overrides `[logging] format`)
    #[arg(long)]
    pub json_logs: bool,

    /// Also write logs to this file (overrides `[logging] file`)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run strategies over a price series
    Run(RunArgs),
    /// List available strategies
    Strategies,
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Strategies to run (comma-separated); defaults to the configured list
    #[arg(short, long, value_delimiter = ',')]
    pub strategy: Vec<String>,

    /// Price series file (CSV with a date and a close column)
    #[arg(long)]
    pub data: PathBuf,

    /// Symbol to attach to the series
    #[arg(short = 'S', long)]
    pub symbol: Option<String>,

    /// Strategy configuration file (JSON object keyed by strategy name)
    #[arg(long)]
    pub strategy_config: Option<PathBuf>,

    /// Drop entries while positioned and sells while flat
    #[arg(long)]
    pub skip_redundant_orders: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save reports to file (JSON)
    #[arg(long)]
    pub save: Option<PathBuf>,
}
