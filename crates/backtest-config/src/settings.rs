//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use backtest_engine::BacktestConfig;

/// Invalid setting detected after loading.
#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("Unknown log level: {0}")]
    LogLevel(String),

    #[error("Unknown log format: {0} (expected 'pretty' or 'json')")]
    LogFormat(String),

    #[error("No strategy configured")]
    NoStrategy,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
}

impl AppConfig {
    /// Check values the type system cannot.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.logging.validate()?;
        if self.backtest.strategies.is_empty() {
            return Err(SettingsError::NoStrategy);
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "backtest".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Also write logs to this file
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), SettingsError> {
        match self.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(SettingsError::LogLevel(other.to_string())),
        }
        match self.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(SettingsError::LogFormat(other.to_string())),
        }
    }

    /// Check if JSON output is requested.
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }

    /// Apply command line flags on top of the file settings.
    ///
    /// `level` and `file` replace the configured values when given; `json`
    /// can only switch JSON output on.
    pub fn with_overrides(
        &self,
        level: Option<&str>,
        json: bool,
        file: Option<PathBuf>,
    ) -> LoggingConfig {
        LoggingConfig {
            level: level.map_or_else(|| self.level.clone(), str::to_string),
            format: if json { "json".to_string() } else { self.format.clone() },
            file: file.or_else(|| self.file.clone()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Backtest settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BacktestSettings {
    /// Strategies run when none are given on the command line
    pub strategies: Vec<String>,
    /// Symbol attached to loaded series
    pub symbol: String,
    /// Drop entries while positioned and sells while flat
    pub skip_redundant_orders: bool,
}

impl BacktestSettings {
    /// Engine configuration for these settings.
    pub fn engine_config(&self) -> BacktestConfig {
        BacktestConfig {
            skip_redundant_orders: self.skip_redundant_orders,
        }
    }
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            strategies: vec!["null".to_string()],
            symbol: "DATA".to_string(),
            skip_redundant_orders: false,
        }
    }
}
