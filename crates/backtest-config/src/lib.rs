//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, LoggingConfig, SettingsError};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables prefixed with `BACKTEST__` override file values,
/// e.g. `BACKTEST__LOGGING__LEVEL=debug`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("BACKTEST")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.backtest.engine_config().skip_redundant_orders);
    }

    #[test]
    fn test_parse_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [backtest]
            strategies = ["scripted", "null"]
            skip_redundant_orders = true
            "#,
        )
        .unwrap();

        assert!(config.logging.is_json());
        assert_eq!(config.backtest.strategies, vec!["scripted", "null"]);
        assert_eq!(config.backtest.symbol, "DATA");
        assert!(config.backtest.engine_config().skip_redundant_orders);
        assert_eq!(config.app, AppSettings::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert_eq!(
            config.validate(),
            Err(SettingsError::LogFormat("xml".to_string()))
        );

        let mut config = AppConfig::default();
        config.backtest.strategies.clear();
        assert_eq!(config.validate(), Err(SettingsError::NoStrategy));
    }

    #[test]
    fn test_logging_overrides() {
        let configured = LoggingConfig {
            level: "warn".to_string(),
            format: "json".to_string(),
            file: Some(PathBuf::from("logs/backtest.log")),
        };

        // no flags: file settings apply
        assert_eq!(configured.with_overrides(None, false, None), configured);

        let cli = configured.with_overrides(Some("debug"), false, Some(PathBuf::from("run.log")));
        assert_eq!(cli.level, "debug");
        assert!(cli.is_json());
        assert_eq!(cli.file, Some(PathBuf::from("run.log")));

        let json = LoggingConfig::default().with_overrides(None, true, None);
        assert_eq!(json.level, "info");
        assert!(json.is_json());
        assert_eq!(json.file, None);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_config(Path::new("/nonexistent/backtest.toml")).is_err());
    }
}
