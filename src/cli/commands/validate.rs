//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use backtest_config::load_config;
use backtest_strategies::StrategyRegistry;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    config.validate()?;

    let registry = StrategyRegistry::new();
    for name in &config.backtest.strategies {
        if !registry.exists(name) {
            anyhow::bail!("Unknown strategy in config: {}", name);
        }
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Strategies: {}", config.backtest.strategies.join(", "));
    println!("Skip redundant orders: {}", config.backtest.skip_redundant_orders);
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
