//! List strategies command.

use anyhow::Result;
use backtest_strategies::StrategyRegistry;

pub async fn run() -> Result<()> {
    let registry = StrategyRegistry::new();

    println!("Available Strategies");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in registry.list() {
        println!("  {} ", info.name);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        if !info.default_config.is_null() {
            println!("  Default config: {}", info.default_config);
        }
        println!();
    }

    println!("Use --strategy <name> to select a strategy.");

    Ok(())
}
