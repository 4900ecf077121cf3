//! Run command implementation.

use anyhow::{Context, Result};
use std::sync::Arc;
use backtest_config::AppConfig;
use backtest_data::load_csv;
use backtest_engine::{run_batch, BacktestJob, BacktestReport, CancellationToken};
use backtest_strategies::StrategyRegistry;
use tracing::{error, info, warn};

use crate::cli::{OutputFormat, RunArgs};

pub async fn run(args: RunArgs, config: AppConfig) -> Result<()> {
    let names = if args.strategy.is_empty() {
        config.backtest.strategies.clone()
    } else {
        args.strategy.clone()
    };
    if names.is_empty() {
        anyhow::bail!("No strategy given. Use --strategy <name> (see the 'strategies' command)");
    }

    // Load data
    let symbol = args
        .symbol
        .clone()
        .unwrap_or_else(|| config.backtest.symbol.clone());
    let series = Arc::new(
        load_csv(&args.data, &symbol)
            .with_context(|| format!("Failed to load data from {}", args.data.display()))?,
    );
    info!(symbol = %series.symbol, observations = series.len(), "Loaded series");

    // Create strategies
    let strategy_configs = match &args.strategy_config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<serde_json::Value>(&raw)
                .with_context(|| format!("Invalid strategy config {}", path.display()))?
        }
        None => serde_json::Value::Null,
    };

    let registry = StrategyRegistry::new();
    let mut jobs = Vec::with_capacity(names.len());
    for name in &names {
        let strategy = match strategy_configs.get(name) {
            Some(value) => registry.create(name, value.clone()),
            None => registry.create_default(name),
        }
        .with_context(|| format!("Failed to create strategy '{}'", name))?;
        jobs.push(BacktestJob::new(strategy, Arc::clone(&series)));
    }

    let mut engine_config = config.backtest.engine_config();
    engine_config.skip_redundant_orders |= args.skip_redundant_orders;

    // Ctrl-C stops every run at its next step boundary
    let token = CancellationToken::new();
    let handle = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling backtests");
            handle.cancel();
        }
    });

    let batch_config = engine_config.clone();
    let results =
        tokio::task::spawn_blocking(move || run_batch(jobs, &batch_config, Some(&token)))
            .await
            .context("Backtest worker failed")?;

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0;
    for result in results {
        let status = match result.result {
            Ok(status) => status,
            Err(e) => {
                error!(strategy = %result.strategy, "{}", e);
                failures += 1;
                match e.into_partial_status() {
                    Some(partial) => partial,
                    None => continue,
                }
            }
        };
        reports.push(BacktestReport::new(
            result.strategy,
            &result.series,
            engine_config.clone(),
            status,
        ));
    }

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.summary());
            }
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(save_path, json)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    if failures > 0 {
        anyhow::bail!("{} of {} backtests did not complete", failures, names.len());
    }

    Ok(())
}
