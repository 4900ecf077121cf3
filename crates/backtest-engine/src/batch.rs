//! Independent backtests run in parallel.

use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

use backtest_core::error::BacktestResult;
use backtest_core::traits::Strategy;
use backtest_core::types::{PriceSeries, Status};

use crate::cancel::CancellationToken;
use crate::engine::{Backtest, BacktestConfig};

/// One backtest in a batch. Each job owns its strategy, so no mutable
/// strategy state is ever shared between concurrent runs.
pub struct BacktestJob {
    /// Strategy to drive
    pub strategy: Box<dyn Strategy>,
    /// Series to step through (shareable between jobs)
    pub series: Arc<PriceSeries>,
}

impl BacktestJob {
    pub fn new(strategy: Box<dyn Strategy>, series: Arc<PriceSeries>) -> Self {
        Self { strategy, series }
    }
}

/// Outcome of one job.
#[derive(Debug)]
pub struct BatchResult {
    /// Strategy name
    pub strategy: String,
    /// Series the strategy ran on
    pub series: Arc<PriceSeries>,
    /// Final status or the failure of this job
    pub result: BacktestResult<Status>,
}

/// Run every job on the rayon pool and return the results in job order.
///
/// A failing job does not affect the others.
pub fn run_batch(
    jobs: Vec<BacktestJob>,
    config: &BacktestConfig,
    cancel: Option<&CancellationToken>,
) -> Vec<BatchResult> {
    info!(jobs = jobs.len(), "Running backtest batch");

    jobs.into_par_iter()
        .map(|mut job| {
            let mut builder = Backtest::builder()
                .strategy(&mut *job.strategy)
                .series(&*job.series)
                .config(config.clone());
            if let Some(token) = cancel {
                builder = builder.cancellation(token.clone());
            }

            let result = builder.build().and_then(Backtest::run);
            BatchResult {
                strategy: job.strategy.name().to_string(),
                series: Arc::clone(&job.series),
                result,
            }
        })
        .collect()
}
