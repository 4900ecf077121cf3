//! Backtesting engine.
//!
//! Drives a [`Strategy`](backtest_core::Strategy) across a time series one
//! step at a time and records every signal and trade it emits.

mod batch;
mod cancel;
mod engine;
mod report;
mod statistics;

pub use batch::{run_batch, BacktestJob, BatchResult};
pub use cancel::CancellationToken;
pub use engine::{Backtest, BacktestBuilder, BacktestConfig};
pub use report::BacktestReport;
pub use statistics::{RoundTrip, TradeStats};
