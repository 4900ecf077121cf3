//! Core traits for the backtester.

mod strategy;
mod time_series;

pub use strategy::{StepContext, Strategy, StrategyConfig};
pub use time_series::TimeSeries;
