//! Core types and traits for the backtester.
//!
//! This crate provides the foundational building blocks including:
//! - Action tokens, signal and trade records
//! - The rolling run `Status` and position state
//! - The four-operation `Strategy` contract
//! - The `TimeSeries` source abstraction

pub mod types;
pub mod traits;
pub mod error;

pub use error::{BacktestError, BacktestResult, DataError, StrategyError};
pub use types::*;
pub use traits::*;
