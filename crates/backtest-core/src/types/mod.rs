//! Core data types for the backtester.

mod action;
mod series;
mod signal;
mod status;

pub use action::{Action, Operation};
pub use series::PriceSeries;
pub use signal::{Signal, Trade, TradeKind};
pub use status::{Checkpoint, PositionState, Status};
