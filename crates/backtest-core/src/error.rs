//! Error types for the backtester.

use thiserror::Error;

use crate::types::{Action, Operation, Status};

/// Top-level backtest error.
///
/// Run failures carry the partial `Status` accumulated before the failure.
/// The partial status always covers complete steps only: anything recorded
/// during the failing step is discarded, so `partial.step` is the index of
/// the step that did not complete.
#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Strategy {operation} failed at step {step}: {cause}")]
    StrategyExecution {
        step: usize,
        operation: Operation,
        cause: StrategyError,
        partial: Box<Status>,
    },

    #[error("Backtest cancelled at step {}", .partial.step)]
    Cancelled { partial: Box<Status> },
}

impl BacktestError {
    /// Partial status of an aborted run, if any.
    pub fn partial_status(&self) -> Option<&Status> {
        match self {
            BacktestError::StrategyExecution { partial, .. }
            | BacktestError::Cancelled { partial } => Some(partial),
            _ => None,
        }
    }

    /// Take the partial status out of an aborted run.
    pub fn into_partial_status(self) -> Option<Status> {
        match self {
            BacktestError::StrategyExecution { partial, .. }
            | BacktestError::Cancelled { partial } => Some(*partial),
            _ => None,
        }
    }
}

/// Strategy-specific errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("Invalid action '{action}' returned by {operation}")]
    InvalidAction { operation: Operation, action: Action },

    #[error("Strategy panicked: {0}")]
    Panicked(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Strategy not found: {0}")]
    NotFound(String),

    #[error("Strategy error: {0}")]
    Internal(String),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for backtest runs.
pub type BacktestResult<T> = Result<T, BacktestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_message() {
        let err = BacktestError::StrategyExecution {
            step: 7,
            operation: Operation::Exiter,
            cause: StrategyError::InvalidAction {
                operation: Operation::Exiter,
                action: Action::Long,
            },
            partial: Box::new(Status::new()),
        };
        let msg = err.to_string();
        assert!(msg.contains("exiter"));
        assert!(msg.contains("step 7"));
        assert!(msg.contains("'long'"));
        assert!(err.partial_status().is_some());
    }
}
