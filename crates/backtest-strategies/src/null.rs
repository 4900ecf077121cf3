//! Strategy that never acts.

use backtest_core::{
    error::StrategyError,
    traits::{StepContext, Strategy},
    types::Action,
};

/// Strategy whose four operations always return `Action::None`.
///
/// Useful as a baseline and to exercise the engine loop on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStrategy;

impl NullStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for NullStrategy {
    fn name(&self) -> &str {
        "null"
    }

    fn description(&self) -> &str {
        "Never signals or trades"
    }

    fn signaler(&mut self, _ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        Ok(Action::None)
    }

    fn entryer(&mut self, _ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        Ok(Action::None)
    }

    fn exiter(&mut self, _ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        Ok(Action::None)
    }

    fn stopper(&mut self, _ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        Ok(Action::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backtest_core::types::{Operation, PositionState};

    #[test]
    fn test_null_strategy() {
        let mut strategy = NullStrategy::new();
        let ctx = StepContext {
            step: 3,
            history: &[1.0, 2.0, 3.0],
            signals: &[],
            position: PositionState::Long,
        };

        for operation in Operation::ALL {
            assert_eq!(strategy.call(operation, &ctx), Ok(Action::None));
        }
    }
}
