//! Strategy trait definitions.

use crate::error::StrategyError;
use crate::types::{Action, Operation, PositionState, Signal};

/// Read-only view of the run handed to every strategy operation.
///
/// `history` is the strict prefix of the series before the current step, so
/// an operation can never observe the value at `step` or later.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Current step index
    pub step: usize,
    /// Observations strictly before `step`
    pub history: &'a [f64],
    /// Signals emitted so far, including one emitted earlier in this step
    pub signals: &'a [Signal],
    /// Position at the time of the call
    pub position: PositionState,
}

impl<'a> StepContext<'a> {
    /// Most recent signal, if any.
    pub fn last_signal(&self) -> Option<&Signal> {
        self.signals.last()
    }

    /// Signal emitted during the current step, if any.
    pub fn current_signal(&self) -> Option<Action> {
        self.signals
            .last()
            .filter(|s| s.step == self.step)
            .map(|s| s.action)
    }

    /// Most recent observation visible at this step.
    pub fn last_value(&self) -> Option<f64> {
        self.history.last().copied()
    }
}

/// Configuration trait for strategies.
pub trait StrategyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), StrategyError>;
}

/// Core strategy trait.
///
/// A strategy is a signal function plus three trade functions. The entryer
/// enters the market based on the signals, the exiter leaves it based on
/// signals or fixed rules, and the stopper cuts losses. The engine calls
/// them once per step in that order.
///
/// Returning `Ok(Action::None)` means "no action". Any `Err` aborts the run.
pub trait Strategy: Send {
    /// Get the unique name of this strategy.
    fn name(&self) -> &str;

    /// Emit an advisory signal: `Long`, `Short`, `Sell` or `None`.
    fn signaler(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError>;

    /// Open a position: `Long`, `Short` or `None`.
    fn entryer(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError>;

    /// Close the position on signals or rules: `Sell` or `None`.
    fn exiter(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError>;

    /// Force-close the position to cut losses: `Sell` or `None`.
    ///
    /// Called on every step, whatever the exiter returned.
    fn stopper(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError>;

    /// Reset internal state.
    ///
    /// Called by the engine before every run.
    fn reset(&mut self) {}

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }

    /// Dispatch to the operation named by `operation`.
    fn call(
        &mut self,
        operation: Operation,
        ctx: &StepContext<'_>,
    ) -> Result<Action, StrategyError> {
        match operation {
            Operation::Signaler => self.signaler(ctx),
            Operation::Entryer => self.entryer(ctx),
            Operation::Exiter => self.exiter(ctx),
            Operation::Stopper => self.stopper(ctx),
        }
    }
}
