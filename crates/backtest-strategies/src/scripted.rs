//! Scripted strategy.
//!
//! Replays a fixed schedule of actions keyed by step. Used for fixtures and
//! for driving the engine from a JSON description without any market logic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use backtest_core::{
    error::StrategyError,
    traits::{StepContext, Strategy, StrategyConfig},
    types::{Action, Operation},
};

/// Configuration for the scripted strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedConfig {
    /// Signaler output by step
    pub signals: BTreeMap<usize, Action>,
    /// Entryer output by step
    pub entries: BTreeMap<usize, Action>,
    /// Exiter output by step
    pub exits: BTreeMap<usize, Action>,
    /// Stopper output by step
    pub stops: BTreeMap<usize, Action>,
    /// Enter when flat on a same-step `Long`/`Short` signal
    pub enter_on_signal: bool,
    /// Exit when positioned on a same-step `Sell` signal
    pub exit_on_signal: bool,
}

impl ScriptedConfig {
    fn schedule(&self, operation: Operation) -> &BTreeMap<usize, Action> {
        match operation {
            Operation::Signaler => &self.signals,
            Operation::Entryer => &self.entries,
            Operation::Exiter => &self.exits,
            Operation::Stopper => &self.stops,
        }
    }
}

impl StrategyConfig for ScriptedConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        for operation in Operation::ALL {
            for (step, action) in self.schedule(operation) {
                if !operation.permits(*action) {
                    return Err(StrategyError::InvalidConfig(format!(
                        "{} cannot return '{}' (step {})",
                        operation, action, step
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Strategy that replays a [`ScriptedConfig`].
#[derive(Debug, Clone)]
pub struct ScriptedStrategy {
    config: ScriptedConfig,
}

impl ScriptedStrategy {
    /// Create a scripted strategy from a validated configuration.
    pub fn new(config: ScriptedConfig) -> Result<Self, StrategyError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a scripted strategy without validating the schedule.
    ///
    /// Out-of-contract actions are returned as scripted and left for the
    /// engine to reject.
    pub fn unchecked(config: ScriptedConfig) -> Self {
        Self { config }
    }

    fn scripted(&self, operation: Operation, step: usize) -> Action {
        self.config
            .schedule(operation)
            .get(&step)
            .copied()
            .unwrap_or_default()
    }
}

impl Strategy for ScriptedStrategy {
    fn name(&self) -> &str {
        "scripted"
    }

    fn description(&self) -> &str {
        "Replays a fixed step-by-step schedule of actions"
    }

    fn signaler(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        Ok(self.scripted(Operation::Signaler, ctx.step))
    }

    fn entryer(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        let scripted = self.scripted(Operation::Entryer, ctx.step);
        if !scripted.is_none() || !self.config.enter_on_signal || ctx.position.is_open() {
            return Ok(scripted);
        }
        Ok(ctx
            .current_signal()
            .filter(Action::is_entry)
            .unwrap_or_default())
    }

    fn exiter(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        let scripted = self.scripted(Operation::Exiter, ctx.step);
        if !scripted.is_none() || !self.config.exit_on_signal || ctx.position.is_flat() {
            return Ok(scripted);
        }
        Ok(match ctx.current_signal() {
            Some(Action::Sell) => Action::Sell,
            _ => Action::None,
        })
    }

    fn stopper(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        Ok(self.scripted(Operation::Stopper, ctx.step))
    }
}
