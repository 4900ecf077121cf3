//! Backtesting engine.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

use backtest_core::error::{BacktestError, BacktestResult, StrategyError};
use backtest_core::traits::{StepContext, Strategy, TimeSeries};
use backtest_core::types::{Action, Operation, Signal, Status, Trade, TradeKind};

use crate::cancel::CancellationToken;

/// Backtest configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Drop entries while a position is open and sells while flat
    /// instead of recording them
    #[serde(default)]
    pub skip_redundant_orders: bool,
}

/// Builder for [`Backtest`].
#[derive(Default)]
pub struct BacktestBuilder<'a> {
    strategy: Option<&'a mut dyn Strategy>,
    series: Option<&'a dyn TimeSeries>,
    config: BacktestConfig,
    cancel: Option<CancellationToken>,
}

impl<'a> BacktestBuilder<'a> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strategy to drive. Required.
    pub fn strategy(mut self, strategy: &'a mut dyn Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Series to step through. Required.
    pub fn series(mut self, series: &'a dyn TimeSeries) -> Self {
        self.series = Some(series);
        self
    }

    /// Engine configuration.
    pub fn config(mut self, config: BacktestConfig) -> Self {
        self.config = config;
        self
    }

    /// Token checked once per step.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Build the engine.
    pub fn build(self) -> BacktestResult<Backtest<'a>> {
        let strategy = self
            .strategy
            .ok_or_else(|| BacktestError::Configuration("No strategy supplied".into()))?;
        let series = self
            .series
            .ok_or_else(|| BacktestError::Configuration("No time series supplied".into()))?;

        Ok(Backtest {
            strategy,
            series,
            config: self.config,
            cancel: self.cancel,
            status: Status::new(),
        })
    }
}

/// A strategy bound to a time series and a fresh rolling status.
///
/// [`Backtest::run`] consumes the engine, so every run starts from an empty
/// status and a log can never be appended to twice.
pub struct Backtest<'a> {
    strategy: &'a mut dyn Strategy,
    series: &'a dyn TimeSeries,
    config: BacktestConfig,
    cancel: Option<CancellationToken>,
    status: Status,
}

impl<'a> Backtest<'a> {
    /// Create an engine with the default configuration.
    pub fn new(strategy: &'a mut dyn Strategy, series: &'a dyn TimeSeries) -> Self {
        Self {
            strategy,
            series,
            config: BacktestConfig::default(),
            cancel: None,
            status: Status::new(),
        }
    }

    /// Start building an engine.
    pub fn builder() -> BacktestBuilder<'a> {
        BacktestBuilder::new()
    }

    /// Run the backtest to completion.
    ///
    /// An empty series is not an error and yields an empty status. On a
    /// strategy failure or cancellation the error carries the status of the
    /// steps that completed.
    pub fn run(mut self) -> BacktestResult<Status> {
        let steps = self.series.len();
        self.strategy.reset();

        info!(
            strategy = self.strategy.name(),
            steps,
            skip_redundant = self.config.skip_redundant_orders,
            "Starting backtest"
        );

        for step in 0..steps {
            if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                warn!(step, "Backtest cancelled");
                return Err(BacktestError::Cancelled {
                    partial: Box::new(self.status),
                });
            }

            let checkpoint = self.status.checkpoint();
            if let Err((operation, cause)) = self.process_step(step) {
                self.status.rollback(checkpoint);
                warn!(step, %operation, error = %cause, "Strategy failed, aborting backtest");
                return Err(BacktestError::StrategyExecution {
                    step,
                    operation,
                    cause,
                    partial: Box::new(self.status),
                });
            }

            self.status.step = step + 1;
        }

        info!(
            strategy = self.strategy.name(),
            steps = self.status.step,
            signals = self.status.signals.len(),
            trades = self.status.trades.len(),
            "Backtest complete"
        );

        Ok(self.status)
    }

    /// Call the four operations in order for one step.
    fn process_step(&mut self, step: usize) -> Result<(), (Operation, StrategyError)> {
        let series = self.series;
        let history = series.prefix(step);

        for operation in Operation::ALL {
            let action = self
                .evaluate(operation, step, history)
                .map_err(|e| (operation, e))?;

            if !action.is_none() {
                self.record(operation, action, step);
            }
        }

        Ok(())
    }

    /// Call one operation, turning panics and out-of-contract actions into
    /// errors.
    fn evaluate(
        &mut self,
        operation: Operation,
        step: usize,
        history: &[f64],
    ) -> Result<Action, StrategyError> {
        let ctx = StepContext {
            step,
            history,
            signals: &self.status.signals,
            position: self.status.position,
        };
        let strategy = &mut *self.strategy;

        let action = panic::catch_unwind(AssertUnwindSafe(|| strategy.call(operation, &ctx)))
            .map_err(|payload| StrategyError::Panicked(panic_message(payload.as_ref())))??;

        if !operation.permits(action) {
            return Err(StrategyError::InvalidAction { operation, action });
        }

        Ok(action)
    }

    fn record(&mut self, operation: Operation, action: Action, step: usize) {
        let kind = match operation {
            Operation::Signaler => {
                debug!(step, %action, "Signal");
                self.status.record_signal(Signal::new(action, step));
                return;
            }
            Operation::Entryer => TradeKind::Entry,
            Operation::Exiter => TradeKind::Exit,
            Operation::Stopper => TradeKind::Stop,
        };

        if self.config.skip_redundant_orders && self.status.position.is_redundant(action) {
            debug!(step, %action, %kind, position = %self.status.position, "Skipping redundant order");
            return;
        }

        debug!(step, %action, %kind, "Trade");
        self.status.record_trade(Trade::new(action, step, kind));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
