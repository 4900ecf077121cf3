//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Causality: rewriting the series from step s onward leaves every event
//!    recorded up to step s untouched
//! 2. Determinism: repeated runs produce identical logs
//! 3. Ordering: both logs are non-decreasing in step
//! 4. Cancellation leaves a valid partial status

use proptest::prelude::*;
use proptest::strategy::Strategy as _;
use backtest_core::{
    Action, BacktestError, Signal, Status, StepContext, Strategy, StrategyError, Trade,
};
use backtest_engine::{Backtest, BacktestConfig, CancellationToken};
use backtest_strategies::NullStrategy;

/// Stateful strategy that reacts to the visible history in all four
/// operations.
#[derive(Default)]
struct TrendFollower {
    entry_value: Option<f64>,
    cancel_at: Option<(usize, CancellationToken)>,
}

impl Strategy for TrendFollower {
    fn name(&self) -> &str {
        "trend_follower"
    }

    fn signaler(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        if let Some((step, token)) = &self.cancel_at {
            if ctx.step == *step {
                token.cancel();
            }
        }
        let &[.., prev, last] = ctx.history else {
            return Ok(Action::None);
        };
        Ok(if last > prev * 1.01 {
            Action::Long
        } else if last < prev * 0.99 {
            Action::Short
        } else if (last - prev).abs() < f64::EPSILON {
            Action::Sell
        } else {
            Action::None
        })
    }

    fn entryer(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        if ctx.position.is_open() {
            return Ok(Action::None);
        }
        match ctx.current_signal() {
            Some(action) if action.is_entry() => {
                self.entry_value = ctx.last_value();
                Ok(action)
            }
            _ => Ok(Action::None),
        }
    }

    fn exiter(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        if ctx.position.is_open() && ctx.current_signal() == Some(Action::Sell) {
            self.entry_value = None;
            return Ok(Action::Sell);
        }
        Ok(Action::None)
    }

    fn stopper(&mut self, ctx: &StepContext<'_>) -> Result<Action, StrategyError> {
        let (Some(entry), Some(last)) = (self.entry_value, ctx.last_value()) else {
            return Ok(Action::None);
        };
        if ctx.position.is_open() && (last - entry).abs() > entry * 0.05 {
            self.entry_value = None;
            return Ok(Action::Sell);
        }
        Ok(Action::None)
    }

    fn reset(&mut self) {
        self.entry_value = None;
    }
}

fn run(strategy: &mut dyn Strategy, series: &Vec<f64>) -> Status {
    Backtest::new(strategy, series).run().unwrap()
}

fn arb_series() -> impl proptest::strategy::Strategy<Value = Vec<f64>> {
    proptest::collection::vec(50.0..150.0_f64, 0..80)
}

fn up_to(status: &Status, step: usize) -> (Vec<Signal>, Vec<Trade>) {
    let signals = status.signals.iter().filter(|s| s.step <= step).copied().collect();
    let trades = status.trades.iter().filter(|t| t.step <= step).copied().collect();
    (signals, trades)
}

proptest! {
    /// Events up to and including step s only see series[0..s].
    #[test]
    fn no_lookahead(
        series in arb_series(),
        tail in proptest::collection::vec(50.0..150.0_f64, 0..80),
        cut in 0usize..80,
    ) {
        let cut = cut.min(series.len());
        let mut mutated = series[..cut].to_vec();
        mutated.extend(tail.iter().take(series.len() - cut));
        mutated.resize(series.len(), 100.0);

        let original = run(&mut TrendFollower::default(), &series);
        let rewritten = run(&mut TrendFollower::default(), &mutated);

        prop_assert_eq!(up_to(&original, cut), up_to(&rewritten, cut));
    }

    /// Two runs with the same strategy instance produce identical logs.
    #[test]
    fn deterministic_replay(series in arb_series()) {
        let mut strategy = TrendFollower::default();
        let first = run(&mut strategy, &series);
        let second = run(&mut strategy, &series);

        prop_assert_eq!(first, second);
    }

    /// Logs are chronological and the cursor ends at the series length.
    #[test]
    fn logs_are_ordered(series in arb_series()) {
        let status = run(&mut TrendFollower::default(), &series);

        prop_assert!(status.is_chronological());
        prop_assert_eq!(status.step, series.len());
        prop_assert!(status.signals.iter().all(|s| !s.action.is_none()));
        prop_assert!(status.trades.iter().all(|t| !t.order.is_none()));
    }

    /// A no-op strategy records nothing however long the series.
    #[test]
    fn null_strategy_is_silent(series in arb_series()) {
        let status = run(&mut NullStrategy::new(), &series);

        prop_assert!(status.is_empty());
        prop_assert_eq!(status.step, series.len());
    }
}

#[test]
fn test_cancellation_mid_run_keeps_completed_steps() {
    let token = CancellationToken::new();
    let mut strategy = TrendFollower {
        cancel_at: Some((5, token.clone())),
        ..Default::default()
    };
    let series: Vec<f64> = (0..20).map(|i| 100.0 + (i % 4) as f64 * 3.0).collect();

    let err = Backtest::builder()
        .strategy(&mut strategy)
        .series(&series)
        .config(BacktestConfig::default())
        .cancellation(token)
        .build()
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, BacktestError::Cancelled { .. }));
    let partial = err.into_partial_status().unwrap();
    // step 5 finished before the flag was checked again
    assert_eq!(partial.step, 6);
    assert!(partial.is_chronological());
    assert!(partial.signals.iter().all(|s| s.step < 6));

    let full = run(&mut TrendFollower::default(), &series);
    let completed: Vec<_> = full.signals.iter().filter(|s| s.step < 6).copied().collect();
    assert_eq!(partial.signals, completed);
}
