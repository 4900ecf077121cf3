//! Rolling state of a single backtest run.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Action, Signal, Trade};

/// Exposure held at the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PositionState {
    #[default]
    Flat,
    Long,
    Short,
}

impl PositionState {
    /// Check if the position is flat (no exposure).
    #[inline]
    pub fn is_flat(&self) -> bool {
        matches!(self, PositionState::Flat)
    }

    /// Check if a position is open.
    #[inline]
    pub fn is_open(&self) -> bool {
        !self.is_flat()
    }

    /// Position after executing `order` as a full-position trade.
    pub fn after(&self, order: Action) -> Self {
        match order {
            Action::Long => PositionState::Long,
            Action::Short => PositionState::Short,
            Action::Sell => PositionState::Flat,
            Action::None => *self,
        }
    }

    /// Check if `order` would change nothing: an entry while already in
    /// a position, or a sell while flat.
    pub fn is_redundant(&self, order: Action) -> bool {
        match order {
            Action::Long | Action::Short => self.is_open(),
            Action::Sell => self.is_flat(),
            Action::None => true,
        }
    }
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionState::Flat => write!(f, "FLAT"),
            PositionState::Long => write!(f, "LONG"),
            PositionState::Short => write!(f, "SHORT"),
        }
    }
}

/// Status of a backtest run: the number of steps elapsed, the signals
/// emitted and the trades performed.
///
/// Both logs are append-only and ordered by step. A `Status` is exclusively
/// owned by the engine while a run is in progress and handed back by value
/// when the run ends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    /// Steps completed so far (cursor into the series)
    pub step: usize,
    /// Emitted signals, in chronological order
    pub signals: Vec<Signal>,
    /// Executed trades, in chronological order
    pub trades: Vec<Trade>,
    /// Position after the last recorded trade
    pub position: PositionState,
}

/// Log lengths captured at the start of a step, used to discard a
/// partially evaluated step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    step: usize,
    signals: usize,
    trades: usize,
    position: PositionState,
}

impl Status {
    /// Create an empty status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signal.
    pub fn record_signal(&mut self, signal: Signal) {
        debug_assert!(self.signals.last().map_or(true, |s| s.step <= signal.step));
        self.signals.push(signal);
    }

    /// Append a trade and move the position accordingly.
    pub fn record_trade(&mut self, trade: Trade) {
        debug_assert!(self.trades.last().map_or(true, |t| t.step <= trade.step));
        self.position = self.position.after(trade.order);
        self.trades.push(trade);
    }

    /// Check if both logs are empty.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty() && self.trades.is_empty()
    }

    /// Check that both logs are non-decreasing in step.
    pub fn is_chronological(&self) -> bool {
        self.signals.windows(2).all(|w| w[0].step <= w[1].step)
            && self.trades.windows(2).all(|w| w[0].step <= w[1].step)
    }

    /// Capture the current log lengths.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            step: self.step,
            signals: self.signals.len(),
            trades: self.trades.len(),
            position: self.position,
        }
    }

    /// Drop everything recorded after `checkpoint` was taken.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.step = checkpoint.step;
        self.signals.truncate(checkpoint.signals);
        self.trades.truncate(checkpoint.trades);
        self.position = checkpoint.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TradeKind;

    #[test]
    fn test_position_transitions() {
        let flat = PositionState::Flat;
        assert_eq!(flat.after(Action::Long), PositionState::Long);
        assert_eq!(flat.after(Action::None), PositionState::Flat);
        assert_eq!(PositionState::Short.after(Action::Sell), PositionState::Flat);

        assert!(flat.is_redundant(Action::Sell));
        assert!(!flat.is_redundant(Action::Short));
        assert!(PositionState::Long.is_redundant(Action::Long));
    }

    #[test]
    fn test_record_trade_moves_position() {
        let mut status = Status::new();
        status.record_trade(Trade::new(Action::Long, 2, TradeKind::Entry));
        assert_eq!(status.position, PositionState::Long);

        status.record_trade(Trade::new(Action::Sell, 5, TradeKind::Stop));
        assert!(status.position.is_flat());
        assert_eq!(status.trades.len(), 2);
        assert!(status.is_chronological());
    }

    #[test]
    fn test_rollback_discards_step() {
        let mut status = Status::new();
        status.record_signal(Signal::new(Action::Long, 0));
        status.step = 1;

        let checkpoint = status.checkpoint();
        status.record_signal(Signal::new(Action::Short, 1));
        status.record_trade(Trade::new(Action::Short, 1, TradeKind::Entry));
        status.rollback(checkpoint);

        assert_eq!(status.signals, vec![Signal::new(Action::Long, 0)]);
        assert!(status.trades.is_empty());
        assert!(status.position.is_flat());
        assert_eq!(status.step, 1);
    }
}
