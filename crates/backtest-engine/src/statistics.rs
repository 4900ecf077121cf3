//! Trade statistics derived from a finished run.

use serde::{Deserialize, Serialize};

use backtest_core::traits::TimeSeries;
use backtest_core::types::{Action, PositionState, Status, TradeKind};

/// A position opened and closed again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub direction: PositionState,
    pub entry_step: usize,
    pub exit_step: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    /// Operation that closed the position
    pub closed_by: TradeKind,
    /// Price points gained per unit
    pub pnl: f64,
}

/// Trade statistics.
///
/// Every trade is filled at the observation of its own step, the first
/// value the strategy could not see when it decided.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    /// Number of steps processed
    pub steps_processed: usize,
    /// Number of signals emitted
    pub total_signals: usize,
    /// Number of trades executed
    pub total_trades: usize,
    pub entries: usize,
    pub exits: usize,
    pub stops: usize,
    pub long_entries: usize,
    pub short_entries: usize,
    /// Closed round trips
    pub round_trips: Vec<RoundTrip>,
    pub winning_trips: usize,
    pub losing_trips: usize,
    /// Win rate percentage over closed round trips
    pub win_rate_pct: f64,
    /// Sum of round trip P&L in price points
    pub gross_pnl: f64,
    /// Position left open at the end of the run
    pub open_position: PositionState,
}

impl TradeStats {
    /// Compute statistics for `status` against the series it was run on.
    pub fn from_status(status: &Status, series: &dyn TimeSeries) -> Self {
        let mut stats = TradeStats {
            steps_processed: status.step,
            total_signals: status.signals.len(),
            total_trades: status.trades.len(),
            open_position: status.position,
            ..Default::default()
        };

        let prices = series.prefix(series.len());
        // (direction, step, price) of the open position
        let mut open: Option<(PositionState, usize, f64)> = None;

        for trade in &status.trades {
            match trade.kind {
                TradeKind::Entry => stats.entries += 1,
                TradeKind::Exit => stats.exits += 1,
                TradeKind::Stop => stats.stops += 1,
            }
            match trade.order {
                Action::Long => stats.long_entries += 1,
                Action::Short => stats.short_entries += 1,
                _ => {}
            }

            let Some(&price) = prices.get(trade.step) else {
                continue;
            };

            match trade.order {
                Action::Long | Action::Short => {
                    let direction = PositionState::Flat.after(trade.order);
                    match open {
                        Some((current, ..)) if current == direction => {}
                        Some(position) => {
                            stats.close(position, trade.step, price, trade.kind);
                            open = Some((direction, trade.step, price));
                        }
                        None => open = Some((direction, trade.step, price)),
                    }
                }
                Action::Sell => {
                    if let Some(position) = open.take() {
                        stats.close(position, trade.step, price, trade.kind);
                    }
                }
                Action::None => {}
            }
        }

        let closed = stats.round_trips.len();
        if closed > 0 {
            stats.win_rate_pct = stats.winning_trips as f64 * 100.0 / closed as f64;
        }

        stats
    }

    fn close(
        &mut self,
        (direction, entry_step, entry_price): (PositionState, usize, f64),
        exit_step: usize,
        exit_price: f64,
        closed_by: TradeKind,
    ) {
        let pnl = match direction {
            PositionState::Short => entry_price - exit_price,
            _ => exit_price - entry_price,
        };

        if pnl > 0.0 {
            self.winning_trips += 1;
        } else if pnl < 0.0 {
            self.losing_trips += 1;
        }
        self.gross_pnl += pnl;

        self.round_trips.push(RoundTrip {
            direction,
            entry_step,
            exit_step,
            entry_price,
            exit_price,
            closed_by,
            pnl,
        });
    }
}
