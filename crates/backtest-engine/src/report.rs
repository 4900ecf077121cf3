//! Backtest report generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backtest_core::types::{PriceSeries, Status};

use crate::{BacktestConfig, TradeStats};

/// Complete backtest report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Strategy name
    pub strategy: String,
    /// Symbol of the series
    pub symbol: String,
    /// Configuration used
    pub config: BacktestConfig,
    /// Final run status
    pub status: Status,
    /// Statistics
    pub stats: TradeStats,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

impl BacktestReport {
    /// Build a report for a finished run.
    pub fn new(
        strategy: impl Into<String>,
        series: &PriceSeries,
        config: BacktestConfig,
        status: Status,
    ) -> Self {
        let stats = TradeStats::from_status(&status, series);
        Self {
            strategy: strategy.into(),
            symbol: series.symbol.clone(),
            config,
            status,
            stats,
            generated_at: Utc::now(),
        }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("RUN\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Strategy:            {}\n", self.strategy));
        s.push_str(&format!("  Symbol:              {}\n", self.symbol));
        s.push_str(&format!(
            "  Steps Processed:     {}\n",
            self.stats.steps_processed
        ));
        s.push_str(&format!(
            "  Final Position:      {}\n",
            self.stats.open_position
        ));
        s.push('\n');

        s.push_str("ACTIVITY\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Signals:             {}\n",
            self.stats.total_signals
        ));
        s.push_str(&format!(
            "  Trades:              {}\n",
            self.stats.total_trades
        ));
        s.push_str(&format!(
            "  Entries:             {} ({} long, {} short)\n",
            self.stats.entries, self.stats.long_entries, self.stats.short_entries
        ));
        s.push_str(&format!("  Exits:               {}\n", self.stats.exits));
        s.push_str(&format!("  Stops:               {}\n", self.stats.stops));
        s.push('\n');

        s.push_str("ROUND TRIPS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Closed:              {}\n",
            self.stats.round_trips.len()
        ));
        s.push_str(&format!(
            "  Winning:             {}\n",
            self.stats.winning_trips
        ));
        s.push_str(&format!(
            "  Losing:              {}\n",
            self.stats.losing_trips
        ));
        s.push_str(&format!(
            "  Win Rate:            {:.2}%\n",
            self.stats.win_rate_pct
        ));
        s.push_str(&format!(
            "  Gross P&L (points):  {:.4}\n",
            self.stats.gross_pnl
        ));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the trade log to CSV.
    pub fn trades_to_csv(&self) -> String {
        let mut csv = String::from("step,kind,order\n");
        for trade in &self.status.trades {
            csv.push_str(&format!("{},{},{}\n", trade.step, trade.kind, trade.order));
        }
        csv
    }
}
