//! Fixture data sources for the backtester.

mod csv_source;

pub use csv_source::{read_series, CsvSeriesSource};

use std::path::Path;
use backtest_core::error::DataError;
use backtest_core::types::PriceSeries;

/// Load a price series from a CSV file.
pub fn load_csv(path: impl AsRef<Path>, symbol: &str) -> Result<PriceSeries, DataError> {
    CsvSeriesSource::new(path)?.load(symbol)
}
