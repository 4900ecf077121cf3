//! CSV price series loader.

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use backtest_core::error::DataError;
use backtest_core::types::PriceSeries;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Close", alias = "price", alias = "value")]
    close: f64,
    #[serde(rename = "Adj Close", default)]
    adj_close: Option<f64>,
}

impl CsvRecord {
    /// Adjusted close when the file has one, raw close otherwise.
    fn value(&self) -> f64 {
        self.adj_close.unwrap_or(self.close)
    }
}

/// CSV file holding one observation per row.
pub struct CsvSeriesSource {
    path: PathBuf,
}

impl CsvSeriesSource {
    /// Create a new CSV source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Load the whole file as a series for `symbol`.
    pub fn load(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let file = std::fs::File::open(&self.path)?;
        let series = read_series(file, symbol)?;
        debug!(path = %self.path.display(), observations = series.len(), "Loaded series");
        Ok(series)
    }
}

/// Read a series from any CSV reader. Rows are sorted chronologically.
pub fn read_series<R: Read>(reader: R, symbol: &str) -> Result<PriceSeries, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        let value = record.value();
        if !value.is_finite() {
            return Err(DataError::ParseError(format!(
                "Non-finite value on {}",
                record.date
            )));
        }
        rows.push((parse_timestamp(&record.date)?, value));
    }

    // Stable sort keeps file order for equal timestamps
    rows.sort_by_key(|(ts, _)| *ts);

    let (timestamps, values): (Vec<i64>, Vec<f64>) = rows.into_iter().unzip();
    PriceSeries::with_timestamps(symbol, values, timestamps)
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Some(dt) = NaiveDate::parse_from_str(date_str, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    // Unix timestamp, milliseconds if more than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        return Ok(if ts > 10_000_000_000 { ts } else { ts * 1000 });
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2024-01-15").is_ok());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1_705_312_800_000);
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1_705_312_800_000);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_read_series_sorts_rows() {
        let data = "Date,Open,Close\n2024-01-03,1,103.0\n2024-01-01,1,101.0\n2024-01-02,1,102.0\n";
        let series = read_series(data.as_bytes(), "TEST").unwrap();

        assert_eq!(series.symbol, "TEST");
        assert_eq!(series.values(), &[101.0, 102.0, 103.0]);
        assert!(series.has_timestamps());
    }

    #[test]
    fn test_read_series_rejects_bad_rows() {
        let data = "date,close\n2024-01-01,abc\n";
        assert!(matches!(
            read_series(data.as_bytes(), "TEST"),
            Err(DataError::ParseError(_))
        ));
    }

    #[test]
    fn test_read_series_prefers_adjusted_close() {
        let data = "Date,Open,High,Low,Close,Adj Close,Volume\n\
                    2024-01-02,1,1,1,101.0,100.5,10\n\
                    2024-01-03,1,1,1,102.0,,10\n";
        let series = read_series(data.as_bytes(), "X").unwrap();

        assert_eq!(series.values(), &[100.5, 102.0]);
    }

    #[test]
    fn test_missing_file() {
        match CsvSeriesSource::new("/nonexistent/prices.csv") {
            Err(DataError::Io(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert!(e.to_string().contains("/nonexistent/prices.csv"));
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
