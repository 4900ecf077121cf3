//! Price series container.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Ordered series of observations (typically closing prices) for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Observations, oldest first
    values: Vec<f64>,
    /// Unix timestamps in milliseconds, parallel to `values` (may be empty)
    timestamps: Vec<i64>,
}

impl PriceSeries {
    /// Create a series without timestamps.
    pub fn new(symbol: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            values,
            timestamps: Vec::new(),
        }
    }

    /// Create a series with one timestamp per observation.
    pub fn with_timestamps(
        symbol: impl Into<String>,
        values: Vec<f64>,
        timestamps: Vec<i64>,
    ) -> Result<Self, DataError> {
        if values.len() != timestamps.len() {
            return Err(DataError::ParseError(format!(
                "{} values but {} timestamps",
                values.len(),
                timestamps.len()
            )));
        }
        if timestamps.windows(2).any(|w| w[0] > w[1]) {
            return Err(DataError::ParseError(
                "Timestamps are not in chronological order".into(),
            ));
        }
        Ok(Self {
            symbol: symbol.into(),
            values,
            timestamps,
        })
    }

    /// Get the number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All observations as a slice.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get an observation by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get the last observation.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Get the timestamp of an observation as a DateTime.
    pub fn datetime(&self, index: usize) -> Option<DateTime<Utc>> {
        self.timestamps
            .get(index)
            .and_then(|ts| DateTime::from_timestamp_millis(*ts))
    }

    /// Check if the series carries timestamps.
    pub fn has_timestamps(&self) -> bool {
        !self.timestamps.is_empty()
    }
}

impl FromIterator<f64> for PriceSeries {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self::new(String::new(), iter.into_iter().collect())
    }
}
