//! Time-series source trait.

use crate::types::PriceSeries;

/// A finite, ordered sequence of numeric observations.
///
/// The engine only ever asks for the length and for prefixes, which keeps
/// every strategy call on the past side of the current step.
pub trait TimeSeries: Sync {
    /// Number of observations.
    fn len(&self) -> usize;

    /// Observations `[0, end)`. `end` is clamped to `len()`.
    fn prefix(&self, end: usize) -> &[f64];

    /// Check if the series is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TimeSeries for [f64] {
    fn len(&self) -> usize {
        <[f64]>::len(self)
    }

    fn prefix(&self, end: usize) -> &[f64] {
        &self[..end.min(<[f64]>::len(self))]
    }
}

impl TimeSeries for Vec<f64> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn prefix(&self, end: usize) -> &[f64] {
        TimeSeries::prefix(self.as_slice(), end)
    }
}

impl TimeSeries for PriceSeries {
    fn len(&self) -> usize {
        PriceSeries::len(self)
    }

    fn prefix(&self, end: usize) -> &[f64] {
        TimeSeries::prefix(self.values(), end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_exclusive_and_clamped() {
        let data = vec![1.0, 2.0, 3.0];
        assert!(TimeSeries::prefix(&data, 0).is_empty());
        assert_eq!(TimeSeries::prefix(&data, 2), &[1.0, 2.0]);
        assert_eq!(TimeSeries::prefix(&data, 10), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_price_series_source() {
        let series = PriceSeries::new("SPY", vec![10.0, 11.0]);
        let source: &dyn TimeSeries = &series;
        assert_eq!(source.len(), 2);
        assert_eq!(source.prefix(1), &[10.0]);
        assert!(!source.is_empty());
    }
}
