//! Window statistics over finite numeric sequences.
//!
//! Non-finite values are excluded from every aggregate, mirroring the
//! normalizer's policy, so the results are always finite.

use serde::Serialize;

/// Mean of the finite values, 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in values {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Maximum of the finite values, 0.0 when none are finite.
pub fn max_value(values: &[f64]) -> f64 {
    let mut max: Option<f64> = None;
    for &v in values {
        if v.is_finite() && max.map_or(true, |m| v > m) {
            max = Some(v);
        }
    }
    max.unwrap_or(0.0)
}

/// Minimum of the finite values, 0.0 when none are finite.
pub fn min_value(values: &[f64]) -> f64 {
    let mut min: Option<f64> = None;
    for &v in values {
        if v.is_finite() && min.map_or(true, |m| v < m) {
            min = Some(v);
        }
    }
    min.unwrap_or(0.0)
}

/// Aggregates for one window, recomputed fresh per tick and handed to the
/// renderers. Never cached across ticks.
#[derive(Debug, Clone, Serialize)]
pub struct WindowStats {
    pub avg_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub avg_oi: f64,
    pub data_points: usize,
    pub total_records: usize,
    #[serde(skip)]
    pub window_start: usize,
    #[serde(skip)]
    pub window_end: usize,
}

impl WindowStats {
    pub fn compute(
        prices: &[f64],
        open_interest: &[f64],
        window_start: usize,
        window_end: usize,
        total_records: usize,
    ) -> Self {
        Self {
            avg_price: mean(prices),
            max_price: max_value(prices),
            min_price: min_value(prices),
            avg_oi: mean(open_interest),
            data_points: prices.len(),
            total_records,
            window_start,
            window_end,
        }
    }

    /// Human-readable window position, e.g. "101-300 of 5000".
    pub fn window_info(&self) -> String {
        format!(
            "{}-{} of {}",
            self.window_start + 1,
            self.window_end,
            self.total_records
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_aggregates() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(mean(&values), 2.0);
        assert_eq!(max_value(&values), 3.0);
        assert_eq!(min_value(&values), 1.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(max_value(&[]), 0.0);
        assert_eq!(min_value(&[]), 0.0);
    }

    #[test]
    fn test_non_finite_values_ignored() {
        let values = [f64::NAN, 10.0, f64::INFINITY, 20.0, f64::NEG_INFINITY];
        assert_eq!(mean(&values), 15.0);
        assert_eq!(max_value(&values), 20.0);
        assert_eq!(min_value(&values), 10.0);
    }

    #[test]
    fn test_all_non_finite() {
        let values = [f64::NAN, f64::INFINITY];
        assert_eq!(mean(&values), 0.0);
        assert_eq!(max_value(&values), 0.0);
        assert_eq!(min_value(&values), 0.0);
    }

    #[test]
    fn test_window_stats() {
        let prices = [840.0, 850.0, 860.0];
        let oi = [100.0, 200.0, 300.0];
        let stats = WindowStats::compute(&prices, &oi, 100, 103, 5000);

        assert_eq!(stats.avg_price, 850.0);
        assert_eq!(stats.max_price, 860.0);
        assert_eq!(stats.min_price, 840.0);
        assert_eq!(stats.avg_oi, 200.0);
        assert_eq!(stats.data_points, 3);
        assert_eq!(stats.window_info(), "101-103 of 5000");
    }
}
