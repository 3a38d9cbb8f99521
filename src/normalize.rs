//! Linear rescaling of one series into another's value range, for
//! shared-axis display of price and open interest.

use crate::stats::{max_value, min_value};

/// Map every value of `source` linearly from `[min(source), max(source)]`
/// into `[min(target), max(target)]`.
///
/// A constant source is returned unchanged (the line simply will not span
/// the target's range in that case). Empty source or target is returned
/// unchanged. Non-finite inputs are excluded from the min/max computation
/// and replaced by 0.0 in the output so every result value is finite.
pub fn normalize_to_range(source: &[f64], target: &[f64]) -> Vec<f64> {
    if source.is_empty() || target.is_empty() {
        return source.to_vec();
    }

    let source_min = min_value(source);
    let source_max = max_value(source);
    let target_min = min_value(target);
    let target_max = max_value(target);

    if source_max == source_min {
        return source.iter().map(|&v| if v.is_finite() { v } else { 0.0 }).collect();
    }

    source
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return 0.0;
            }
            target_min + (v - source_min) * (target_max - target_min) / (source_max - source_min)
        })
        .collect()
}

/// Integer variant used by the ASCII renderer: rescale `values` onto rows
/// `0..=max_row`. A constant series lands on the middle row.
pub fn scale_to_rows(values: &[f64], max_row: usize) -> Vec<usize> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = min_value(values);
    let max = max_value(values);

    if max == min {
        return vec![max_row / 2; values.len()];
    }

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return 0;
            }
            let scaled = (v - min) * max_row as f64 / (max - min);
            (scaled as usize).min(max_row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_onto_target_range() {
        let source = [0.0, 50.0, 100.0];
        let target = [2.0, 4.0, 6.0];
        assert_eq!(normalize_to_range(&source, &target), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_constant_source_unchanged() {
        let source = [10.0, 10.0, 10.0];
        let target = [1.0, 2.0, 3.0];
        assert_eq!(normalize_to_range(&source, &target), vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_empty_inputs_unchanged() {
        assert!(normalize_to_range(&[], &[1.0]).is_empty());
        let source = [1.0, 2.0];
        assert_eq!(normalize_to_range(&source, &[]), source.to_vec());
    }

    #[test]
    fn test_output_length_and_bounds() {
        let source = [3.0, 7.0, 1.0, 9.0, 5.0];
        let target = [100.0, 200.0];
        let out = normalize_to_range(&source, &target);

        assert_eq!(out.len(), source.len());
        let out_min = out.iter().cloned().fold(f64::INFINITY, f64::min);
        let out_max = out.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((out_min - 100.0).abs() < 1e-9);
        assert!((out_max - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_values_zeroed() {
        let source = [0.0, f64::NAN, 100.0, f64::INFINITY];
        let target = [10.0, 20.0];
        let out = normalize_to_range(&source, &target);

        assert_eq!(out.len(), 4);
        assert_eq!(out[0], 10.0);
        assert_eq!(out[1], 0.0);
        assert_eq!(out[2], 20.0);
        assert_eq!(out[3], 0.0);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_scale_to_rows() {
        let rows = scale_to_rows(&[0.0, 50.0, 100.0], 19);
        assert_eq!(rows, vec![0, 9, 19]);
    }

    #[test]
    fn test_scale_to_rows_constant_centers() {
        let rows = scale_to_rows(&[5.0, 5.0], 19);
        assert_eq!(rows, vec![9, 9]);
    }
}
