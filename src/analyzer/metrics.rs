//! Statistical reduction of raw metric samples.
//!
//! The collector hands each metric's raw samples to [`MetricSeries::from_values`],
//! which reduces them to the summary statistics the recommenders consume.

use super::types::MetricSeries;

impl MetricSeries {
    /// Reduce raw samples to a statistical summary.
    ///
    /// Returns `None` for an empty sample set; a summary with zero datapoints
    /// has no meaningful percentile.
    pub fn from_values(values: &[f64], percentile_p: f64) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let sum: f64 = values.iter().sum();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            datapoints: values.len(),
            average: sum / values.len() as f64,
            min,
            max,
            p95: percentile(values, percentile_p),
        })
    }
}

/// Linearly interpolated percentile over the nearest-rank pair.
///
/// For sorted values `v[0..n-1]` and `p` in `[0, 100]`, the index is
/// `i = (n-1) * p / 100` and the result is
/// `v[floor(i)] + (i - floor(i)) * (v[ceil(i)] - v[floor(i)])`,
/// clamped at the array boundary when `ceil(i) >= n`.
///
/// Requires at least one sample; `p` is clamped to `[0, 100]`.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    assert!(!values.is_empty(), "percentile requires at least one sample");
    let p = p.clamp(0.0, 100.0);

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let index = (sorted.len() - 1) as f64 * p / 100.0;
    let floor_index = index.floor() as usize;
    let ceil_index = floor_index + 1;

    if ceil_index >= sorted.len() {
        return sorted[floor_index];
    }

    sorted[floor_index] + (index - floor_index as f64) * (sorted[ceil_index] - sorted[floor_index])
}
