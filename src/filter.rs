//! Moving averages and the STL low-pass filter.
//!
//! The low-pass filter separates residual trend drift out of the
//! smoothed cycle-subseries before the seasonal component is formed.

use crate::loess::loess_smooth;

/// Centered moving average with shrinking windows at the boundaries.
///
/// Each output point averages the `window` points centered on it; near
/// the edges the window is clipped to the available data and the mean
/// is taken over the points actually present. A window of 1 returns the
/// input unchanged.
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    let n = series.len();
    if n == 0 || window == 0 {
        return series.to_vec();
    }

    let half = window / 2;
    let mut result = vec![0.0; n];

    for i in 0..n {
        let start = i.saturating_sub(half);
        let end = (i + window - half).min(n);
        let sum: f64 = series[start..end].iter().sum();
        result[i] = sum / (end - start) as f64;
    }

    result
}

/// The three-stage STL low-pass filter.
///
/// Applies a centered moving average of length `period` twice, then a
/// moving average of length 3, then one loess pass at `bandwidth`. The
/// output tracks whatever slow drift is embedded in the smoothed
/// cycle-subseries so it can be subtracted out.
pub fn low_pass_filter(
    times: &[f64],
    series: &[f64],
    period: usize,
    bandwidth: f64,
    loess_robustness_iterations: usize,
) -> Vec<f64> {
    let averaged = moving_average(series, period);
    let averaged = moving_average(&averaged, period);
    let averaged = moving_average(&averaged, 3);
    loess_smooth(times, &averaged, bandwidth, None, loess_robustness_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn window_one_is_identity() {
        let series = vec![3.0, -1.0, 4.0, -1.5, 9.0];
        assert_eq!(moving_average(&series, 1), series);
    }

    #[test]
    fn constant_series_is_preserved() {
        let series = vec![2.5; 20];
        for window in [2, 3, 7, 12] {
            let averaged = moving_average(&series, window);
            for v in averaged {
                assert_relative_eq!(v, 2.5, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn interior_of_linear_series_is_unchanged() {
        let series: Vec<f64> = (0..30).map(|i| 2.0 * i as f64).collect();
        let window = 5;
        let averaged = moving_average(&series, window);
        // Symmetric windows leave a linear series untouched away from
        // the edges.
        for i in 2..28 {
            assert_relative_eq!(averaged[i], series[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn oversized_window_averages_everything() {
        let series = vec![1.0, 2.0, 3.0];
        let averaged = moving_average(&series, 100);
        for v in averaged {
            assert_relative_eq!(v, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn empty_input() {
        assert!(moving_average(&[], 3).is_empty());
    }

    #[test]
    fn low_pass_preserves_constant_series() {
        let n = 48;
        let times: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let series = vec![10.0; n];

        let filtered = low_pass_filter(&times, &series, 12, 0.25, 0);
        for v in filtered {
            assert_relative_eq!(v, 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn low_pass_removes_seasonal_oscillation() {
        let n = 96;
        let period = 12;
        let times: Vec<f64> = (0..n).map(|i| i as f64).collect();
        // Zero-mean oscillation at the seasonal frequency around a
        // level of 5.
        let series: Vec<f64> = (0..n)
            .map(|i| 5.0 + (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin())
            .collect();

        let filtered = low_pass_filter(&times, &series, period, 0.25, 0);
        for i in 2 * period..n - 2 * period {
            assert!(
                (filtered[i] - 5.0).abs() < 0.1,
                "oscillation leaked through at {}: {}",
                i,
                filtered[i]
            );
        }
    }
}
