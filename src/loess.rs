//! Locally weighted linear regression (loess).
//!
//! For each target point the smoother fits a weighted least-squares
//! line through the nearest neighbors, weighting them by the tricube
//! kernel and, optionally, by externally supplied per-point weights.
//! The time axis does not need to be uniformly spaced.

use crate::robust::robustness_weights;

/// The tricube kernel: `(1 - |u|^3)^3` for `|u| < 1`, else `0`.
pub fn tricube(u: f64) -> f64 {
    let a = u.abs();
    if a < 1.0 {
        let w = 1.0 - a * a * a;
        w * w * w
    } else {
        0.0
    }
}

/// Smooth a series with locally weighted linear regression.
///
/// * `times` / `values` - equal-length input, `times` non-decreasing.
/// * `bandwidth` - fraction of points considered around each target;
///   converted to a neighbor count `q = round(bandwidth * m)` clamped
///   to `[2, m]`.
/// * `external_weights` - optional per-point weights multiplied into
///   the kernel weights (robustness weights from the STL outer loop
///   propagate through here).
/// * `robustness_iterations` - number of internal re-fits using
///   bisquare weights derived from the previous pass's residuals.
///
/// Returns one fitted value per input point. Windows near the
/// boundaries become asymmetric since the nearest `q` points are taken
/// regardless of side. Degenerate windows (zero time span, zero total
/// weight) fall back to equal kernel weights and input pass-through
/// respectively rather than producing non-finite values.
pub fn loess_smooth(
    times: &[f64],
    values: &[f64],
    bandwidth: f64,
    external_weights: Option<&[f64]>,
    robustness_iterations: usize,
) -> Vec<f64> {
    let m = times.len();
    debug_assert_eq!(m, values.len());
    if let Some(weights) = external_weights {
        debug_assert_eq!(m, weights.len());
    }
    if m == 0 {
        return Vec::new();
    }
    if m == 1 {
        return vec![values[0]];
    }

    let q = ((bandwidth * m as f64).round() as usize).clamp(2, m);

    let mut combined: Vec<f64> = match external_weights {
        Some(weights) => weights.to_vec(),
        None => vec![1.0; m],
    };
    let mut fitted = vec![0.0; m];

    for pass in 0..=robustness_iterations {
        for i in 0..m {
            let (left, right) = nearest_window(times, i, q);
            fitted[i] = fit_local_line(times, values, &combined, i, left, right);
        }

        if pass == robustness_iterations {
            break;
        }

        // Re-weight by the bisquare of the scaled residuals and fold
        // the external weights back in.
        let residuals: Vec<f64> = (0..m).map(|j| values[j] - fitted[j]).collect();
        let residual_weights = robustness_weights(&residuals);
        combined = match external_weights {
            Some(weights) => weights
                .iter()
                .zip(residual_weights.iter())
                .map(|(w, r)| w * r)
                .collect(),
            None => residual_weights,
        };
    }

    fitted
}

/// Select the `q` nearest neighbors of point `i` by time distance.
///
/// Returns inclusive window bounds. The window grows one point at a
/// time toward whichever side holds the closer next candidate, so it
/// simply becomes one-sided at the series boundaries.
fn nearest_window(times: &[f64], i: usize, q: usize) -> (usize, usize) {
    let m = times.len();
    let mut left = i;
    let mut right = i;

    while right - left + 1 < q {
        if left == 0 {
            right += 1;
        } else if right == m - 1 {
            left -= 1;
        } else if times[i] - times[left - 1] <= times[right + 1] - times[i] {
            left -= 1;
        } else {
            right += 1;
        }
    }

    (left, right)
}

/// Fit a weighted least-squares line over the window and evaluate it at
/// point `i`.
///
/// Accumulation is done in coordinates centered on `times[i]`, which
/// keeps the normal equations well conditioned for large time values
/// (e.g. epoch timestamps).
fn fit_local_line(
    times: &[f64],
    values: &[f64],
    weights: &[f64],
    i: usize,
    left: usize,
    right: usize,
) -> f64 {
    let x_i = times[i];
    let d_max = (x_i - times[left]).max(times[right] - x_i);

    let mut sum_w = 0.0;
    let mut sum_wx = 0.0;
    let mut sum_wy = 0.0;
    let mut sum_wxx = 0.0;
    let mut sum_wxy = 0.0;

    for j in left..=right {
        let dx = times[j] - x_i;
        // Zero-span windows (duplicate times) get equal kernel weights.
        let kernel = if d_max > 0.0 {
            tricube(dx.abs() / d_max)
        } else {
            1.0
        };
        let w = kernel * weights[j];

        sum_w += w;
        sum_wx += w * dx;
        sum_wy += w * values[j];
        sum_wxx += w * dx * dx;
        sum_wxy += w * dx * values[j];
    }

    if sum_w <= 0.0 {
        return values[i];
    }

    let mean_x = sum_wx / sum_w;
    let mean_y = sum_wy / sum_w;
    let variance = sum_wxx / sum_w - mean_x * mean_x;
    let covariance = sum_wxy / sum_w - mean_x * mean_y;

    let slope = if variance > 0.0 {
        covariance / variance
    } else {
        0.0
    };

    // Evaluate the line at the target point, dx = 0.
    mean_y - slope * mean_x
}
