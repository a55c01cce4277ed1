//! Bisquare robustness weighting.
//!
//! The outer STL loop converts the current remainder into per-point
//! weights that down-weight outliers in the next round of smoothing.

/// Weight floor below which a robustness weight is considered degenerate.
const WEIGHT_FLOOR: f64 = 0.001;
/// Replacement for degenerate near-zero weights. Keeping a small
/// positive weight avoids zero-weight local fits in the subsequent
/// cycle-subseries regression.
const WEIGHT_CLAMP: f64 = 0.01;

/// The bisquare weight function.
///
/// Returns `(1 - u^2)^2` for `0 <= u < 1` and `0` for `u >= 1`.
pub fn bisquare(u: f64) -> f64 {
    debug_assert!(u >= 0.0, "bisquare argument must be >= 0, got {}", u);
    if u < 1.0 {
        let w = 1.0 - u * u;
        w * w
    } else {
        0.0
    }
}

/// Median of a sequence, ignoring ordering degeneracies.
///
/// Returns 0.0 for an empty input.
pub fn median(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Compute robustness weights from a remainder via the bisquare
/// function, using the outlier threshold `h = 6 * median(|remainder|)`.
///
/// A zero threshold (all-zero remainder) yields uniform unit weights.
/// Weights below a small floor are clamped up to a small positive value
/// instead of being left near zero; near-zero weights would destabilize
/// the weighted fits that consume them.
pub fn robustness_weights(remainder: &[f64]) -> Vec<f64> {
    let abs_remainder: Vec<f64> = remainder.iter().map(|r| r.abs()).collect();
    let h = 6.0 * median(&abs_remainder);

    if h <= 0.0 {
        return vec![1.0; remainder.len()];
    }

    abs_remainder
        .iter()
        .map(|&r| {
            let weight = bisquare(r / h);
            if weight < WEIGHT_FLOOR {
                WEIGHT_CLAMP
            } else {
                weight
            }
        })
        .collect()
}
