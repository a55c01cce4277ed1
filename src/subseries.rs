//! Cycle-subseries extraction, edge padding, and re-combination.
//!
//! A cycle subseries collects every observation sharing the same phase
//! within the seasonal period: for monthly data with period 12, one
//! subseries holds all the Januaries, the next all the Februaries, and
//! so on. Each subseries is smoothed independently and the results are
//! interleaved back into a single sequence.

/// The per-phase subseries of a detrended series.
///
/// Phases `0..period` hold every `period`-th point starting at that
/// offset. When the period does not divide the series length, the
/// leading phases carry one extra observation.
#[derive(Debug, Clone)]
pub struct CycleSubseries {
    /// Detrended values per phase.
    pub values: Vec<Vec<f64>>,
    /// Time values per phase, aligned with `values`.
    pub times: Vec<Vec<f64>>,
    /// Robustness weights per phase, if weighting is active.
    pub weights: Option<Vec<Vec<f64>>>,
}

impl CycleSubseries {
    /// Split a detrended series (and optional robustness weights) into
    /// its `period` phase subseries.
    pub fn split(
        times: &[f64],
        detrended: &[f64],
        weights: Option<&[f64]>,
        period: usize,
    ) -> Self {
        let n = detrended.len();
        debug_assert_eq!(n, times.len());

        let mut phase_values = Vec::with_capacity(period);
        let mut phase_times = Vec::with_capacity(period);
        let mut phase_weights = weights.map(|_| Vec::with_capacity(period));

        for phase in 0..period {
            let len = n / period + usize::from(phase < n % period);
            let mut values = Vec::with_capacity(len);
            let mut ts = Vec::with_capacity(len);
            let mut ws = Vec::with_capacity(len);

            let mut idx = phase;
            while idx < n {
                values.push(detrended[idx]);
                ts.push(times[idx]);
                if let Some(all_weights) = weights {
                    ws.push(all_weights[idx]);
                }
                idx += period;
            }

            phase_values.push(values);
            phase_times.push(ts);
            if let Some(collected) = phase_weights.as_mut() {
                collected.push(ws);
            }
        }

        Self {
            values: phase_values,
            times: phase_times,
            weights: phase_weights,
        }
    }
}

/// Number of points the edge extrapolation interpolates through. The
/// interpolating polynomial is evaluated outside the data, where its
/// error grows with the degree; a high-degree fit through a wiggly
/// detrended subseries can overshoot by orders of magnitude, and the
/// overshoot feeds back through the seasonal and trend estimates on
/// every inner pass. Two points keep the extrapolation exact in
/// Neville form while staying on the local edge slope.
const PAD_EXTRAPOLATION_POINTS: usize = 2;

/// Pad a subseries by one extrapolated point on each end.
///
/// The padded times sit one step outside the observed range, where the
/// step is the spacing between the first two subseries points. The
/// padded values come from the exact interpolating polynomial through
/// the outermost points on each side (Neville's algorithm) evaluated
/// at the padded times, so the smoother can produce a seasonal
/// estimate extending one cycle beyond the data on either side.
pub fn pad_edges(times: &[f64], values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let m = times.len();
    debug_assert!(m >= 2);
    debug_assert_eq!(m, values.len());

    let step = (times[1] - times[0]).abs();
    let k = m.min(PAD_EXTRAPOLATION_POINTS);

    let mut padded_times = Vec::with_capacity(m + 2);
    padded_times.push(times[0] - step);
    padded_times.extend_from_slice(times);
    padded_times.push(times[m - 1] + step);

    let mut padded_values = Vec::with_capacity(m + 2);
    padded_values.push(extrapolate_edge(&times[..k], &values[..k], padded_times[0]));
    padded_values.extend_from_slice(values);
    padded_values.push(extrapolate_edge(
        &times[m - k..],
        &values[m - k..],
        padded_times[m + 1],
    ));

    (padded_times, padded_values)
}

/// Extrapolate one value just outside an edge window.
///
/// Duplicate times inside the window (a zero-step phase axis) leave the
/// interpolating polynomial undefined; the edge value nearest the
/// target is held instead of letting the division produce NaN.
fn extrapolate_edge(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if xs[0] == xs[xs.len() - 1] {
        return if x <= xs[0] { ys[0] } else { ys[ys.len() - 1] };
    }
    neville(xs, ys, x)
}

/// Pad a weight sequence to match [`pad_edges`] by repeating the edge
/// weights, keeping the padded weights inside `[0, 1]`.
pub fn pad_weights(weights: &[f64]) -> Vec<f64> {
    debug_assert!(!weights.is_empty());
    let mut padded = Vec::with_capacity(weights.len() + 2);
    padded.push(weights[0]);
    padded.extend_from_slice(weights);
    padded.push(weights[weights.len() - 1]);
    padded
}

/// Interleave smoothed, padded phase subseries back into one combined
/// sequence of length `combined_len` (`n + 2 * period`), placing the
/// `k`-th value of phase `p` at index `period * k + p`.
pub fn combine(smoothed_phases: &[Vec<f64>], period: usize, combined_len: usize) -> Vec<f64> {
    let mut combined = vec![0.0; combined_len];
    for (phase, subseries) in smoothed_phases.iter().enumerate() {
        for (k, &value) in subseries.iter().enumerate() {
            combined[period * k + phase] = value;
        }
    }
    combined
}

/// Evaluate the interpolating polynomial through `(xs, ys)` at `x`
/// using Neville's algorithm.
fn neville(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len();
    let mut p = ys.to_vec();
    for k in 1..n {
        for i in 0..n - k {
            p[i] = ((x - xs[i + k]) * p[i] + (xs[i] - x) * p[i + 1]) / (xs[i] - xs[i + k]);
        }
    }
    p[0]
}
