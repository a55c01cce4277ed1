//! STL decomposition configuration.
//!
//! Parameter names follow Cleveland et al. (1990): `n_p` is the period,
//! `n_i`/`n_o` are the inner and outer loop counts, and the bandwidths
//! correspond to `n_s`, `n_t` and `n_l` expressed as fractions of the
//! points seen by each smoother.

use crate::error::{Result, StlError};

/// Default number of inner loop passes (empirically gives good residuals).
const DEFAULT_INNER_LOOP_PASSES: usize = 10;
/// Default number of outer loop iterations. One iteration means the
/// robustness weights are never fed back, i.e. non-robust fitting.
const DEFAULT_ROBUSTNESS_ITERATIONS: usize = 1;
/// Fraction of neighboring points considered when smoothing the seasonal.
const DEFAULT_SEASONAL_BANDWIDTH: f64 = 0.75;
/// Fraction of neighboring points considered when smoothing the trend.
const DEFAULT_TREND_BANDWIDTH: f64 = 0.75;
/// Fraction of neighboring points considered in the low-pass filter.
const DEFAULT_LOW_PASS_BANDWIDTH: f64 = 0.25;
/// Default robustness iterations inside each loess invocation.
const DEFAULT_LOESS_ROBUSTNESS_ITERATIONS: usize = 0;

/// Configuration for [`StlDecomposition`](crate::StlDecomposition).
///
/// Immutable once built; [`check`](StlConfig::check) validates the
/// parameters against a concrete series length and resolves the trend
/// bandwidth for periodic series before any computation starts.
#[derive(Debug, Clone, PartialEq)]
pub struct StlConfig {
    period: usize,
    inner_loop_passes: usize,
    robustness_iterations: usize,
    seasonal_bandwidth: f64,
    trend_bandwidth: f64,
    low_pass_bandwidth: f64,
    loess_robustness_iterations: usize,
    periodic: bool,
}

impl StlConfig {
    /// Create a configuration with the given seasonal period and
    /// default parameters.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            inner_loop_passes: DEFAULT_INNER_LOOP_PASSES,
            robustness_iterations: DEFAULT_ROBUSTNESS_ITERATIONS,
            seasonal_bandwidth: DEFAULT_SEASONAL_BANDWIDTH,
            trend_bandwidth: DEFAULT_TREND_BANDWIDTH,
            low_pass_bandwidth: DEFAULT_LOW_PASS_BANDWIDTH,
            loess_robustness_iterations: DEFAULT_LOESS_ROBUSTNESS_ITERATIONS,
            periodic: true,
        }
    }

    /// Set the number of inner loop passes (n_i).
    pub fn with_inner_loop_passes(mut self, passes: usize) -> Self {
        self.inner_loop_passes = passes;
        self
    }

    /// Set the number of outer (robustness) iterations (n_o).
    /// One iteration disables robustness weighting.
    pub fn with_robustness_iterations(mut self, iterations: usize) -> Self {
        self.robustness_iterations = iterations;
        self
    }

    /// Set the seasonal smoothing bandwidth as a fraction in (0, 1].
    pub fn with_seasonal_bandwidth(mut self, bandwidth: f64) -> Self {
        self.seasonal_bandwidth = bandwidth;
        self
    }

    /// Set the trend smoothing bandwidth as a fraction in (0, 1].
    /// Ignored when the series is declared periodic, in which case the
    /// bandwidth is recomputed from the period and seasonal bandwidth.
    pub fn with_trend_bandwidth(mut self, bandwidth: f64) -> Self {
        self.trend_bandwidth = bandwidth;
        self
    }

    /// Set the low-pass filter bandwidth as a fraction in (0, 1].
    pub fn with_low_pass_bandwidth(mut self, bandwidth: f64) -> Self {
        self.low_pass_bandwidth = bandwidth;
        self
    }

    /// Set the number of robustness iterations inside each loess call.
    pub fn with_loess_robustness_iterations(mut self, iterations: usize) -> Self {
        self.loess_robustness_iterations = iterations;
        self
    }

    /// Declare whether the series is known to be periodic a priori.
    ///
    /// If true, the trend bandwidth is derived in [`check`](StlConfig::check)
    /// and the final seasonal component is averaged to one constant per
    /// phase so that it repeats exactly across cycles.
    pub fn with_periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    /// The number of observations in one seasonal cycle.
    pub fn period(&self) -> usize {
        self.period
    }

    /// The number of inner loop passes.
    pub fn inner_loop_passes(&self) -> usize {
        self.inner_loop_passes
    }

    /// The number of outer (robustness) iterations.
    pub fn robustness_iterations(&self) -> usize {
        self.robustness_iterations
    }

    /// The seasonal smoothing bandwidth.
    pub fn seasonal_bandwidth(&self) -> f64 {
        self.seasonal_bandwidth
    }

    /// The trend smoothing bandwidth.
    pub fn trend_bandwidth(&self) -> f64 {
        self.trend_bandwidth
    }

    /// The low-pass filter bandwidth.
    pub fn low_pass_bandwidth(&self) -> f64 {
        self.low_pass_bandwidth
    }

    /// The number of robustness iterations inside each loess call.
    pub fn loess_robustness_iterations(&self) -> usize {
        self.loess_robustness_iterations
    }

    /// Whether the series is declared periodic.
    pub fn periodic(&self) -> bool {
        self.periodic
    }

    /// Validate this configuration against a series of `n` points and
    /// return a resolved copy.
    ///
    /// For periodic series the trend bandwidth is overridden with
    /// `1.5 * period / (1 - 1.5 / (n * seasonal_bandwidth)) / n`; for
    /// non-periodic series the explicit trend bandwidth must satisfy
    /// the equivalent inequality. Both the trend and seasonal
    /// bandwidths must map to at least two points, the minimum a local
    /// linear fit can use.
    pub fn check(&self, n: usize) -> Result<StlConfig> {
        if self.period < 2 {
            return Err(StlError::InvalidPeriod(self.period));
        }
        if n <= 2 * self.period {
            return Err(StlError::InsufficientData {
                needed: 2 * self.period,
                got: n,
            });
        }
        if self.inner_loop_passes < 1 {
            return Err(StlError::InvalidParameter(
                "inner loop passes must be >= 1".to_string(),
            ));
        }
        if self.robustness_iterations < 1 {
            return Err(StlError::InvalidParameter(
                "robustness iterations must be >= 1".to_string(),
            ));
        }
        for (name, bandwidth) in [
            ("seasonal", self.seasonal_bandwidth),
            ("low-pass", self.low_pass_bandwidth),
        ] {
            if !(bandwidth > 0.0 && bandwidth <= 1.0) {
                return Err(StlError::InvalidParameter(format!(
                    "{} bandwidth must be in (0, 1], got {}",
                    name, bandwidth
                )));
            }
        }

        let mut resolved = self.clone();
        let n_f = n as f64;

        if self.periodic {
            // Derived trend window span, see section 3.4 of the paper.
            let denominator = 1.0 - 1.5 / (n_f * self.seasonal_bandwidth);
            if denominator <= 0.0 {
                return Err(StlError::InvalidParameter(format!(
                    "seasonal bandwidth {} too small for {} points",
                    self.seasonal_bandwidth, n
                )));
            }
            resolved.trend_bandwidth = (1.5 * self.period as f64) / denominator / n_f;
        } else {
            if !(self.trend_bandwidth > 0.0 && self.trend_bandwidth <= 1.0) {
                return Err(StlError::InvalidParameter(format!(
                    "trend bandwidth must be in (0, 1], got {}",
                    self.trend_bandwidth
                )));
            }
            let trend_window = self.trend_bandwidth * n_f;
            let seasonal_window = self.seasonal_bandwidth * n_f;
            let min_trend_window = 1.5 * self.period as f64 / (1.0 - 1.5 / seasonal_window);
            if trend_window < min_trend_window {
                return Err(StlError::InvalidParameter(format!(
                    "trend bandwidth too small: window {} < minimum {}",
                    trend_window, min_trend_window
                )));
            }
        }

        // The trend smoother runs over the full series.
        let trend_points = (resolved.trend_bandwidth * n_f).round() as usize;
        if trend_points < 2 {
            return Err(StlError::InvalidParameter(format!(
                "trend bandwidth {} maps to {} points, need at least 2",
                resolved.trend_bandwidth, trend_points
            )));
        }

        // The seasonal smoother runs over cycle subseries of one point
        // per season.
        let num_seasons = n / self.period;
        let seasonal_points = (resolved.seasonal_bandwidth * num_seasons as f64).round() as usize;
        if seasonal_points < 2 {
            return Err(StlError::InvalidParameter(format!(
                "seasonal bandwidth {} maps to {} points, need at least 2",
                resolved.seasonal_bandwidth, seasonal_points
            )));
        }

        Ok(resolved)
    }
}
