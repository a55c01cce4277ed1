//! The STL decomposition engine.
//!
//! Drives the outer robustness loop and the six-step inner loop of
//! Cleveland et al. (1990) over explicit working buffers, then applies
//! the final periodic seasonal correction.

use crate::config::StlConfig;
use crate::error::{Result, StlError};
use crate::filter::low_pass_filter;
use crate::loess::loess_smooth;
use crate::robust::robustness_weights;
use crate::subseries::{combine, pad_edges, pad_weights, CycleSubseries};

/// Result of an STL decomposition.
///
/// All five sequences have the length of the input, and
/// `values[i] == trend[i] + seasonal[i] + remainder[i]` holds by
/// construction: the remainder is always computed as the residual.
#[derive(Debug, Clone)]
pub struct StlResult {
    /// The input time values, echoed for convenience.
    pub times: Vec<f64>,
    /// The input series values, echoed for convenience.
    pub values: Vec<f64>,
    /// Trend component.
    pub trend: Vec<f64>,
    /// Seasonal component.
    pub seasonal: Vec<f64>,
    /// Remainder component.
    pub remainder: Vec<f64>,
}

impl StlResult {
    /// Seasonal strength in `[0, 1]`; values near 1 indicate a strong
    /// seasonal component.
    pub fn seasonal_strength(&self) -> f64 {
        component_strength(&self.seasonal, &self.remainder)
    }

    /// Trend strength in `[0, 1]`; values near 1 indicate a strong
    /// trend component.
    pub fn trend_strength(&self) -> f64 {
        component_strength(&self.trend, &self.remainder)
    }
}

fn component_strength(component: &[f64], remainder: &[f64]) -> f64 {
    let combined: Vec<f64> = component
        .iter()
        .zip(remainder.iter())
        .map(|(c, r)| c + r)
        .collect();
    let var_combined = variance(&combined);
    if var_combined < 1e-10 {
        return 0.0;
    }
    (1.0 - variance(remainder) / var_combined).max(0.0)
}

fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean: f64 = values.iter().sum::<f64>() / n as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// STL decomposition of a univariate time series.
///
/// The engine is stateless across calls; each decomposition works on
/// freshly allocated buffers, so one instance may be shared freely.
#[derive(Debug, Clone)]
pub struct StlDecomposition {
    config: StlConfig,
}

impl StlDecomposition {
    /// Create a decomposition engine from a configuration.
    pub fn new(config: StlConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default parameters for the given period.
    pub fn with_period(period: usize) -> Self {
        Self::new(StlConfig::new(period))
    }

    /// The configuration this engine runs with.
    pub fn config(&self) -> &StlConfig {
        &self.config
    }

    /// Decompose the series into trend, seasonal, and remainder.
    ///
    /// `times` must be non-decreasing and the same length as `values`.
    /// The configuration is validated against the series length before
    /// any computation; after validation the loop structure is fully
    /// deterministic and runs exactly
    /// `robustness_iterations * inner_loop_passes` passes.
    pub fn decompose(&self, times: &[f64], values: &[f64]) -> Result<StlResult> {
        if times.len() != values.len() {
            return Err(StlError::DimensionMismatch {
                expected: times.len(),
                got: values.len(),
            });
        }

        let n = values.len();
        let config = self.config.check(n)?;
        let period = config.period();

        let mut trend = vec![0.0; n];
        let mut seasonal = vec![0.0; n];
        let mut remainder = vec![0.0; n];
        let mut detrended = vec![0.0; n];
        let mut robustness: Option<Vec<f64>> = None;

        // The smoothed cycle-subseries carry one extrapolated cycle on
        // each end; the low-pass stage runs over this padded buffer on
        // an index time axis.
        let combined_len = n + 2 * period;
        let combined_times: Vec<f64> = (0..combined_len).map(|i| i as f64).collect();

        for _outer in 0..config.robustness_iterations() {
            for _inner in 0..config.inner_loop_passes() {
                // Step 1: de-trending.
                for i in 0..n {
                    detrended[i] = values[i] - trend[i];
                }

                // Step 2: cycle-subseries smoothing.
                let subseries =
                    CycleSubseries::split(times, &detrended, robustness.as_deref(), period);
                let mut smoothed_phases = Vec::with_capacity(period);
                for phase in 0..period {
                    let (padded_times, padded_values) =
                        pad_edges(&subseries.times[phase], &subseries.values[phase]);
                    let padded_phase_weights = subseries
                        .weights
                        .as_ref()
                        .map(|weights| pad_weights(&weights[phase]));

                    smoothed_phases.push(loess_smooth(
                        &padded_times,
                        &padded_values,
                        config.seasonal_bandwidth(),
                        padded_phase_weights.as_deref(),
                        config.loess_robustness_iterations(),
                    ));
                }
                let combined = combine(&smoothed_phases, period, combined_len);

                // Step 3: low-pass filtering of the combined subseries.
                let filtered = low_pass_filter(
                    &combined_times,
                    &combined,
                    period,
                    config.low_pass_bandwidth(),
                    config.loess_robustness_iterations(),
                );

                // Step 4: de-trend the smoothed cycle-subseries; the
                // offset skips the leading padded cycle.
                for i in 0..n {
                    seasonal[i] = combined[i + period] - filtered[i + period];
                }

                // Step 5: de-seasonalizing.
                for i in 0..n {
                    trend[i] = values[i] - seasonal[i];
                }

                // Step 6: trend smoothing.
                trend = loess_smooth(
                    times,
                    &trend,
                    config.trend_bandwidth(),
                    robustness.as_deref(),
                    config.loess_robustness_iterations(),
                );
            }

            for i in 0..n {
                remainder[i] = values[i] - trend[i] - seasonal[i];
            }
            robustness = Some(robustness_weights(&remainder));
        }

        if config.periodic() {
            // Force the seasonal pattern to repeat exactly by averaging
            // each phase to a single constant.
            for phase in 0..period {
                let mut sum = 0.0;
                let mut count = 0usize;
                let mut idx = phase;
                while idx < n {
                    sum += seasonal[idx];
                    count += 1;
                    idx += period;
                }
                let mean = sum / count as f64;

                idx = phase;
                while idx < n {
                    seasonal[idx] = mean;
                    idx += period;
                }
            }

            for i in 0..n {
                remainder[i] = values[i] - trend[i] - seasonal[i];
            }
        }

        Ok(StlResult {
            times: times.to_vec(),
            values: values.to_vec(),
            trend,
            seasonal,
            remainder,
        })
    }
}
