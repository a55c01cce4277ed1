//! Property-based tests for the decomposition.
//!
//! These verify invariants that should hold for all valid inputs,
//! using randomly generated seasonal series.

use proptest::prelude::*;
use stl_decompose::{StlConfig, StlDecomposition};

const PERIOD: usize = 12;

fn index_times(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// Strategy for seasonal series with random level, amplitude, slope,
/// and phase. Lengths stay above the two-full-cycles minimum.
fn seasonal_values_strategy() -> impl Strategy<Value = Vec<f64>> {
    (25usize..160).prop_flat_map(|len| {
        (10.0..100.0_f64, 1.0..20.0_f64, -0.5..0.5_f64, 0.0..6.28_f64).prop_map(
            move |(base, amplitude, slope, phase)| {
                (0..len)
                    .map(|i| {
                        let angle =
                            2.0 * std::f64::consts::PI * i as f64 / PERIOD as f64 + phase;
                        base + slope * i as f64 + amplitude * angle.sin()
                    })
                    .collect()
            },
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn reconstruction_identity(values in seasonal_values_strategy()) {
        let times = index_times(values.len());
        let result = StlDecomposition::with_period(PERIOD)
            .decompose(&times, &values)
            .unwrap();

        for i in 0..values.len() {
            let reconstructed = result.trend[i] + result.seasonal[i] + result.remainder[i];
            let scale = 1.0 + values[i].abs() + result.trend[i].abs() + result.seasonal[i].abs();
            prop_assert!(
                (values[i] - reconstructed).abs() <= 1e-9 * scale,
                "reconstruction failed at {}: {} vs {}",
                i,
                values[i],
                reconstructed
            );
        }
    }

    #[test]
    fn output_lengths_match_input(values in seasonal_values_strategy()) {
        let times = index_times(values.len());
        let result = StlDecomposition::with_period(PERIOD)
            .decompose(&times, &values)
            .unwrap();

        prop_assert_eq!(result.times.len(), values.len());
        prop_assert_eq!(result.values.len(), values.len());
        prop_assert_eq!(result.trend.len(), values.len());
        prop_assert_eq!(result.seasonal.len(), values.len());
        prop_assert_eq!(result.remainder.len(), values.len());
    }

    #[test]
    fn periodic_seasonal_repeats(values in seasonal_values_strategy()) {
        let times = index_times(values.len());
        let result = StlDecomposition::with_period(PERIOD)
            .decompose(&times, &values)
            .unwrap();

        for i in PERIOD..values.len() {
            prop_assert_eq!(
                result.seasonal[i],
                result.seasonal[i % PERIOD],
                "seasonal diverged between phases at index {}",
                i
            );
        }
    }

    #[test]
    fn all_outputs_are_finite(values in seasonal_values_strategy()) {
        let times = index_times(values.len());
        let result = StlDecomposition::with_period(PERIOD)
            .decompose(&times, &values)
            .unwrap();

        for i in 0..values.len() {
            prop_assert!(result.trend[i].is_finite());
            prop_assert!(result.seasonal[i].is_finite());
            prop_assert!(result.remainder[i].is_finite());
        }
    }

    #[test]
    fn robust_runs_preserve_identity(
        values in seasonal_values_strategy(),
        outer in 2usize..4
    ) {
        let times = index_times(values.len());
        let config = StlConfig::new(PERIOD).with_robustness_iterations(outer);
        let result = StlDecomposition::new(config)
            .decompose(&times, &values)
            .unwrap();

        for i in 0..values.len() {
            let reconstructed = result.trend[i] + result.seasonal[i] + result.remainder[i];
            let scale = 1.0 + values[i].abs() + result.trend[i].abs() + result.seasonal[i].abs();
            prop_assert!((values[i] - reconstructed).abs() <= 1e-9 * scale);
        }
    }
}
