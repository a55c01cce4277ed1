//! # stl-decompose
//!
//! Seasonal-Trend decomposition of time series using LOESS (STL).
//!
//! STL splits a univariate series into three additive components:
//! - Trend: the underlying long-term pattern
//! - Seasonal: the repeating pattern within each period
//! - Remainder: the residual after removing trend and seasonal
//!
//! The algorithm follows Cleveland et al., "STL: A Seasonal-Trend
//! Decomposition Procedure Based on Loess", Journal of Official
//! Statistics, Vol. 6 No. 1, 1990, pp. 3-73: an outer robustness loop
//! around an inner seasonal/trend refinement loop, with cycle-subseries
//! smoothing, a three-stage low-pass filter, and locally weighted
//! linear regression throughout.
//!
//! ## Example
//!
//! ```
//! use stl_decompose::{StlConfig, StlDecomposition};
//!
//! let times: Vec<f64> = (0..120).map(|i| i as f64).collect();
//! let values: Vec<f64> = times.iter().map(|t| t.sin() + 10.0).collect();
//!
//! let stl = StlDecomposition::new(StlConfig::new(12));
//! let result = stl.decompose(&times, &values).unwrap();
//!
//! for i in 0..values.len() {
//!     let reconstructed = result.trend[i] + result.seasonal[i] + result.remainder[i];
//!     assert!((values[i] - reconstructed).abs() < 1e-9);
//! }
//! ```

#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod error;
pub mod filter;
pub mod loess;
pub mod robust;
pub mod stl;
pub mod subseries;

pub use config::StlConfig;
pub use error::{Result, StlError};
pub use stl::{StlDecomposition, StlResult};

pub mod prelude {
    pub use crate::config::StlConfig;
    pub use crate::error::{Result, StlError};
    pub use crate::stl::{StlDecomposition, StlResult};
}
