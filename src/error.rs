//! Error types for the stl-decompose library.

use thiserror::Error;

/// Result type alias for decomposition operations.
pub type Result<T> = std::result::Result<T, StlError>;

/// Errors that can occur when configuring or running a decomposition.
///
/// All failures are detected before any computation begins; once a
/// configuration passes validation the decomposition itself cannot
/// fail at runtime.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StlError {
    /// Seasonal period is too small to define a cycle.
    #[error("period must be >= 2, got {0}")]
    InvalidPeriod(usize),

    /// Not enough observations for at least two full seasonal cycles.
    #[error("insufficient data: need more than {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Times and values have different lengths.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid or inconsistent configuration parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
