//! Error types for barrier operations.
//!
//! Structural problems with a batch (wrong dimension, wrong evaluation tag)
//! and misuse of the order-statistic helpers are reported here. Points whose
//! objective or violation is still undefined are not errors; the barrier
//! skips them silently.

use thiserror::Error;

use crate::point::EvalTag;

/// Main error type for barrier operations.
///
/// # Examples
///
/// ```
/// use aprender_barrier::error::BarrierError;
///
/// let err = BarrierError::dimension_mismatch(2, 3);
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BarrierError {
    /// Point coordinates do not match the barrier's configured dimension.
    #[error("Point dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Configured dimension
        expected: usize,
        /// Dimension of the offending point
        actual: usize,
    },

    /// Point carries no evaluation under the tag the barrier compares with.
    #[error("Invalid evaluation tag: expected {expected}, point has [{found}]")]
    InvalidEvaluationTag {
        /// Tag the barrier was configured for
        expected: EvalTag,
        /// Tags present on the point, comma separated
        found: String,
    },

    /// Order-statistic rank beyond the available candidates.
    #[error("Rank {index} out of range (len={len})")]
    IndexOutOfRange {
        /// Requested rank
        index: usize,
        /// Number of candidates
        len: usize,
    },

    /// Invalid configuration value.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Attempt to raise the threshold or set it to a negative/NaN value.
    #[error("Invalid hMax: cannot set {requested} (current {current})")]
    InvalidHMax {
        /// Requested threshold
        requested: f64,
        /// Current threshold
        current: f64,
    },

    /// Revealing point with a NaN or infinite coordinate.
    #[error("Non-finite coordinates: {coordinates:?}")]
    NonFiniteCoordinates {
        /// Offending coordinates
        coordinates: Vec<f64>,
    },

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl BarrierError {
    /// Create a dimension mismatch error
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an index out of range error
    #[must_use]
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

impl From<serde_json::Error> for BarrierError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON parse error: {err}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, BarrierError>;
