//! Error types for the varlab core types.

use thiserror::Error;
use varlab_math::MathError;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A price that cannot seed a return (zero, negative or not finite).
    #[error("Invalid price at index {index}: {value}")]
    InvalidPrice {
        /// Position of the offending price in the series.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Not enough observations for the operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Observations cannot be ordered into a time series.
    #[error("Alignment error: {reason}")]
    Alignment {
        /// Description of the problem.
        reason: String,
    },

    /// Underlying statistics failure.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CoreError {
    /// Creates an alignment error.
    #[must_use]
    pub fn alignment(reason: impl Into<String>) -> Self {
        Self::Alignment {
            reason: reason.into(),
        }
    }
}
