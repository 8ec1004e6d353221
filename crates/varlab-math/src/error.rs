//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Probability outside the open unit interval.
    #[error("Invalid probability: {p} is outside (0, 1)")]
    InvalidProbability {
        /// The offending probability.
        p: f64,
    },

    /// Matrix or vector dimensions are incompatible.
    #[error("Incompatible dimensions: ({rows1}x{cols1}) and ({rows2}x{cols2})")]
    DimensionMismatch {
        /// Rows in first operand.
        rows1: usize,
        /// Columns in first operand.
        cols1: usize,
        /// Rows in second operand.
        rows2: usize,
        /// Columns in second operand.
        cols2: usize,
    },

    /// Matrix is not symmetric.
    #[error("Matrix is not symmetric at ({row}, {col})")]
    NotSymmetric {
        /// Row of the first asymmetric entry.
        row: usize,
        /// Column of the first asymmetric entry.
        col: usize,
    },

    /// A series has zero variance where a spread is required.
    #[error("Zero variance: {context}")]
    ZeroVariance {
        /// Where the degenerate series was encountered.
        context: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a zero variance error.
    #[must_use]
    pub fn zero_variance(context: impl Into<String>) -> Self {
        Self::ZeroVariance {
            context: context.into(),
        }
    }
}
