//! Error types for risk estimation.

use thiserror::Error;
use varlab_core::CoreError;
use varlab_math::MathError;

use crate::draws::DrawKey;

/// A specialized Result type for risk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors raised while configuring or running a VaR estimator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Confidence level outside the open unit interval.
    #[error("Invalid confidence level {level}: must be in (0, 1)")]
    InvalidConfidenceLevel {
        /// The offending level.
        level: f64,
    },

    /// The same confidence level was supplied twice.
    #[error("Duplicate confidence level {level}")]
    DuplicateConfidenceLevel {
        /// The repeated level.
        level: f64,
    },

    /// A run parameter is out of range.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Price and return histories do not line up.
    #[error("Alignment error: {reason}")]
    Alignment {
        /// Description of the mismatch.
        reason: String,
    },

    /// Correlation matrix has a negative eigenvalue beyond tolerance.
    #[error("Correlation matrix is not positive semidefinite (min eigenvalue {min_eigenvalue})")]
    NotPositiveSemiDefinite {
        /// Smallest eigenvalue found.
        min_eigenvalue: f64,
    },

    /// An input series has no spread where one is required.
    #[error("Degenerate distribution: {context}")]
    DegenerateDistribution {
        /// Where the degenerate input was found.
        context: String,
    },

    /// A simulated path overflowed or produced NaN.
    #[error("Scenario {scenario} produced a non-finite terminal price")]
    NonFinitePath {
        /// Index of the failing scenario.
        scenario: usize,
    },

    /// Replay asked for more draws than were recorded.
    #[error("Replay exhausted after {recorded} draws (requested {key})")]
    ReplayExhausted {
        /// Number of draws in the log.
        recorded: usize,
        /// Key of the draw that could not be served.
        key: DrawKey,
    },

    /// Replay or rewind requested without a recording.
    #[error("No recorded draws available for replay")]
    NoRecording,

    /// Core type failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Statistics failure.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl RiskError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Creates an alignment error.
    #[must_use]
    pub fn alignment(reason: impl Into<String>) -> Self {
        Self::Alignment {
            reason: reason.into(),
        }
    }
}
