//! File error types.

use thiserror::Error;
use varlab_risk::RiskError;

/// File operation result type.
pub type FileResult<T> = Result<T, FileError>;

/// Errors reading or writing varlab files.
#[derive(Debug, Error)]
pub enum FileError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Well-formed CSV with unexpected content.
    #[error("Format error at line {line}: {reason}")]
    Format {
        /// One-based line number.
        line: usize,
        /// What is wrong.
        reason: String,
    },

    /// Content rejected when rebuilding the draw log.
    #[error("Invalid draw log: {0}")]
    Risk(#[from] RiskError),
}

impl FileError {
    /// Creates a format error.
    pub fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }
}
