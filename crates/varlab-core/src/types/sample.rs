//! Timestamped observations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single timestamped observation, the raw form loaders produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Observation time.
    pub at: NaiveDateTime,
    /// Observed value.
    pub value: f64,
}

impl Sample {
    /// Creates a new sample.
    #[must_use]
    pub fn new(at: NaiveDateTime, value: f64) -> Self {
        Self { at, value }
    }
}
