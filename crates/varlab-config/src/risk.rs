//! Risk estimation settings shared by the VaR estimators.

use serde::{Deserialize, Serialize};

use crate::error::{validate_confidence_levels, Validate, ValidationError};
use crate::simulation::default_confidence_levels;

/// Settings for parametric and historical VaR plus diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Configuration name/identifier.
    pub name: String,

    /// Confidence levels to report, in output order.
    #[serde(default = "default_confidence_levels")]
    pub confidence_levels: Vec<f64>,

    /// Holding period used by the parametric estimator, in periods.
    #[serde(default = "default_delta_time")]
    pub delta_time: f64,

    /// Bucket count of the terminal-price histogram.
    #[serde(default = "default_histogram_buckets")]
    pub histogram_buckets: usize,

    /// Run batches on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Smallest eigenvalue accepted as zero in the PSD check.
    #[serde(default = "default_psd_tolerance")]
    pub psd_tolerance: f64,
}

fn default_delta_time() -> f64 {
    1.0
}

fn default_histogram_buckets() -> usize {
    20
}

fn default_parallel() -> bool {
    true
}

fn default_psd_tolerance() -> f64 {
    1e-10
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RiskConfig {
    /// Creates a risk configuration with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            confidence_levels: default_confidence_levels(),
            delta_time: default_delta_time(),
            histogram_buckets: default_histogram_buckets(),
            parallel: default_parallel(),
            psd_tolerance: default_psd_tolerance(),
        }
    }

    /// Standard one-period risk settings at 90/95/99%.
    pub fn standard() -> Self {
        Self::new("STANDARD")
    }

    /// Builder method to set the confidence levels.
    pub fn with_confidence_levels(mut self, levels: Vec<f64>) -> Self {
        self.confidence_levels = levels;
        self
    }

    /// Builder method to set the holding period.
    pub fn with_delta_time(mut self, delta_time: f64) -> Self {
        self.delta_time = delta_time;
        self
    }

    /// Builder method to set the histogram size.
    pub fn with_histogram_buckets(mut self, buckets: usize) -> Self {
        self.histogram_buckets = buckets;
        self
    }

    /// Builder method to set the PSD tolerance.
    pub fn with_psd_tolerance(mut self, tolerance: f64) -> Self {
        self.psd_tolerance = tolerance;
        self
    }

    /// Builder method to toggle parallel batch execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Validate for RiskConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        validate_confidence_levels(&self.confidence_levels, &mut errors);

        if !(self.delta_time.is_finite() && self.delta_time > 0.0) {
            errors.push(ValidationError::with_rule(
                "delta_time",
                "Delta time must be finite and positive",
                "positive_delta_time",
            ));
        }

        if self.histogram_buckets == 0 {
            errors.push(ValidationError::with_rule(
                "histogram_buckets",
                "Histogram needs at least one bucket",
                "positive_buckets",
            ));
        }

        if !(self.psd_tolerance.is_finite() && self.psd_tolerance >= 0.0) {
            errors.push(ValidationError::new(
                "psd_tolerance",
                "Tolerance must be finite and non-negative",
            ));
        }

        errors
    }
}
