//! Validated confidence level lists.

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// A non-empty list of distinct confidence levels in `(0, 1)`.
///
/// Order is preserved: every result lists its levels in the order given here.
///
/// ```rust
/// use varlab_risk::ConfidenceLevels;
///
/// let levels = ConfidenceLevels::new(vec![0.99, 0.95]).unwrap();
/// assert_eq!(levels.as_slice(), &[0.99, 0.95]);
/// assert!(ConfidenceLevels::new(vec![0.95, 0.95]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ConfidenceLevels(Vec<f64>);

impl ConfidenceLevels {
    /// Validates and wraps a list of levels.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the list is empty
    /// - `InvalidConfidenceLevel` for a level outside `(0, 1)`
    /// - `DuplicateConfidenceLevel` for a repeated level
    pub fn new(levels: Vec<f64>) -> RiskResult<Self> {
        if levels.is_empty() {
            return Err(RiskError::invalid_parameter(
                "confidence_levels",
                "at least one level is required",
            ));
        }
        for (i, &level) in levels.iter().enumerate() {
            if !(level > 0.0 && level < 1.0) {
                return Err(RiskError::InvalidConfidenceLevel { level });
            }
            if levels[..i].contains(&level) {
                return Err(RiskError::DuplicateConfidenceLevel { level });
            }
        }
        Ok(Self(levels))
    }

    /// 90%, 95% and 99%.
    #[must_use]
    pub fn standard() -> Self {
        Self(vec![0.90, 0.95, 0.99])
    }

    /// The levels in order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterates the levels in order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Number of levels (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for the `len` / `is_empty` pair.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lower-tail probability `1 - ci` of each level, as a percentile in `[0, 100]`.
    pub(crate) fn tail_percentiles(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.iter().map(|ci| (ci, (1.0 - ci) * 100.0))
    }
}

impl Default for ConfidenceLevels {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<f64>> for ConfidenceLevels {
    type Error = RiskError;

    fn try_from(levels: Vec<f64>) -> RiskResult<Self> {
        Self::new(levels)
    }
}

impl From<ConfidenceLevels> for Vec<f64> {
    fn from(levels: ConfidenceLevels) -> Self {
        levels.0
    }
}
