//! Ordered series of observations.

use serde::{Deserialize, Serialize};
use std::fmt;

use varlab_math::distributions::NormalDistributionParams;
use varlab_math::statistics;

use super::{Sample, UnitOfMeasure};
use crate::error::{CoreError, CoreResult};

/// An ordered sequence of observations, oldest to newest.
///
/// Ordering matters: return transforms pair each value with its predecessor.
///
/// # Example
///
/// ```rust
/// use varlab_core::{Series, UnitOfMeasure};
///
/// let prices = Series::new(vec![10.0, 11.0, 12.0])
///     .with_name("ACME")
///     .with_unit(UnitOfMeasure::Price);
/// assert_eq!(prices.last(), Some(12.0));
/// assert_eq!(prices.mean().unwrap(), 11.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<UnitOfMeasure>,
    values: Vec<f64>,
}

impl Series {
    /// Creates a series from values ordered oldest to newest.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            name: None,
            unit: None,
            values,
        }
    }

    /// Builds a series from timestamped samples, ordering them by time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Alignment` if two samples share a timestamp.
    pub fn from_samples(mut samples: Vec<Sample>) -> CoreResult<Self> {
        samples.sort_by_key(|s| s.at);
        if let Some(pair) = samples.windows(2).find(|w| w[0].at == w[1].at) {
            return Err(CoreError::alignment(format!(
                "duplicate timestamp {}",
                pair[0].at
            )));
        }
        Ok(Self::new(samples.into_iter().map(|s| s.value).collect()))
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the unit of measure.
    pub fn with_unit(mut self, unit: UnitOfMeasure) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Unit of measure, if tagged.
    #[must_use]
    pub fn unit(&self) -> Option<UnitOfMeasure> {
        self.unit
    }

    /// The observations, oldest first.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the series, returning its observations.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Oldest observation.
    #[must_use]
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Newest observation.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Appends an observation as the newest value.
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Iterates the observations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Arithmetic mean.
    pub fn mean(&self) -> CoreResult<f64> {
        Ok(statistics::mean(&self.values)?)
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> CoreResult<f64> {
        Ok(statistics::std_dev(&self.values)?)
    }

    /// Smallest observation.
    pub fn min(&self) -> CoreResult<f64> {
        Ok(statistics::min(&self.values)?)
    }

    /// Largest observation.
    pub fn max(&self) -> CoreResult<f64> {
        Ok(statistics::max(&self.values)?)
    }

    /// Median observation.
    pub fn median(&self) -> CoreResult<f64> {
        Ok(statistics::median(&self.values)?)
    }

    /// Percentile (`pct` in `[0, 100]`) using the shared interpolation rule.
    pub fn percentile(&self, pct: f64) -> CoreResult<f64> {
        Ok(statistics::percentile(&self.values, pct)?)
    }

    /// Fits a normal distribution from the sample mean and standard deviation.
    pub fn distribution(&self) -> CoreResult<NormalDistributionParams> {
        Ok(NormalDistributionParams::from_sample(&self.values)?)
    }

    /// One-line summary: size, fitted distribution and min / median / max.
    pub fn summary(&self) -> CoreResult<String> {
        Ok(format!(
            "n={} [{}] {:.5}/{:.5}/{:.5}",
            self.len(),
            self.distribution()?,
            self.min()?,
            self.median()?,
            self.max()?
        ))
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f64> for Series {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("series");
        match self.unit {
            Some(unit) => write!(f, "{name} ({unit}, n={})", self.len()),
            None => write!(f, "{name} (n={})", self.len()),
        }
    }
}
