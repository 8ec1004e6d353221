//! Value-at-Risk estimators and their results.
//!
//! - [`parametric`]: variance-covariance VaR from a fitted normal
//! - [`historical`]: empirical percentiles of price and return histories
//! - [`interpretation`]: named transforms of raw VaR numbers
//!
//! Sign convention: VaR is reported as the lower-tail value itself (a return
//! or price change), so losses come out negative.

pub mod historical;
pub mod interpretation;
pub mod parametric;

use serde::{Deserialize, Serialize};

pub use historical::{HistoricalVaR, HistoricalVaRResult};
pub use interpretation::Interpretation;
pub use parametric::{parametric_var, ParametricVaR};

/// VaR at one confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaRPoint {
    /// Confidence level in `(0, 1)`.
    pub confidence: f64,
    /// Raw VaR value.
    pub value: f64,
}

/// VaR per confidence level, in input order, plus optional interpretations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VaRResult {
    points: Vec<VaRPoint>,
    #[serde(skip)]
    interpretations: Vec<Interpretation>,
}

impl VaRResult {
    /// Creates a result from `(level, value)` points.
    #[must_use]
    pub fn new(points: Vec<VaRPoint>) -> Self {
        Self {
            points,
            interpretations: Vec::new(),
        }
    }

    /// Attaches an interpretation.
    #[must_use]
    pub fn with_interpretation(mut self, interpretation: Interpretation) -> Self {
        self.interpretations.push(interpretation);
        self
    }

    /// The raw points in input order.
    #[must_use]
    pub fn points(&self) -> &[VaRPoint] {
        &self.points
    }

    /// Raw values in input order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Confidence levels in input order.
    #[must_use]
    pub fn levels(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.confidence).collect()
    }

    /// Raw value at `confidence`, if that level was computed.
    #[must_use]
    pub fn value_at(&self, confidence: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| (p.confidence - confidence).abs() < 1e-12)
            .map(|p| p.value)
    }

    /// Values transformed by the named interpretation.
    #[must_use]
    pub fn interpreted(&self, name: &str) -> Option<Vec<f64>> {
        let interpretation = self.interpretations.iter().find(|i| i.name() == name)?;
        Some(self.points.iter().map(|p| interpretation.apply(p.value)).collect())
    }

    /// Names of the attached interpretations.
    pub fn interpretations(&self) -> impl Iterator<Item = &str> {
        self.interpretations.iter().map(Interpretation::name)
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no levels were computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Same levels with every value mapped; interpretations are dropped.
    pub(crate) fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| VaRPoint {
                    confidence: p.confidence,
                    value: f(p.value),
                })
                .collect(),
        )
    }
}

impl PartialEq for VaRResult {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}
