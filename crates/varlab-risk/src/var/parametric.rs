//! Parametric (variance-covariance) VaR.

use varlab_config::RiskConfig;
use varlab_math::distributions::{NormalDistributionParams, StandardNormal};

use super::{Interpretation, VaRPoint, VaRResult};
use crate::confidence::ConfidenceLevels;
use crate::error::{RiskError, RiskResult};

/// Lower-tail VaR of a normal over a holding period of `delta_time` periods:
/// `mean * dt + std_dev * Φ⁻¹(1 - ci) * √dt`.
///
/// One-sided: at `ci = 0.95` the quantile is Φ⁻¹(0.05) ≈ -1.645.
///
/// # Errors
///
/// Returns an error if `ci` is not in `(0, 1)` or `delta_time` is not finite
/// and positive.
///
/// ```rust
/// use varlab_risk::parametric_var;
///
/// let var = parametric_var(0.0, 0.01, 0.95, 1.0).unwrap();
/// assert!((var + 0.016449).abs() < 1e-5);
/// ```
pub fn parametric_var(mean: f64, std_dev: f64, ci: f64, delta_time: f64) -> RiskResult<f64> {
    if !(ci > 0.0 && ci < 1.0) {
        return Err(RiskError::InvalidConfidenceLevel { level: ci });
    }
    check_delta_time(delta_time)?;
    let z = StandardNormal.try_inverse_cdf(1.0 - ci)?;
    Ok(mean * delta_time + std_dev * z * delta_time.sqrt())
}

fn check_delta_time(delta_time: f64) -> RiskResult<()> {
    if delta_time.is_finite() && delta_time > 0.0 {
        Ok(())
    } else {
        Err(RiskError::invalid_parameter(
            "delta_time",
            format!("must be finite and positive, got {delta_time}"),
        ))
    }
}

/// Parametric VaR estimator over a set of confidence levels.
///
/// # Example
///
/// ```rust
/// use varlab_core::ReturnType;
/// use varlab_math::distributions::NormalDistributionParams;
/// use varlab_risk::{ConfidenceLevels, Interpretation, ParametricVaR};
///
/// let dist = NormalDistributionParams::new(0.0, 0.01).unwrap();
/// let result = ParametricVaR::new(dist, ConfidenceLevels::standard())
///     .with_delta_time(10.0)
///     .with_interpretation(Interpretation::price_delta(ReturnType::Log, 100.0))
///     .compute()
///     .unwrap();
/// assert_eq!(result.len(), 3);
/// assert!(result.interpreted("Price Delta").unwrap()[2] < 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ParametricVaR {
    distribution: NormalDistributionParams,
    levels: ConfidenceLevels,
    delta_time: f64,
    interpretations: Vec<Interpretation>,
}

impl ParametricVaR {
    /// Creates an estimator with a one-period holding time.
    #[must_use]
    pub fn new(distribution: NormalDistributionParams, levels: ConfidenceLevels) -> Self {
        Self {
            distribution,
            levels,
            delta_time: 1.0,
            interpretations: Vec::new(),
        }
    }

    /// Creates an estimator with the levels and holding period of `config`.
    ///
    /// # Errors
    ///
    /// Returns the confidence level errors of [`ConfidenceLevels::new`].
    pub fn from_config(
        distribution: NormalDistributionParams,
        config: &RiskConfig,
    ) -> RiskResult<Self> {
        let levels = ConfidenceLevels::new(config.confidence_levels.clone())?;
        Ok(Self::new(distribution, levels).with_delta_time(config.delta_time))
    }

    /// Sets the holding period in periods; checked by [`compute`](Self::compute).
    #[must_use]
    pub fn with_delta_time(mut self, delta_time: f64) -> Self {
        self.delta_time = delta_time;
        self
    }

    /// Adds an interpretation carried onto the result.
    #[must_use]
    pub fn with_interpretation(mut self, interpretation: Interpretation) -> Self {
        self.interpretations.push(interpretation);
        self
    }

    /// The distribution being evaluated.
    #[must_use]
    pub fn distribution(&self) -> NormalDistributionParams {
        self.distribution
    }

    /// Holding period.
    #[must_use]
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Computes VaR at every level, in input order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the holding period is not finite and positive.
    pub fn compute(&self) -> RiskResult<VaRResult> {
        check_delta_time(self.delta_time)?;
        let points = self
            .levels
            .iter()
            .map(|ci| {
                Ok(VaRPoint {
                    confidence: ci,
                    value: parametric_var(
                        self.distribution.mean(),
                        self.distribution.std_dev(),
                        ci,
                        self.delta_time,
                    )?,
                })
            })
            .collect::<RiskResult<Vec<_>>>()?;

        Ok(self
            .interpretations
            .iter()
            .cloned()
            .fold(VaRResult::new(points), VaRResult::with_interpretation))
    }
}
