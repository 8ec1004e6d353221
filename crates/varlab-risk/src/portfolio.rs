//! Portfolio variance from weights, volatilities and a correlation matrix.
//!
//! `variance = (w ⊙ σ) · R · (w ⊙ σ)ᵀ`

use log::debug;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use varlab_config::RiskConfig;
use varlab_core::{log_return_series, Series};
use varlab_math::correlation::{CorrelationMatrix, DEFAULT_TOLERANCE};
use varlab_math::distributions::StandardNormal;
use varlab_math::linear_algebra::{hadamard, quadratic_form};
use varlab_math::MathError;

use crate::error::{RiskError, RiskResult};

/// How a per-observation standard deviation is scaled into a volatility.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum VolatilityScaling {
    /// Raw standard deviation of returns.
    #[default]
    None,
    /// `std_dev · √N` over the N observed returns.
    SqrtObservations,
    /// `std_dev · √trading_days`.
    Annualised {
        /// Periods per year.
        trading_days: u32,
    },
    /// `std_dev / √trading_days`, turning an annual figure into a daily one.
    Deannualised {
        /// Periods per year.
        trading_days: u32,
    },
}

impl VolatilityScaling {
    /// Scales `std_dev` measured over `observations` returns.
    #[must_use]
    pub fn apply(self, std_dev: f64, observations: usize) -> f64 {
        match self {
            Self::None => std_dev,
            Self::SqrtObservations => std_dev * (observations as f64).sqrt(),
            Self::Annualised { trading_days } => std_dev * f64::from(trading_days).sqrt(),
            Self::Deannualised { trading_days } => std_dev / f64::from(trading_days).sqrt(),
        }
    }
}

/// Correlated portfolio of weighted assets.
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use varlab_math::correlation::CorrelationMatrix;
/// use varlab_risk::PortfolioRisk;
///
/// let corr = CorrelationMatrix::from_matrix(DMatrix::identity(2, 2)).unwrap();
/// let risk = PortfolioRisk::new(corr, vec![0.5, 0.5], vec![0.2, 0.2]).unwrap();
/// assert!((risk.volatility() - 0.2 / 2f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRisk {
    names: Vec<String>,
    correlation: CorrelationMatrix,
    weights: DVector<f64>,
    volatilities: DVector<f64>,
    variance: f64,
}

impl PortfolioRisk {
    /// Builds the portfolio with the default PSD tolerance.
    ///
    /// # Errors
    ///
    /// See [`PortfolioRisk::with_tolerance`].
    pub fn new(
        correlation: CorrelationMatrix,
        weights: Vec<f64>,
        volatilities: Vec<f64>,
    ) -> RiskResult<Self> {
        Self::with_tolerance(correlation, weights, volatilities, DEFAULT_TOLERANCE)
    }

    /// Builds the portfolio with the PSD tolerance of `config`.
    ///
    /// # Errors
    ///
    /// See [`PortfolioRisk::with_tolerance`].
    pub fn from_config(
        correlation: CorrelationMatrix,
        weights: Vec<f64>,
        volatilities: Vec<f64>,
        config: &RiskConfig,
    ) -> RiskResult<Self> {
        Self::with_tolerance(correlation, weights, volatilities, config.psd_tolerance)
    }

    /// Builds the portfolio, accepting eigenvalues down to `-tolerance`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` on mismatched lengths or non-finite inputs
    /// - `NotPositiveSemiDefinite` if the correlation matrix is indefinite
    pub fn with_tolerance(
        correlation: CorrelationMatrix,
        weights: Vec<f64>,
        volatilities: Vec<f64>,
        tolerance: f64,
    ) -> RiskResult<Self> {
        let n = correlation.dim();
        if weights.len() != n || volatilities.len() != n {
            return Err(RiskError::invalid_parameter(
                "weights",
                format!(
                    "{} weights and {} volatilities for {n} assets",
                    weights.len(),
                    volatilities.len()
                ),
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(RiskError::invalid_parameter("weights", "must be finite"));
        }
        if volatilities.iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(RiskError::invalid_parameter(
                "volatilities",
                "must be finite and non-negative",
            ));
        }
        if !correlation.is_positive_semidefinite(tolerance) {
            return Err(RiskError::NotPositiveSemiDefinite {
                min_eigenvalue: correlation.min_eigenvalue(),
            });
        }

        let weights = DVector::from_vec(weights);
        let volatilities = DVector::from_vec(volatilities);
        let scaled = hadamard(&weights, &volatilities)?;
        let variance = quadratic_form(&scaled, correlation.as_matrix())?.max(0.0);

        Ok(Self {
            names: (0..n).map(|i| format!("asset {i}")).collect(),
            correlation,
            weights,
            volatilities,
            variance,
        })
    }

    /// Builds the portfolio from aligned price histories.
    ///
    /// Each history becomes a log return series; its standard deviation,
    /// scaled by `scaling`, is the asset volatility.
    ///
    /// # Errors
    ///
    /// - `Alignment` if the histories differ in length
    /// - `DegenerateDistribution` if an asset never moves
    pub fn from_price_histories(
        histories: &[Series],
        weights: Vec<f64>,
        scaling: VolatilityScaling,
    ) -> RiskResult<Self> {
        let Some(first) = histories.first() else {
            return Err(RiskError::invalid_parameter("histories", "at least one asset is required"));
        };
        if let Some(other) = histories.iter().find(|h| h.len() != first.len()) {
            return Err(RiskError::alignment(format!(
                "price histories differ in length ({} vs {})",
                first.len(),
                other.len()
            )));
        }

        let returns = histories
            .iter()
            .map(log_return_series)
            .collect::<Result<Vec<_>, _>>()?;
        let volatilities = returns
            .iter()
            .map(|r| Ok(scaling.apply(r.std_dev()?, r.len())))
            .collect::<RiskResult<Vec<_>>>()?;

        let slices: Vec<&[f64]> = returns.iter().map(Series::values).collect();
        let correlation = match CorrelationMatrix::from_series(&slices) {
            Err(MathError::ZeroVariance { context }) => {
                return Err(RiskError::DegenerateDistribution { context })
            }
            other => other?,
        };

        debug!(
            "portfolio of {} assets over {} returns",
            histories.len(),
            first.len().saturating_sub(1)
        );

        let mut risk = Self::new(correlation, weights, volatilities)?;
        risk.names = histories
            .iter()
            .enumerate()
            .map(|(i, h)| h.name().map_or_else(|| format!("asset {i}"), str::to_owned))
            .collect();
        Ok(risk)
    }

    /// Asset names, in matrix order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The correlation matrix.
    #[must_use]
    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    /// Asset weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        self.weights.as_slice()
    }

    /// Asset volatilities.
    #[must_use]
    pub fn volatilities(&self) -> &[f64] {
        self.volatilities.as_slice()
    }

    /// Portfolio variance.
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Portfolio volatility, `√variance`.
    #[must_use]
    pub fn volatility(&self) -> f64 {
        self.variance.sqrt()
    }

    /// VaR for a standard normal quantile `z` (e.g. -1.645), `z · volatility`.
    #[must_use]
    pub fn var(&self, z: f64) -> f64 {
        z * self.volatility()
    }

    /// Lower-tail VaR at confidence `ci`, `Φ⁻¹(1 - ci) · volatility`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfidenceLevel` if `ci` is not in `(0, 1)`.
    pub fn var_at(&self, ci: f64) -> RiskResult<f64> {
        if !(ci > 0.0 && ci < 1.0) {
            return Err(RiskError::InvalidConfidenceLevel { level: ci });
        }
        Ok(self.var(StandardNormal.try_inverse_cdf(1.0 - ci)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    fn corr(rho: f64) -> CorrelationMatrix {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, rho, rho, 1.0]);
        CorrelationMatrix::from_matrix(m).unwrap()
    }

    #[test]
    fn test_perfect_correlation_adds_volatility() {
        let risk = PortfolioRisk::new(corr(1.0), vec![0.5, 0.5], vec![0.1, 0.3]).unwrap();
        assert_relative_eq!(risk.volatility(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_hedged_portfolio() {
        let risk = PortfolioRisk::new(corr(-1.0), vec![0.5, 0.5], vec![0.2, 0.2]).unwrap();
        assert_relative_eq!(risk.variance(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_var_scales_volatility() {
        let risk = PortfolioRisk::new(corr(0.3), vec![0.4, 0.6], vec![0.1, 0.2]).unwrap();
        let expected = 0.04_f64.powi(2) + 0.12_f64.powi(2) + 2.0 * 0.3 * 0.04 * 0.12;
        assert_relative_eq!(risk.variance(), expected, epsilon = 1e-12);
        assert_relative_eq!(risk.var(-2.0), -2.0 * expected.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            risk.var_at(0.95).unwrap(),
            -1.644_853_626_951 * expected.sqrt(),
            epsilon = 1e-9
        );
        assert!(risk.var_at(1.0).is_err());
    }

    #[test]
    fn test_rejects_indefinite_matrix() {
        let m = DMatrix::from_row_slice(3, 3, &[1.0, 0.9, -0.9, 0.9, 1.0, 0.9, -0.9, 0.9, 1.0]);
        let corr = CorrelationMatrix::from_matrix(m).unwrap();
        assert!(matches!(
            PortfolioRisk::new(corr, vec![1.0; 3], vec![0.1; 3]),
            Err(RiskError::NotPositiveSemiDefinite { min_eigenvalue }) if min_eigenvalue < 0.0
        ));
    }

    #[test]
    fn test_config_tolerance_admits_rounding_noise() {
        // eigenvalues 0.3801, about 2.62 and about -3.8e-5
        let m = DMatrix::from_row_slice(
            3,
            3,
            &[1.0, 0.9, 0.9, 0.9, 1.0, 0.6199, 0.9, 0.6199, 1.0],
        );
        let corr = CorrelationMatrix::from_matrix(m).unwrap();

        let strict = RiskConfig::standard();
        assert!(matches!(
            PortfolioRisk::from_config(corr.clone(), vec![1.0; 3], vec![0.1; 3], &strict),
            Err(RiskError::NotPositiveSemiDefinite { .. })
        ));

        let loose = RiskConfig::standard().with_psd_tolerance(1e-4);
        let risk = PortfolioRisk::from_config(corr, vec![1.0; 3], vec![0.1; 3], &loose).unwrap();
        assert!(risk.variance() > 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(matches!(
            PortfolioRisk::new(corr(0.0), vec![1.0], vec![0.1, 0.1]),
            Err(RiskError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_from_price_histories() {
        let a = Series::new(vec![100.0, 101.0, 99.5, 102.0, 103.0, 101.0]).with_name("A");
        let b = Series::new(vec![50.0, 50.4, 49.9, 51.0, 51.2, 50.1]).with_name("B");
        let risk = PortfolioRisk::from_price_histories(
            &[a.clone(), b],
            vec![0.5, 0.5],
            VolatilityScaling::SqrtObservations,
        )
        .unwrap();
        assert_eq!(risk.names(), &["A".to_string(), "B".to_string()]);
        assert_eq!(risk.correlation().get(0, 0), 1.0);

        let sd = log_return_series(&a).unwrap().std_dev().unwrap();
        assert_relative_eq!(risk.volatilities()[0], sd * 5.0_f64.sqrt(), epsilon = 1e-12);
        assert!(risk.volatility() > 0.0);
    }

    #[test]
    fn test_from_price_histories_errors() {
        let a = Series::new(vec![100.0, 101.0, 99.5]);
        let short = Series::new(vec![100.0, 101.0]);
        let scaling = VolatilityScaling::None;
        assert!(matches!(
            PortfolioRisk::from_price_histories(&[a.clone(), short], vec![0.5, 0.5], scaling),
            Err(RiskError::Alignment { .. })
        ));

        let flat = Series::new(vec![10.0, 10.0, 10.0]);
        assert!(matches!(
            PortfolioRisk::from_price_histories(&[a, flat], vec![0.5, 0.5], scaling),
            Err(RiskError::DegenerateDistribution { .. })
        ));
    }

    #[test]
    fn test_scaling() {
        assert_eq!(VolatilityScaling::None.apply(0.01, 100), 0.01);
        assert_relative_eq!(
            VolatilityScaling::SqrtObservations.apply(0.01, 100),
            0.1,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            VolatilityScaling::Annualised { trading_days: 252 }.apply(0.01, 5),
            0.01 * 252f64.sqrt(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            VolatilityScaling::Deannualised { trading_days: 256 }.apply(0.16, 5),
            0.01,
            epsilon = 1e-15
        );
    }
}
