//! Historical (empirical percentile) VaR.

use serde::Serialize;

use varlab_config::RiskConfig;
use varlab_core::{return_series, ReturnType, Series};
use varlab_math::statistics::percentile_sorted;

use super::{VaRPoint, VaRResult};
use crate::confidence::ConfidenceLevels;
use crate::error::{RiskError, RiskResult};

/// Percentile VaR read directly off a price history and its return history.
#[derive(Debug, Clone)]
pub struct HistoricalVaR {
    levels: ConfidenceLevels,
    prices: Series,
    returns: Series,
}

impl HistoricalVaR {
    /// Pairs a price history with its return history.
    ///
    /// # Errors
    ///
    /// Returns `Alignment` if prices are empty, if returns are not exactly one
    /// observation shorter than prices, or if the series are tagged with
    /// units and the returns are not a return unit.
    pub fn new(levels: ConfidenceLevels, prices: Series, returns: Series) -> RiskResult<Self> {
        if prices.is_empty() {
            return Err(RiskError::alignment("price history is empty"));
        }
        if returns.len() + 1 != prices.len() {
            return Err(RiskError::alignment(format!(
                "{} returns cannot derive from {} prices",
                returns.len(),
                prices.len()
            )));
        }
        if let (Some(_), Some(unit)) = (prices.unit(), returns.unit()) {
            if !unit.is_return() {
                return Err(RiskError::alignment(format!(
                    "return history is measured in {unit}"
                )));
            }
        }
        Ok(Self {
            levels,
            prices,
            returns,
        })
    }

    /// Derives the return history from `prices`.
    ///
    /// # Errors
    ///
    /// Fails on fewer than two prices or any non-positive price.
    pub fn from_prices(
        levels: ConfidenceLevels,
        prices: Series,
        return_type: ReturnType,
    ) -> RiskResult<Self> {
        let returns = return_series(&prices, return_type)?;
        Self::new(levels, prices, returns)
    }

    /// Derives the return history from `prices` at the levels of `config`.
    ///
    /// # Errors
    ///
    /// As [`from_prices`](Self::from_prices), plus the confidence level
    /// errors of [`ConfidenceLevels::new`].
    pub fn from_config(
        config: &RiskConfig,
        prices: Series,
        return_type: ReturnType,
    ) -> RiskResult<Self> {
        let levels = ConfidenceLevels::new(config.confidence_levels.clone())?;
        Self::from_prices(levels, prices, return_type)
    }

    /// The price history.
    #[must_use]
    pub fn prices(&self) -> &Series {
        &self.prices
    }

    /// The return history.
    #[must_use]
    pub fn returns(&self) -> &Series {
        &self.returns
    }

    /// Percentile of prices and of returns at `1 - ci` for each level.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when the return history is empty.
    pub fn compute(&self) -> RiskResult<HistoricalVaRResult> {
        let last_price = self
            .prices
            .last()
            .ok_or_else(|| RiskError::alignment("price history is empty"))?;
        Ok(HistoricalVaRResult {
            price_results: self.tail_percentiles(self.prices.values())?,
            return_results: self.tail_percentiles(self.returns.values())?,
            last_price,
        })
    }

    fn tail_percentiles(&self, data: &[f64]) -> RiskResult<VaRResult> {
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        let points = self
            .levels
            .tail_percentiles()
            .map(|(confidence, pct)| {
                Ok(VaRPoint {
                    confidence,
                    value: percentile_sorted(&sorted, pct)?,
                })
            })
            .collect::<RiskResult<Vec<_>>>()?;
        Ok(VaRResult::new(points))
    }
}

/// Historical percentiles per confidence level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalVaRResult {
    /// Price percentile at `1 - ci`.
    pub price_results: VaRResult,
    /// Return percentile at `1 - ci`.
    pub return_results: VaRResult,
    /// Newest price of the history.
    pub last_price: f64,
}

impl HistoricalVaRResult {
    /// Price percentile minus the newest price.
    #[must_use]
    pub fn price_delta(&self, ci: f64) -> Option<f64> {
        self.price_results.value_at(ci).map(|p| p - self.last_price)
    }

    /// Price change implied by applying the return percentile to the newest price.
    #[must_use]
    pub fn return_delta(&self, ci: f64, return_type: ReturnType) -> Option<f64> {
        self.return_results
            .value_at(ci)
            .map(|r| return_type.inverse(r, self.last_price) - self.last_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use varlab_core::UnitOfMeasure;

    fn prices() -> Series {
        Series::new(vec![100.0, 102.0, 101.0, 99.0, 103.0, 104.0, 98.0, 100.0, 101.0, 102.0, 100.0])
            .with_unit(UnitOfMeasure::Price)
    }

    #[test]
    fn test_alignment_checks() {
        let levels = ConfidenceLevels::standard();
        let p = prices();
        let short = Series::new(vec![0.01; 3]);
        assert!(matches!(
            HistoricalVaR::new(levels.clone(), p.clone(), short),
            Err(RiskError::Alignment { .. })
        ));

        let mislabelled = Series::new(vec![0.01; 10]).with_unit(UnitOfMeasure::Price);
        assert!(matches!(
            HistoricalVaR::new(levels.clone(), p, mislabelled),
            Err(RiskError::Alignment { .. })
        ));

        assert!(HistoricalVaR::new(levels, Series::default(), Series::default()).is_err());
    }

    #[test]
    fn test_percentiles() {
        let var = HistoricalVaR::from_prices(
            ConfidenceLevels::new(vec![0.9]).unwrap(),
            prices(),
            ReturnType::Classic,
        )
        .unwrap();
        let result = var.compute().unwrap();

        // sorted prices: 98 99 100 100 100 101 101 102 102 103 104; 10th pct at rank 1.0
        assert_relative_eq!(result.price_results.value_at(0.9).unwrap(), 99.0, epsilon = 1e-12);
        assert_relative_eq!(result.price_delta(0.9).unwrap(), -1.0, epsilon = 1e-12);
        assert_eq!(result.last_price, 100.0);

        let r = result.return_results.value_at(0.9).unwrap();
        assert!(r < 0.0);
        assert_relative_eq!(
            result.return_delta(0.9, ReturnType::Classic).unwrap(),
            100.0 * r,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_from_config() {
        let config = RiskConfig::standard().with_confidence_levels(vec![0.9]);
        let result = HistoricalVaR::from_config(&config, prices(), ReturnType::Classic)
            .unwrap()
            .compute()
            .unwrap();
        assert_eq!(result.price_results.levels(), vec![0.9]);
        assert_relative_eq!(result.price_results.value_at(0.9).unwrap(), 99.0, epsilon = 1e-12);
    }

    #[test]
    fn test_monotone() {
        let var =
            HistoricalVaR::from_prices(ConfidenceLevels::standard(), prices(), ReturnType::Log)
                .unwrap();
        let values = var.compute().unwrap().return_results.values();
        assert!(values[0] >= values[1] && values[1] >= values[2]);
    }
}
