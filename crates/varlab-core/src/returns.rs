//! Return transforms.
//!
//! Converts prices into classic or logarithmic returns and back. Return
//! series pair consecutive observations of an oldest-to-newest price series:
//! the first price only seeds the walk, so N prices yield N - 1 returns and
//! return `i` describes `prices[i + 1]` relative to `prices[i]`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::{Series, UnitOfMeasure};

/// Classic return: `(now - prev) / prev`.
#[inline]
#[must_use]
pub fn classic_return(now: f64, prev: f64) -> f64 {
    (now - prev) / prev
}

/// Inverse of [`classic_return`]: `price + price * r`.
#[inline]
#[must_use]
pub fn classic_return_inverse(r: f64, price: f64) -> f64 {
    price + price * r
}

/// Logarithmic return: `ln(now / prev)`.
#[inline]
#[must_use]
pub fn log_return(now: f64, prev: f64) -> f64 {
    (now / prev).ln()
}

/// Inverse of [`log_return`]: `price * e^r`.
#[inline]
#[must_use]
pub fn log_return_inverse(r: f64, price: f64) -> f64 {
    price * r.exp()
}

/// How returns are measured and compounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    /// Arithmetic returns, compounded additively on the running price.
    Classic,
    /// Logarithmic returns, compounded geometrically.
    #[default]
    Log,
}

impl ReturnType {
    /// Return of `now` relative to `prev`.
    #[inline]
    #[must_use]
    pub fn ret(self, now: f64, prev: f64) -> f64 {
        match self {
            Self::Classic => classic_return(now, prev),
            Self::Log => log_return(now, prev),
        }
    }

    /// Price implied by applying return `r` to `price`.
    #[inline]
    #[must_use]
    pub fn inverse(self, r: f64, price: f64) -> f64 {
        match self {
            Self::Classic => classic_return_inverse(r, price),
            Self::Log => log_return_inverse(r, price),
        }
    }

    /// Advances `price` by one step return.
    ///
    /// Classic: `price += price * step`; log: `price *= e^step`.
    #[inline]
    #[must_use]
    pub fn compound(self, price: f64, step: f64) -> f64 {
        self.inverse(step, price)
    }

    /// Unit of measure of a series of this return type.
    #[must_use]
    pub fn unit(self) -> UnitOfMeasure {
        match self {
            Self::Classic => UnitOfMeasure::ReturnClassic,
            Self::Log => UnitOfMeasure::ReturnLog,
        }
    }

    /// Short label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a return series from an oldest-to-newest price series.
///
/// # Errors
///
/// - `CoreError::InsufficientData` with fewer than two prices
/// - `CoreError::InvalidPrice` if any price is zero, negative or not finite
pub fn return_series(prices: &Series, return_type: ReturnType) -> CoreResult<Series> {
    let values = prices.values();
    if values.len() < 2 {
        return Err(CoreError::InsufficientData {
            required: 2,
            actual: values.len(),
        });
    }
    if let Some((index, &value)) = values
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        return Err(CoreError::InvalidPrice { index, value });
    }

    let returns: Vec<f64> = values
        .windows(2)
        .map(|w| return_type.ret(w[1], w[0]))
        .collect();

    let mut series = Series::new(returns).with_unit(return_type.unit());
    if let Some(name) = prices.name() {
        series = series.with_name(format!("{name} ({return_type} returns)"));
    }
    Ok(series)
}

/// Classic return series of `prices`.
pub fn classic_return_series(prices: &Series) -> CoreResult<Series> {
    return_series(prices, ReturnType::Classic)
}

/// Logarithmic return series of `prices`.
pub fn log_return_series(prices: &Series) -> CoreResult<Series> {
    return_series(prices, ReturnType::Log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_classic_return() {
        assert_relative_eq!(classic_return(110.0, 100.0), 0.1, epsilon = 1e-15);
        assert_relative_eq!(classic_return_inverse(0.1, 100.0), 110.0, epsilon = 1e-12);
    }

    #[test]
    fn test_log_return() {
        assert_relative_eq!(log_return(110.0, 100.0), 1.1_f64.ln(), epsilon = 1e-15);
        assert_relative_eq!(
            log_return_inverse(1.1_f64.ln(), 100.0),
            110.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_series_alignment() {
        let prices = Series::new(vec![100.0, 110.0, 99.0]).with_name("X");
        let returns = classic_return_series(&prices).unwrap();
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns.values()[0], 0.1, epsilon = 1e-15);
        assert_relative_eq!(returns.values()[1], -0.1, epsilon = 1e-15);
        assert_eq!(returns.unit(), Some(UnitOfMeasure::ReturnClassic));
        assert_eq!(returns.name(), Some("X (classic returns)"));
    }

    #[test]
    fn test_rejects_non_positive_prices() {
        let prices = Series::new(vec![100.0, 0.0, 99.0]);
        assert_eq!(
            log_return_series(&prices),
            Err(CoreError::InvalidPrice {
                index: 1,
                value: 0.0
            })
        );
        let prices = Series::new(vec![-1.0, 2.0]);
        assert!(classic_return_series(&prices).is_err());
    }

    #[test]
    fn test_rejects_short_series() {
        let prices = Series::new(vec![100.0]);
        assert!(matches!(
            log_return_series(&prices),
            Err(CoreError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_compound_matches_inverse() {
        assert_relative_eq!(
            ReturnType::Classic.compound(100.0, 0.02),
            102.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            ReturnType::Log.compound(100.0, 0.02),
            100.0 * 0.02_f64.exp(),
            epsilon = 1e-12
        );
    }
}
