//! Descriptive statistics.
//!
//! Every estimator in the workspace reads quantiles through
//! [`percentile_sorted`], which uses linear interpolation between order
//! statistics (the `(n - 1) * p` rule, identical to Excel's
//! `PERCENTILE.INC` and R's type 7).

use statrs::statistics::Statistics;

use crate::error::{MathError, MathResult};

fn ensure_len(data: &[f64], required: usize) -> MathResult<()> {
    if data.len() < required {
        return Err(MathError::insufficient_data(required, data.len()));
    }
    Ok(())
}

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> MathResult<f64> {
    ensure_len(data, 1)?;
    Ok(data.iter().mean())
}

/// Sample variance (n - 1 denominator).
pub fn variance(data: &[f64]) -> MathResult<f64> {
    ensure_len(data, 2)?;
    Ok(data.iter().variance())
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(data: &[f64]) -> MathResult<f64> {
    ensure_len(data, 2)?;
    Ok(data.iter().std_dev())
}

/// Smallest value.
pub fn min(data: &[f64]) -> MathResult<f64> {
    ensure_len(data, 1)?;
    Ok(data.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Largest value.
pub fn max(data: &[f64]) -> MathResult<f64> {
    ensure_len(data, 1)?;
    Ok(data.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Median (50th percentile).
pub fn median(data: &[f64]) -> MathResult<f64> {
    percentile(data, 50.0)
}

/// Percentile of unsorted data.
///
/// Sorts a copy of `data` and delegates to [`percentile_sorted`].
pub fn percentile(data: &[f64], pct: f64) -> MathResult<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, pct)
}

/// Percentile of data already sorted in ascending order.
///
/// # Arguments
///
/// * `sorted` - Observations in ascending order
/// * `pct` - Percentile in `[0, 100]`
///
/// # Example
///
/// ```rust
/// use varlab_math::statistics::percentile_sorted;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile_sorted(&data, 50.0).unwrap(), 3.0);
/// assert_eq!(percentile_sorted(&data, 25.0).unwrap(), 2.0);
/// ```
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> MathResult<f64> {
    ensure_len(sorted, 1)?;
    if !(0.0..=100.0).contains(&pct) {
        return Err(MathError::invalid_input(format!(
            "percentile must be within [0, 100], got {pct}"
        )));
    }

    let rank = (sorted.len() - 1) as f64 * pct / 100.0;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let frac = rank - lower as f64;

    if frac == 0.0 || lower == upper {
        return Ok(sorted[lower]);
    }
    Ok(sorted[lower] + frac * (sorted[upper] - sorted[lower]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std_dev() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data).unwrap(), 5.0, epsilon = 1e-12);
        // Sample stddev: sqrt(32 / 7)
        assert_relative_eq!(std_dev(&data).unwrap(), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(variance(&data).unwrap(), 32.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(mean(&[]).is_err());
        assert!(std_dev(&[1.0]).is_err());
        assert!(percentile_sorted(&[], 50.0).is_err());
    }

    #[test]
    fn test_min_max_median() {
        let data = [3.0, -1.0, 7.0, 2.0];
        assert_eq!(min(&data).unwrap(), -1.0);
        assert_eq!(max(&data).unwrap(), 7.0);
        assert_relative_eq!(median(&data).unwrap(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_interpolates() {
        let data = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_sorted(&data, 0.0).unwrap(), 10.0);
        assert_eq!(percentile_sorted(&data, 100.0).unwrap(), 40.0);
        // rank = 3 * 0.5 = 1.5
        assert_relative_eq!(percentile_sorted(&data, 50.0).unwrap(), 25.0, epsilon = 1e-12);
        // rank = 3 * 0.05 = 0.15
        assert_relative_eq!(percentile_sorted(&data, 5.0).unwrap(), 11.5, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile_sorted(&[42.0], 1.0).unwrap(), 42.0);
        assert_eq!(percentile_sorted(&[42.0], 99.0).unwrap(), 42.0);
    }

    #[test]
    fn test_percentile_out_of_range() {
        assert!(percentile_sorted(&[1.0, 2.0], -1.0).is_err());
        assert!(percentile_sorted(&[1.0, 2.0], 100.5).is_err());
        assert!(percentile_sorted(&[1.0, 2.0], f64::NAN).is_err());
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let data = [40.0, 10.0, 30.0, 20.0];
        assert_relative_eq!(percentile(&data, 50.0).unwrap(), 25.0, epsilon = 1e-12);
    }
}
