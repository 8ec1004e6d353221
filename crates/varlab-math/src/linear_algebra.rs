//! Linear algebra utilities.
//!
//! Small helpers over `nalgebra` used by portfolio aggregation.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};

/// Element-wise (Hadamard) product of two vectors.
pub fn hadamard(a: &DVector<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    if a.len() != b.len() {
        return Err(MathError::DimensionMismatch {
            rows1: a.len(),
            cols1: 1,
            rows2: b.len(),
            cols2: 1,
        });
    }
    Ok(a.component_mul(b))
}

/// Evaluates the quadratic form `x · M · xᵀ`.
///
/// `x` is treated as a row vector.
///
/// # Example
///
/// ```rust
/// use nalgebra::{DMatrix, DVector};
/// use varlab_math::linear_algebra::quadratic_form;
///
/// let m = DMatrix::identity(2, 2);
/// let x = DVector::from_vec(vec![3.0, 4.0]);
/// assert_eq!(quadratic_form(&x, &m).unwrap(), 25.0);
/// ```
pub fn quadratic_form(x: &DVector<f64>, m: &DMatrix<f64>) -> MathResult<f64> {
    if m.nrows() != m.ncols() || m.nrows() != x.len() {
        return Err(MathError::DimensionMismatch {
            rows1: 1,
            cols1: x.len(),
            rows2: m.nrows(),
            cols2: m.ncols(),
        });
    }
    Ok((x.transpose() * m * x)[(0, 0)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hadamard() {
        let a = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let b = DVector::from_vec(vec![4.0, 5.0, 6.0]);
        let c = hadamard(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[4.0, 10.0, 18.0]);

        let short = DVector::from_vec(vec![1.0]);
        assert!(hadamard(&a, &short).is_err());
    }

    #[test]
    fn test_quadratic_form() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 1.0]);
        let x = DVector::from_vec(vec![0.1, 0.2]);
        // 0.01 + 2 * 0.5 * 0.02 + 0.04
        assert_relative_eq!(quadratic_form(&x, &m).unwrap(), 0.07, epsilon = 1e-15);
    }

    #[test]
    fn test_quadratic_form_dimension_mismatch() {
        let m = DMatrix::identity(3, 3);
        let x = DVector::from_vec(vec![1.0, 2.0]);
        assert!(matches!(
            quadratic_form(&x, &m),
            Err(MathError::DimensionMismatch { .. })
        ));
    }
}
