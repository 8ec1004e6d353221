//! Pearson correlation and correlation matrices.

use nalgebra::{DMatrix, SymmetricEigen};

use crate::error::{MathError, MathResult};
use crate::statistics;

/// Default tolerance for symmetry, unit-diagonal and eigenvalue checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Pearson product-moment correlation of two equal-length series.
///
/// # Errors
///
/// Returns an error if lengths differ, fewer than two observations are
/// given, or either series has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> MathResult<f64> {
    if a.len() != b.len() {
        return Err(MathError::DimensionMismatch {
            rows1: a.len(),
            cols1: 1,
            rows2: b.len(),
            cols2: 1,
        });
    }
    if a.len() < 2 {
        return Err(MathError::insufficient_data(2, a.len()));
    }

    let mean_a = statistics::mean(a)?;
    let mean_b = statistics::mean(b)?;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return Err(MathError::zero_variance("pearson correlation"));
    }

    // sqrt(fl(v * v)) == v, so a series against itself gives exactly 1.0
    let product = var_a * var_b;
    let denom = if product.is_normal() {
        product.sqrt()
    } else {
        var_a.sqrt() * var_b.sqrt()
    };
    Ok((cov / denom).clamp(-1.0, 1.0))
}

/// A validated correlation matrix.
///
/// Square, symmetric, unit diagonal, entries in `[-1, 1]`. Positive
/// semi-definiteness is not guaranteed by construction (short samples can
/// produce numerically indefinite matrices); query it with
/// [`CorrelationMatrix::is_positive_semidefinite`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    matrix: DMatrix<f64>,
}

impl CorrelationMatrix {
    /// Builds the pairwise Pearson matrix of the given series.
    ///
    /// The diagonal is exactly 1.0 and `R[i][j] == R[j][i]` bit for bit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use varlab_math::correlation::CorrelationMatrix;
    ///
    /// let a = [0.01, -0.02, 0.03, 0.0];
    /// let b = [0.02, -0.01, 0.01, 0.005];
    /// let r = CorrelationMatrix::from_series(&[&a[..], &b[..]]).unwrap();
    /// assert_eq!(r.get(0, 0), 1.0);
    /// assert_eq!(r.get(0, 1), r.get(1, 0));
    /// ```
    pub fn from_series(series: &[&[f64]]) -> MathResult<Self> {
        let n = series.len();
        if n == 0 {
            return Err(MathError::insufficient_data(1, 0));
        }

        let mut matrix = DMatrix::identity(n, n);
        for i in 0..n {
            for j in (i + 1)..n {
                let r = pearson(series[i], series[j])?;
                matrix[(i, j)] = r;
                matrix[(j, i)] = r;
            }
        }

        Ok(Self { matrix })
    }

    /// Wraps an existing matrix after validating its shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty or not square, not symmetric,
    /// has a non-unit diagonal, or has entries outside `[-1, 1]`.
    pub fn from_matrix(matrix: DMatrix<f64>) -> MathResult<Self> {
        let n = matrix.nrows();
        if n == 0 {
            return Err(MathError::insufficient_data(1, 0));
        }
        if n != matrix.ncols() {
            return Err(MathError::DimensionMismatch {
                rows1: n,
                cols1: matrix.ncols(),
                rows2: n,
                cols2: n,
            });
        }

        for i in 0..n {
            if (matrix[(i, i)] - 1.0).abs() > DEFAULT_TOLERANCE {
                return Err(MathError::invalid_input(format!(
                    "diagonal entry ({i}, {i}) must be 1, got {}",
                    matrix[(i, i)]
                )));
            }
            for j in 0..n {
                let v = matrix[(i, j)];
                if !(-1.0..=1.0).contains(&v) {
                    return Err(MathError::invalid_input(format!(
                        "correlation ({i}, {j}) = {v} is outside [-1, 1]"
                    )));
                }
                if (v - matrix[(j, i)]).abs() > DEFAULT_TOLERANCE {
                    return Err(MathError::NotSymmetric { row: i, col: j });
                }
            }
        }

        Ok(Self { matrix })
    }

    /// Number of assets.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Correlation between assets `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    /// The underlying matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Smallest eigenvalue of the (symmetric) matrix.
    #[must_use]
    pub fn min_eigenvalue(&self) -> f64 {
        SymmetricEigen::new(self.matrix.clone())
            .eigenvalues
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// Returns true if no eigenvalue is below `-tolerance`.
    #[must_use]
    pub fn is_positive_semidefinite(&self, tolerance: f64) -> bool {
        let min = self.min_eigenvalue();
        if min < -tolerance {
            log::warn!(
                "correlation matrix is not positive semi-definite (min eigenvalue {min:.3e})"
            );
            return false;
        }
        true
    }
}
