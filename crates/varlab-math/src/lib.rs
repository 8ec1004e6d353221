//! # varlab Math
//!
//! Mathematical utilities for the varlab Value-at-Risk library.
//!
//! This crate provides:
//!
//! - **Statistics**: Sample mean, standard deviation and the percentile
//!   convention shared by every estimator
//! - **Distributions**: The standard normal (Φ, Φ⁻¹) and fitted normal parameters
//! - **Histogram**: Fixed bucket-count histograms for diagnostics
//! - **Correlation**: Pearson correlation and correlation matrices with a
//!   positive-semidefinite check
//! - **Linear Algebra**: Quadratic forms for portfolio aggregation
//!
//! ## Design Philosophy
//!
//! - **One Percentile Convention**: Linear interpolation between order
//!   statistics, used everywhere a quantile is read from data
//! - **Numerical Honesty**: Degenerate inputs are reported, never turned into NaN
//! - **No Hidden State**: Distributions are plain values passed explicitly

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod correlation;
pub mod distributions;
pub mod error;
pub mod histogram;
pub mod linear_algebra;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::correlation::{pearson, CorrelationMatrix};
    pub use crate::distributions::{NormalDistributionParams, StandardNormal};
    pub use crate::error::{MathError, MathResult};
    pub use crate::histogram::{Bucket, Histogram};
    pub use crate::linear_algebra::{hadamard, quadratic_form};
    pub use crate::statistics::{
        max, mean, median, min, percentile, percentile_sorted, std_dev, variance,
    };
}

pub use error::{MathError, MathResult};
