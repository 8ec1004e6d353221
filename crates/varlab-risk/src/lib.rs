//! # varlab Risk
//!
//! Value-at-Risk estimation for a single price series and for correlated
//! portfolios.
//!
//! This crate provides:
//!
//! - **Monte Carlo VaR**: Path simulation with sub-period steps under classic or
//!   log compounding, percentile VaR and a normal re-fit of terminal prices
//! - **Parametric VaR**: `mean·Δt + σ·Φ⁻¹(1 - ci)·√Δt` with named interpretations
//! - **Historical VaR**: Empirical percentiles of price and return histories
//! - **Deterministic Draws**: Seeded generators with record and positional replay
//! - **Portfolio Variance**: `(w ⊙ σ) · R · (w ⊙ σ)ᵀ` with a PSD check
//! - **Batches**: Independent runs across the rayon pool, order preserved
//!
//! ## Quick Start
//!
//! ```rust
//! use varlab_config::SimulationConfig;
//! use varlab_core::{log_return_series, Series};
//! use varlab_risk::prelude::*;
//!
//! let prices = Series::new(vec![100.0, 101.2, 100.4, 102.0, 101.5, 103.1]);
//! let returns = log_return_series(&prices).unwrap();
//! let dist = returns.distribution().unwrap();
//!
//! let config = SimulationConfig::quick().with_time_horizon(5);
//! let params = SimulationParams::from_config(&config, dist, 103.1).unwrap();
//! let mut sim = MonteCarloSimulation::new(params, DrawProvider::from_config(&config));
//! let result = sim.compute().unwrap();
//! assert_eq!(result.terminal_prices.len(), 1_000);
//! ```
//!
//! ## Sign Convention
//!
//! VaR values are the lower-tail outcome itself, so losses are negative.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod batch;
pub mod confidence;
pub mod draws;
pub mod error;
pub mod monte_carlo;
pub mod portfolio;
pub mod var;

pub use batch::{
    comparison_rows, run_batch, run_batch_configured, run_batch_with, BatchRun, ComparisonRow,
};
pub use confidence::ConfidenceLevels;
pub use draws::{DrawKey, DrawLog, DrawMode, DrawProvider, DrawRecord};
pub use error::{RiskError, RiskResult};
pub use monte_carlo::{
    MonteCarloSimulation, SimulationParams, SimulationParamsBuilder, SimulationResult,
};
pub use portfolio::{PortfolioRisk, VolatilityScaling};
pub use var::{
    parametric_var, HistoricalVaR, HistoricalVaRResult, Interpretation, ParametricVaR, VaRPoint,
    VaRResult,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::{comparison_rows, run_batch, BatchRun, ComparisonRow};
    pub use crate::confidence::ConfidenceLevels;
    pub use crate::draws::{DrawKey, DrawLog, DrawMode, DrawProvider, DrawRecord};
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::monte_carlo::{MonteCarloSimulation, SimulationParams, SimulationResult};
    pub use crate::portfolio::{PortfolioRisk, VolatilityScaling};
    pub use crate::var::{
        parametric_var, HistoricalVaR, HistoricalVaRResult, Interpretation, ParametricVaR,
        VaRResult,
    };
}
