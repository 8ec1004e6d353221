//! Monte Carlo run parameters.

use serde::{Deserialize, Serialize};

use varlab_config::{RiskConfig, SimulationConfig};
use varlab_core::ReturnType;
use varlab_math::distributions::NormalDistributionParams;

use crate::confidence::ConfidenceLevels;
use crate::error::{RiskError, RiskResult};

/// Default number of histogram buckets over terminal prices.
pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 20;

/// Validated inputs of one Monte Carlo VaR run.
///
/// Built through [`SimulationParams::builder`] or
/// [`SimulationParams::from_config`]; every instance satisfies horizon,
/// steps and scenarios of at least one and a finite positive initial price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    name: Option<String>,
    distribution: NormalDistributionParams,
    initial_price: f64,
    time_horizon: u32,
    scenario_count: usize,
    intra_period_steps: u32,
    confidence_levels: ConfidenceLevels,
    return_type: ReturnType,
    histogram_buckets: usize,
}

impl SimulationParams {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> SimulationParamsBuilder {
        SimulationParamsBuilder::default()
    }

    /// Builds parameters from a run configuration plus market inputs.
    ///
    /// # Errors
    ///
    /// Fails on any out-of-range field.
    pub fn from_config(
        config: &SimulationConfig,
        distribution: NormalDistributionParams,
        initial_price: f64,
    ) -> RiskResult<Self> {
        Self::builder()
            .name(config.name.clone())
            .distribution(distribution)
            .initial_price(initial_price)
            .time_horizon(config.time_horizon)
            .scenarios(config.scenario_count)
            .intra_period_steps(config.intra_period_steps)
            .confidence_levels(config.confidence_levels.clone())
            .return_type(config.return_type)
            .build()
    }

    /// Display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Per-period return distribution.
    #[must_use]
    pub fn distribution(&self) -> NormalDistributionParams {
        self.distribution
    }

    /// Price every path starts from.
    #[must_use]
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Horizon in periods.
    #[must_use]
    pub fn time_horizon(&self) -> u32 {
        self.time_horizon
    }

    /// Number of paths.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.scenario_count
    }

    /// Sub-steps per period.
    #[must_use]
    pub fn intra_period_steps(&self) -> u32 {
        self.intra_period_steps
    }

    /// Confidence levels, in output order.
    #[must_use]
    pub fn confidence_levels(&self) -> &ConfidenceLevels {
        &self.confidence_levels
    }

    /// Compounding mode.
    #[must_use]
    pub fn return_type(&self) -> ReturnType {
        self.return_type
    }

    /// Histogram size.
    #[must_use]
    pub fn histogram_buckets(&self) -> usize {
        self.histogram_buckets
    }

    /// Draws consumed by one full run.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.scenario_count * self.time_horizon as usize * self.intra_period_steps as usize
    }

    /// Label derived from the run shape, e.g. `T:10 Q(s:1000, dt:8)`.
    #[must_use]
    pub fn quality_label(&self) -> String {
        format!(
            "T:{} Q(s:{}, dt:{})",
            self.time_horizon, self.scenario_count, self.intra_period_steps
        )
    }
}

/// Builder for [`SimulationParams`].
///
/// ```rust
/// use varlab_math::distributions::NormalDistributionParams;
/// use varlab_risk::SimulationParams;
///
/// let params = SimulationParams::builder()
///     .distribution(NormalDistributionParams::new(0.0, 0.01).unwrap())
///     .initial_price(100.0)
///     .scenarios(1_000)
///     .build()
///     .unwrap();
/// assert_eq!(params.time_horizon(), 1);
/// assert_eq!(params.confidence_levels().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationParamsBuilder {
    name: Option<String>,
    distribution: Option<NormalDistributionParams>,
    initial_price: Option<f64>,
    time_horizon: u32,
    scenario_count: usize,
    intra_period_steps: u32,
    confidence_levels: Vec<f64>,
    return_type: ReturnType,
    histogram_buckets: usize,
}

impl Default for SimulationParamsBuilder {
    fn default() -> Self {
        Self {
            name: None,
            distribution: None,
            initial_price: None,
            time_horizon: 1,
            scenario_count: 10_000,
            intra_period_steps: 1,
            confidence_levels: ConfidenceLevels::standard().into(),
            return_type: ReturnType::default(),
            histogram_buckets: DEFAULT_HISTOGRAM_BUCKETS,
        }
    }
}

impl SimulationParamsBuilder {
    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the per-period return distribution (required).
    #[must_use]
    pub fn distribution(mut self, distribution: NormalDistributionParams) -> Self {
        self.distribution = Some(distribution);
        self
    }

    /// Sets the starting price (required).
    #[must_use]
    pub fn initial_price(mut self, price: f64) -> Self {
        self.initial_price = Some(price);
        self
    }

    /// Sets the horizon in periods.
    #[must_use]
    pub fn time_horizon(mut self, periods: u32) -> Self {
        self.time_horizon = periods;
        self
    }

    /// Sets the number of paths.
    #[must_use]
    pub fn scenarios(mut self, count: usize) -> Self {
        self.scenario_count = count;
        self
    }

    /// Sets sub-steps per period.
    #[must_use]
    pub fn intra_period_steps(mut self, steps: u32) -> Self {
        self.intra_period_steps = steps;
        self
    }

    /// Sets the confidence levels.
    #[must_use]
    pub fn confidence_levels(mut self, levels: Vec<f64>) -> Self {
        self.confidence_levels = levels;
        self
    }

    /// Sets the compounding mode.
    #[must_use]
    pub fn return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Sets the histogram size.
    #[must_use]
    pub fn histogram_buckets(mut self, buckets: usize) -> Self {
        self.histogram_buckets = buckets;
        self
    }

    /// Takes the diagnostic settings of `config` (the histogram size).
    #[must_use]
    pub fn risk_config(self, config: &RiskConfig) -> Self {
        self.histogram_buckets(config.histogram_buckets)
    }

    /// Validates and builds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a missing distribution or price, a
    /// non-positive price, a zero horizon, step count, scenario count or
    /// bucket count, and the confidence level errors of [`ConfidenceLevels::new`].
    pub fn build(self) -> RiskResult<SimulationParams> {
        let distribution = self
            .distribution
            .ok_or_else(|| RiskError::invalid_parameter("distribution", "is required"))?;
        let initial_price = self
            .initial_price
            .ok_or_else(|| RiskError::invalid_parameter("initial_price", "is required"))?;
        if !(initial_price.is_finite() && initial_price > 0.0) {
            return Err(RiskError::invalid_parameter(
                "initial_price",
                format!("must be finite and positive, got {initial_price}"),
            ));
        }
        if self.time_horizon == 0 {
            return Err(RiskError::invalid_parameter("time_horizon", "must be at least 1"));
        }
        if self.intra_period_steps == 0 {
            return Err(RiskError::invalid_parameter(
                "intra_period_steps",
                "must be at least 1",
            ));
        }
        if self.scenario_count == 0 {
            return Err(RiskError::invalid_parameter("scenario_count", "must be at least 1"));
        }
        if self.histogram_buckets == 0 {
            return Err(RiskError::invalid_parameter(
                "histogram_buckets",
                "must be at least 1",
            ));
        }
        let confidence_levels = ConfidenceLevels::new(self.confidence_levels)?;

        Ok(SimulationParams {
            name: self.name,
            distribution,
            initial_price,
            time_horizon: self.time_horizon,
            scenario_count: self.scenario_count,
            intra_period_steps: self.intra_period_steps,
            confidence_levels,
            return_type: self.return_type,
            histogram_buckets: self.histogram_buckets,
        })
    }
}
