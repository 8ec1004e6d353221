//! Monte Carlo simulation configuration.

use serde::{Deserialize, Serialize};

use varlab_core::ReturnType;

use crate::error::{
    validate_confidence_levels, ConfigError, ConfigResult, Validate, ValidationError,
};

// =============================================================================
// SIMULATION CONFIGURATION
// =============================================================================

/// Configuration for one Monte Carlo VaR run.
///
/// Carries everything except the market inputs (return distribution and
/// initial price), which come from data at run time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Configuration name/identifier.
    pub name: String,

    /// Description of this configuration.
    #[serde(default)]
    pub description: Option<String>,

    /// Horizon in whole periods (e.g. trading days).
    #[serde(default = "default_time_horizon")]
    pub time_horizon: u32,

    /// Number of simulated price paths.
    #[serde(default = "default_scenario_count")]
    pub scenario_count: usize,

    /// Sub-steps simulated inside each period.
    #[serde(default = "default_intra_period_steps")]
    pub intra_period_steps: u32,

    /// Compounding of step returns.
    #[serde(default)]
    pub return_type: ReturnType,

    /// Confidence levels to report, in output order.
    #[serde(default = "default_confidence_levels")]
    pub confidence_levels: Vec<f64>,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Record every draw so the run can be exported and replayed.
    #[serde(default)]
    pub record_draws: bool,
}

fn default_time_horizon() -> u32 {
    1
}

fn default_scenario_count() -> usize {
    10_000
}

fn default_intra_period_steps() -> u32 {
    1
}

pub(crate) fn default_confidence_levels() -> Vec<f64> {
    vec![0.90, 0.95, 0.99]
}

fn default_seed() -> u64 {
    1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SimulationConfig {
    /// Creates a new simulation configuration with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            time_horizon: default_time_horizon(),
            scenario_count: default_scenario_count(),
            intra_period_steps: default_intra_period_steps(),
            return_type: ReturnType::default(),
            confidence_levels: default_confidence_levels(),
            seed: default_seed(),
            record_draws: false,
        }
    }

    /// Fast, coarse run: 1,000 scenarios with 8 sub-steps per period.
    pub fn quick() -> Self {
        Self::new("QUICK")
            .with_description("Coarse run for interactive checks")
            .with_scenarios(1_000)
            .with_intra_period_steps(8)
    }

    /// Standard run: 10,000 scenarios with 8 sub-steps per period.
    pub fn standard() -> Self {
        Self::new("STANDARD")
            .with_description("Standard Monte Carlo VaR run")
            .with_scenarios(10_000)
            .with_intra_period_steps(8)
    }

    /// Fine time grid: 5,000 scenarios with 32 sub-steps per period.
    pub fn fine() -> Self {
        Self::new("FINE")
            .with_description("Fine time grid, fewer scenarios")
            .with_scenarios(5_000)
            .with_intra_period_steps(32)
    }

    /// Looks up a named preset (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for an unknown name.
    pub fn preset(name: &str) -> ConfigResult<Self> {
        match name.to_ascii_uppercase().as_str() {
            "QUICK" => Ok(Self::quick()),
            "STANDARD" => Ok(Self::standard()),
            "FINE" => Ok(Self::fine()),
            _ => Err(ConfigError::NotFound {
                key: name.to_string(),
            }),
        }
    }

    /// The comparison pack: every preset under both return types, sharing
    /// one horizon.
    ///
    /// Each run is named after its shape and return type and gets its own
    /// seed (1 to 6, in pack order).
    pub fn comparison_pack(time_horizon: u32) -> Vec<Self> {
        [Self::quick(), Self::standard(), Self::fine()]
            .into_iter()
            .flat_map(|base| {
                [ReturnType::Log, ReturnType::Classic]
                    .map(|rt| base.clone().with_time_horizon(time_horizon).with_return_type(rt))
            })
            .zip(1u64..)
            .map(|(config, seed)| {
                let name = format!("{} {}", config.quality_label(), config.return_type);
                Self { name, ..config }.with_seed(seed)
            })
            .collect()
    }

    /// Label derived from the run shape, e.g. `T:10 Q(s:1000, dt:8)`.
    pub fn quality_label(&self) -> String {
        format!(
            "T:{} Q(s:{}, dt:{})",
            self.time_horizon, self.scenario_count, self.intra_period_steps
        )
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the horizon.
    pub fn with_time_horizon(mut self, periods: u32) -> Self {
        self.time_horizon = periods;
        self
    }

    /// Builder method to set the scenario count.
    pub fn with_scenarios(mut self, count: usize) -> Self {
        self.scenario_count = count;
        self
    }

    /// Builder method to set sub-steps per period.
    pub fn with_intra_period_steps(mut self, steps: u32) -> Self {
        self.intra_period_steps = steps;
        self
    }

    /// Builder method to set the compounding mode.
    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Builder method to set the confidence levels.
    pub fn with_confidence_levels(mut self, levels: Vec<f64>) -> Self {
        self.confidence_levels = levels;
        self
    }

    /// Builder method to set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to enable draw recording.
    pub fn with_recording(mut self, record: bool) -> Self {
        self.record_draws = record;
        self
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        if self.time_horizon == 0 {
            errors.push(ValidationError::with_rule(
                "time_horizon",
                "Time horizon must be at least one period",
                "positive_horizon",
            ));
        }

        if self.scenario_count == 0 {
            errors.push(ValidationError::with_rule(
                "scenario_count",
                "Scenario count must be at least one",
                "positive_scenarios",
            ));
        }

        if self.intra_period_steps == 0 {
            errors.push(ValidationError::with_rule(
                "intra_period_steps",
                "Intra-period steps must be at least one",
                "positive_steps",
            ));
        }

        validate_confidence_levels(&self.confidence_levels, &mut errors);

        errors
    }
}
