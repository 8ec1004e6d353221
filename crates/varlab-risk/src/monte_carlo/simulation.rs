//! Path simulator.

use log::{debug, warn};

use varlab_math::distributions::{NormalDistributionParams, StandardNormal};
use varlab_math::histogram::Histogram;
use varlab_math::statistics::percentile_sorted;

use super::params::SimulationParams;
use super::result::SimulationResult;
use crate::draws::{DrawKey, DrawProvider};
use crate::error::{RiskError, RiskResult};
use crate::var::{ParametricVaR, VaRPoint, VaRResult};

/// Monte Carlo VaR over independent price paths.
///
/// Each path starts at the initial price and takes `time_horizon *
/// intra_period_steps` normal steps with `Δt = 1 / intra_period_steps`:
///
/// ```text
/// step = mean·Δt + std_dev·Φ⁻¹(u)·√Δt
/// classic:  price += price·step
/// log:      price *= exp(step)
/// ```
///
/// # Example
///
/// ```rust
/// use varlab_math::distributions::NormalDistributionParams;
/// use varlab_risk::{DrawProvider, MonteCarloSimulation, SimulationParams};
///
/// let params = SimulationParams::builder()
///     .distribution(NormalDistributionParams::new(0.0, 0.01).unwrap())
///     .initial_price(100.0)
///     .scenarios(2_000)
///     .confidence_levels(vec![0.95])
///     .build()
///     .unwrap();
///
/// let mut sim = MonteCarloSimulation::new(params, DrawProvider::live(1));
/// let result = sim.compute().unwrap();
/// let var = result.percentile_var.value_at(0.95).unwrap();
/// assert!(var < 0.0 && var > -3.0);
/// ```
#[derive(Debug)]
pub struct MonteCarloSimulation {
    params: SimulationParams,
    draws: DrawProvider,
    result: Option<SimulationResult>,
}

impl MonteCarloSimulation {
    /// Creates a simulation that owns its draw provider.
    #[must_use]
    pub fn new(params: SimulationParams, draws: DrawProvider) -> Self {
        Self {
            params,
            draws,
            result: None,
        }
    }

    /// Runs every path and replaces any previous result.
    ///
    /// A second call continues from the provider's current position; swap in
    /// a fresh or rewound provider to reproduce a run.
    ///
    /// # Errors
    ///
    /// - `ReplayExhausted` if a replayed log runs out
    /// - `NonFinitePath` if a path overflows
    pub fn compute(&mut self) -> RiskResult<&SimulationResult> {
        let result = self.simulate()?;
        Ok(self.result.insert(result))
    }

    /// Runs once and consumes the simulation.
    ///
    /// # Errors
    ///
    /// As [`compute`](Self::compute).
    pub fn run(mut self) -> RiskResult<(SimulationParams, DrawProvider, SimulationResult)> {
        let result = self.simulate()?;
        Ok((self.params, self.draws, result))
    }

    fn simulate(&mut self) -> RiskResult<SimulationResult> {
        let params = &self.params;
        let scenarios = params.scenario_count();
        let steps = params.intra_period_steps();
        debug!(
            "monte carlo start: {} scenarios, {} periods x {} steps, {}",
            scenarios,
            params.time_horizon(),
            steps,
            params.return_type()
        );

        let dist = params.distribution();
        let dt = 1.0 / f64::from(steps);
        let drift = dist.mean() * dt;
        let diffusion = dist.std_dev() * dt.sqrt();
        let return_type = params.return_type();

        let mut terminal = Vec::with_capacity(scenarios);
        for scenario in 0..scenarios {
            let mut price = params.initial_price();
            for period in 0..params.time_horizon() {
                for substep in 0..steps {
                    let mut u = self
                        .draws
                        .next_uniform(DrawKey::new(scenario, period, substep))?;
                    if u == 0.0 {
                        u = f64::MIN_POSITIVE;
                    }
                    let step = drift + diffusion * StandardNormal.inverse_cdf(u);
                    price = return_type.compound(price, step);
                }
            }
            if !price.is_finite() {
                return Err(RiskError::NonFinitePath { scenario });
            }
            terminal.push(price);
        }
        terminal.sort_by(f64::total_cmp);

        let result = summarize(params, terminal)?;
        debug!("monte carlo done: {}", result.summary());
        Ok(result)
    }

    /// The run parameters.
    #[must_use]
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Result of the last successful [`compute`](Self::compute).
    #[must_use]
    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    /// The draw provider.
    #[must_use]
    pub fn draws(&self) -> &DrawProvider {
        &self.draws
    }

    /// Mutable access to the draw provider, e.g. to rewind a replay.
    pub fn draws_mut(&mut self) -> &mut DrawProvider {
        &mut self.draws
    }

    /// Swaps in a new provider, returning the old one.
    pub fn reset_draws(&mut self, draws: DrawProvider) -> DrawProvider {
        std::mem::replace(&mut self.draws, draws)
    }

    /// Consumes the simulation, returning its provider.
    #[must_use]
    pub fn into_draws(self) -> DrawProvider {
        self.draws
    }

    /// Consumes the simulation, returning the parameters and last result.
    #[must_use]
    pub fn into_parts(self) -> (SimulationParams, DrawProvider, Option<SimulationResult>) {
        (self.params, self.draws, self.result)
    }
}

/// Percentile VaR, histogram and normal re-fit over sorted terminal prices.
fn summarize(params: &SimulationParams, terminal: Vec<f64>) -> RiskResult<SimulationResult> {
    let initial = params.initial_price();
    let levels = params.confidence_levels();

    let percentile_var = VaRResult::new(
        levels
            .tail_percentiles()
            .map(|(confidence, pct)| {
                Ok(VaRPoint {
                    confidence,
                    value: percentile_sorted(&terminal, pct)? - initial,
                })
            })
            .collect::<RiskResult<Vec<_>>>()?,
    );

    let histogram = Histogram::new(&terminal, params.histogram_buckets())?;

    let (lowest, highest) = match (terminal.first(), terminal.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => {
            return Err(RiskError::invalid_parameter(
                "scenario_count",
                "no terminal prices",
            ))
        }
    };
    let degenerate = lowest == highest;
    let terminal_distribution = if degenerate {
        warn!(
            "degenerate terminal distribution: all {} paths ended at {}",
            terminal.len(),
            lowest
        );
        NormalDistributionParams::new(lowest, 0.0)?
    } else {
        NormalDistributionParams::from_sample(&terminal)?
    };

    let parametric_var = ParametricVaR::new(terminal_distribution, levels.clone())
        .compute()?
        .map_values(|price| price - initial);

    Ok(SimulationResult {
        terminal_prices: terminal,
        histogram,
        percentile_var,
        parametric_var,
        terminal_distribution,
        degenerate,
    })
}
