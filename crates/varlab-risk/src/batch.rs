//! Independent simulations fanned across threads.
//!
//! Each job owns its parameters and its draw provider, so a batch run is
//! bit-identical to running the same jobs one after another.

use log::debug;
use serde::Serialize;

use varlab_config::RiskConfig;
use varlab_core::ReturnType;

use crate::draws::DrawProvider;
use crate::error::RiskResult;
use crate::monte_carlo::{MonteCarloSimulation, SimulationParams, SimulationResult};

/// A completed simulation: its parameters and result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRun {
    /// Parameters of the run.
    pub params: SimulationParams,
    /// Result of the run.
    pub result: SimulationResult,
}

/// One line of a cross-run comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Run name, or its quality label when unnamed.
    pub name: String,
    /// Compounding mode of the run.
    pub return_type: ReturnType,
    /// Confidence level.
    pub confidence: f64,
    /// Simulated percentile VaR (price change).
    pub percentile_var: f64,
    /// Parametric VaR of the terminal re-fit (price change).
    pub parametric_var: f64,
}

fn run_one((params, draws): (SimulationParams, DrawProvider)) -> RiskResult<BatchRun> {
    let (params, _, result) = MonteCarloSimulation::new(params, draws).run()?;
    Ok(BatchRun { params, result })
}

/// Runs every job on the rayon pool, returning results in input order.
pub fn run_batch(jobs: Vec<(SimulationParams, DrawProvider)>) -> Vec<RiskResult<BatchRun>> {
    run_batch_with(jobs, true)
}

/// Runs every job, on the rayon pool when `parallel` is set and the
/// `parallel` feature is enabled, otherwise sequentially.
#[allow(unused_variables)]
pub fn run_batch_with(
    jobs: Vec<(SimulationParams, DrawProvider)>,
    parallel: bool,
) -> Vec<RiskResult<BatchRun>> {
    debug!("batch of {} simulations (parallel: {parallel})", jobs.len());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if parallel && jobs.len() > 1 {
            return jobs.into_par_iter().map(run_one).collect();
        }
    }

    jobs.into_iter().map(run_one).collect()
}

/// Runs every job using the execution settings of `config`.
pub fn run_batch_configured(
    jobs: Vec<(SimulationParams, DrawProvider)>,
    config: &RiskConfig,
) -> Vec<RiskResult<BatchRun>> {
    run_batch_with(jobs, config.parallel)
}

/// Flattens runs into per-level comparison rows, run order then level order.
#[must_use]
pub fn comparison_rows(runs: &[BatchRun]) -> Vec<ComparisonRow> {
    runs.iter()
        .flat_map(|run| {
            let name = run
                .params
                .name()
                .map_or_else(|| run.params.quality_label(), str::to_owned);
            run.result
                .percentile_var
                .points()
                .iter()
                .zip(run.result.parametric_var.points())
                .map(move |(pct, par)| ComparisonRow {
                    name: name.clone(),
                    return_type: run.params.return_type(),
                    confidence: pct.confidence,
                    percentile_var: pct.value,
                    parametric_var: par.value,
                })
        })
        .collect()
}
