//! End-to-end Monte Carlo VaR tests.

use approx::assert_relative_eq;
use varlab_core::ReturnType;
use varlab_math::distributions::NormalDistributionParams;
use varlab_math::statistics;
use varlab_risk::prelude::*;

fn params(scenarios: usize, levels: Vec<f64>) -> SimulationParams {
    SimulationParams::builder()
        .distribution(NormalDistributionParams::new(0.0, 0.01).unwrap())
        .initial_price(100.0)
        .time_horizon(1)
        .intra_period_steps(1)
        .scenarios(scenarios)
        .confidence_levels(levels)
        .return_type(ReturnType::Log)
        .build()
        .unwrap()
}

fn percentile_var(scenarios: usize, seed: u64) -> f64 {
    let mut sim =
        MonteCarloSimulation::new(params(scenarios, vec![0.95]), DrawProvider::live(seed));
    sim.compute().unwrap().percentile_var.value_at(0.95).unwrap()
}

#[test]
fn matches_parametric_reference() {
    // 95% one-period VaR of N(0, 0.01) log returns on a price of 100
    let analytic = parametric_var(0.0, 0.01, 0.95, 1.0).unwrap();
    assert_relative_eq!(analytic, -0.016_448_5, epsilon = 1e-6);
    let analytic_delta = ReturnType::Log.inverse(analytic, 100.0) - 100.0;
    assert_relative_eq!(analytic_delta, -1.631, epsilon = 1e-3);

    let mut sim = MonteCarloSimulation::new(params(10_000, vec![0.95]), DrawProvider::live(2024));
    let result = sim.compute().unwrap();

    let simulated = result.percentile_var.value_at(0.95).unwrap();
    assert!((simulated - analytic_delta).abs() < 0.1, "simulated {simulated}");

    let refit = result.parametric_var.value_at(0.95).unwrap();
    assert!((refit - analytic_delta).abs() < 0.1, "re-fit {refit}");
    assert!(!result.degenerate);
    assert_relative_eq!(result.terminal_distribution.std_dev(), 1.0, epsilon = 0.05);
}

#[test]
fn same_seed_is_bit_identical() {
    let run = |seed| {
        let params = params(2_000, vec![0.9, 0.95, 0.99]);
        let mut sim = MonteCarloSimulation::new(params, DrawProvider::live(seed));
        sim.compute().unwrap().clone()
    };
    let a = run(7);
    let b = run(7);
    assert_eq!(a.terminal_prices, b.terminal_prices);
    assert_eq!(a.percentile_var, b.percentile_var);
    assert_ne!(a.terminal_prices, run(8).terminal_prices);
}

#[test]
fn percentile_var_is_monotone_in_confidence() {
    let mut sim = MonteCarloSimulation::new(
        params(5_000, vec![0.5, 0.9, 0.95, 0.99, 0.999]),
        DrawProvider::live(3),
    );
    let values = sim.compute().unwrap().percentile_var.values();
    assert!(values.windows(2).all(|w| w[0] >= w[1]), "{values:?}");
}

#[test]
fn single_scenario_uses_its_only_price() {
    let mut sim = MonteCarloSimulation::new(params(1, vec![0.9, 0.99]), DrawProvider::live(1));
    let result = sim.compute().unwrap();
    assert_eq!(result.terminal_prices.len(), 1);
    let delta = result.terminal_prices[0] - 100.0;
    assert_eq!(result.percentile_var.values(), vec![delta, delta]);
}

#[test]
fn spread_across_seeds_shrinks_with_scenarios() {
    let spread = |scenarios| {
        let vars: Vec<f64> = (0..8).map(|seed| percentile_var(scenarios, seed)).collect();
        statistics::std_dev(&vars).unwrap()
    };
    let coarse = spread(100);
    let fine = spread(10_000);
    assert!(fine < coarse, "coarse {coarse}, fine {fine}");
    assert!(fine < 0.1);
}

#[test]
fn sub_steps_preserve_log_volatility() {
    let params = SimulationParams::builder()
        .distribution(NormalDistributionParams::new(0.0, 0.01).unwrap())
        .initial_price(100.0)
        .time_horizon(10)
        .intra_period_steps(8)
        .scenarios(5_000)
        .build()
        .unwrap();
    let mut sim = MonteCarloSimulation::new(params, DrawProvider::live(99));
    let result = sim.compute().unwrap();
    let log_moves: Vec<f64> = result
        .terminal_prices
        .iter()
        .map(|p| (p / 100.0).ln())
        .collect();
    let sd = statistics::std_dev(&log_moves).unwrap();
    assert_relative_eq!(sd, 0.01 * 10f64.sqrt(), max_relative = 0.05);
}

#[test]
fn summary_mentions_scenarios() {
    let mut sim = MonteCarloSimulation::new(params(250, vec![0.95]), DrawProvider::live(4));
    assert!(sim.compute().unwrap().summary().starts_with("n=250"));
}
