//! Benchmarks for the Monte Carlo path simulator.
//!
//! Run with: cargo bench -p varlab-risk

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use varlab_core::ReturnType;
use varlab_math::distributions::NormalDistributionParams;
use varlab_risk::{run_batch, DrawProvider, MonteCarloSimulation, SimulationParams};

fn params(scenarios: usize, steps: u32, return_type: ReturnType) -> SimulationParams {
    SimulationParams::builder()
        .distribution(NormalDistributionParams::new(0.0003, 0.012).unwrap())
        .initial_price(100.0)
        .time_horizon(10)
        .intra_period_steps(steps)
        .scenarios(scenarios)
        .return_type(return_type)
        .build()
        .unwrap()
}

fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc_scenarios");
    for scenarios in [1_000, 10_000] {
        let p = params(scenarios, 8, ReturnType::Log);
        group.throughput(Throughput::Elements(p.draw_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(scenarios), &p, |b, p| {
            b.iter(|| {
                let mut sim = MonteCarloSimulation::new(p.clone(), DrawProvider::live(1));
                black_box(sim.compute().unwrap().percentile_var.values())
            });
        });
    }
    group.finish();
}

fn bench_recording_overhead(c: &mut Criterion) {
    let p = params(1_000, 8, ReturnType::Classic);
    let mut group = c.benchmark_group("mc_draw_mode");
    group.bench_function("live", |b| {
        b.iter(|| MonteCarloSimulation::new(p.clone(), DrawProvider::live(1)).run().unwrap());
    });
    group.bench_function("recording", |b| {
        b.iter(|| MonteCarloSimulation::new(p.clone(), DrawProvider::recording(1)).run().unwrap());
    });
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    c.bench_function("mc_batch_6x1000", |b| {
        b.iter(|| {
            let jobs = (0..6)
                .map(|seed| (params(1_000, 8, ReturnType::Log), DrawProvider::live(seed)))
                .collect();
            black_box(run_batch(jobs))
        });
    });
}

criterion_group!(benches, bench_scenarios, bench_recording_overhead, bench_batch);
criterion_main!(benches);
