//! Monte Carlo VaR.
//!
//! [`SimulationParams`] fixes the run shape, a [`DrawProvider`](crate::draws::DrawProvider)
//! supplies the uniforms, and [`MonteCarloSimulation::compute`] produces a
//! [`SimulationResult`].

mod params;
mod result;
mod simulation;

pub use params::{SimulationParams, SimulationParamsBuilder, DEFAULT_HISTOGRAM_BUCKETS};
pub use result::SimulationResult;
pub use simulation::MonteCarloSimulation;
