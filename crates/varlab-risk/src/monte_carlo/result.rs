//! Output of a Monte Carlo run.

use serde::Serialize;

use varlab_math::distributions::NormalDistributionParams;
use varlab_math::histogram::Histogram;
use varlab_math::statistics::percentile_sorted;

use crate::error::RiskResult;
use crate::var::VaRResult;

/// Terminal price distribution and VaR estimates of one simulation.
///
/// Both VaR results are price changes relative to the initial price, so a
/// loss is negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Terminal prices, ascending.
    pub terminal_prices: Vec<f64>,
    /// Histogram over the terminal prices.
    pub histogram: Histogram,
    /// Percentile of terminal prices at `1 - ci`, minus the initial price.
    pub percentile_var: VaRResult,
    /// Parametric VaR of the normal fitted to terminal prices, minus the initial price.
    pub parametric_var: VaRResult,
    /// Normal fitted to the terminal prices.
    pub terminal_distribution: NormalDistributionParams,
    /// True when every path ended on the same price.
    pub degenerate: bool,
}

impl SimulationResult {
    /// Number of simulated paths.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.terminal_prices.len()
    }

    /// Lowest terminal price.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.terminal_prices.first().copied()
    }

    /// Highest terminal price.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.terminal_prices.last().copied()
    }

    /// Terminal price percentile, `pct` in `[0, 100]`.
    pub fn percentile(&self, pct: f64) -> RiskResult<f64> {
        Ok(percentile_sorted(&self.terminal_prices, pct)?)
    }

    /// One-line summary of the terminal distribution.
    #[must_use]
    pub fn summary(&self) -> String {
        let median = self.percentile(50.0).unwrap_or(f64::NAN);
        format!(
            "n={} [{}] {:.5}/{:.5}/{:.5}{}",
            self.scenario_count(),
            self.terminal_distribution,
            self.min().unwrap_or(f64::NAN),
            median,
            self.max().unwrap_or(f64::NAN),
            if self.degenerate { " (degenerate)" } else { "" }
        )
    }
}
