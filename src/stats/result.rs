use serde::{Deserialize, Serialize};

use crate::mc::Trajectory;
use crate::stats::{PercentileEnvelope, SummaryStats};

/// Everything one engine invocation produces.
///
/// Owns its trajectories; read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Seed the random streams were derived from.
    pub seed: u64,
    /// Starting balance shared by every run.
    pub initial_investment: f64,
    /// One trajectory per run, in run-index order.
    pub trajectories: Vec<Trajectory>,
    /// Last value of every trajectory.
    pub final_values: Vec<f64>,
    pub summary: SummaryStats,
    pub envelope: PercentileEnvelope,
}

impl SimulationResult {
    /// Aggregates a trajectory set.
    ///
    /// Returns `None` when the set is empty, a trajectory is empty, or lengths differ.
    pub fn from_trajectories(
        trajectories: Vec<Trajectory>,
        initial_investment: f64,
        seed: u64,
    ) -> Option<Self> {
        let envelope = PercentileEnvelope::from_trajectories(&trajectories)?;
        let final_values = trajectories
            .iter()
            .map(Trajectory::final_value)
            .collect::<Option<Vec<f64>>>()?;
        let summary = SummaryStats::from_values(&final_values)?;

        Some(Self {
            seed,
            initial_investment,
            trajectories,
            final_values,
            summary,
            envelope,
        })
    }

    #[inline]
    pub fn simulations(&self) -> usize {
        self.trajectories.len()
    }

    /// Horizon in years.
    #[inline]
    pub fn years(&self) -> usize {
        self.envelope.len().saturating_sub(1)
    }

    /// Share of runs that end below the initial investment.
    pub fn shortfall_probability(&self) -> f64 {
        let below = self
            .final_values
            .iter()
            .filter(|v| **v < self.initial_investment)
            .count();
        below as f64 / self.final_values.len() as f64
    }
}
