//! Module `mc::simulation`.
//!
//! Path compounding: every run starts at the initial investment and, for each year, draws one
//! portfolio return `r` and updates `balance *= 1 + r`.
//!
//! Runs never share balances or draws. In sequential mode all runs consume one generator in
//! run order; in sharded mode each contiguous shard owns a generator seeded from
//! `stream_seed(seed, shard_index)`, so output depends on `(seed, shards)` and not on
//! scheduling.
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ExecutionMode, SimulationConfig, SimulationError, WealthFloor};
use crate::math::{SimRng, seeded_rng, split_runs, stream_seed};
use crate::mc::CancelFlag;
use crate::mc::sampler::ReturnSampler;

/// Wealth at year 0 through year `years` for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory(Vec<f64>);

impl Trajectory {
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wealth at year 0, `None` for an empty trajectory.
    #[inline]
    pub fn initial_value(&self) -> Option<f64> {
        self.0.first().copied()
    }

    /// Wealth at the horizon, `None` for an empty trajectory.
    #[inline]
    pub fn final_value(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Wealth at the end of `year`, if within the horizon.
    #[inline]
    pub fn at(&self, year: usize) -> Option<f64> {
        self.0.get(year).copied()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for Trajectory {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Compounds yearly returns from one sampler into trajectories.
#[derive(Debug, Clone)]
pub struct PathSimulator<'a, S: ReturnSampler> {
    sampler: &'a S,
    initial_investment: f64,
    years: usize,
    wealth_floor: WealthFloor,
}

impl<'a, S: ReturnSampler> PathSimulator<'a, S> {
    /// Takes horizon, start balance and floor policy from `config`.
    ///
    /// No validation happens here; `years == 0` produces single-point trajectories.
    pub fn new(sampler: &'a S, config: &SimulationConfig) -> Self {
        Self {
            sampler,
            initial_investment: config.initial_investment,
            years: config.years,
            wealth_floor: config.wealth_floor,
        }
    }

    /// Simulates one run, drawing `years` returns from `rng`.
    pub fn simulate_run(&self, rng: &mut SimRng) -> Trajectory {
        let mut path = Vec::with_capacity(self.years + 1);
        let mut balance = self.initial_investment;
        path.push(balance);

        for _ in 0..self.years {
            let r = self.sampler.sample_return(rng);
            balance = self.wealth_floor.apply(balance * (1.0 + r));
            path.push(balance);
        }

        Trajectory(path)
    }

    /// Simulates `n_runs` consecutive runs on one generator.
    ///
    /// Returns [`SimulationError::Cancelled`] if `cancel` is raised before a run starts.
    pub fn simulate_runs(
        &self,
        n_runs: usize,
        rng: &mut SimRng,
        cancel: Option<&CancelFlag>,
    ) -> Result<Vec<Trajectory>, SimulationError> {
        let mut runs = Vec::with_capacity(n_runs);
        for _ in 0..n_runs {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                return Err(SimulationError::Cancelled);
            }
            runs.push(self.simulate_run(rng));
        }
        Ok(runs)
    }
}

/// Simulates `config.simulations` runs under `config.execution`.
///
/// `seed` is the resolved invocation seed. Trajectories come back in run-index order.
pub fn simulate_paths<S: ReturnSampler>(
    config: &SimulationConfig,
    sampler: &S,
    seed: u64,
    cancel: Option<&CancelFlag>,
) -> Result<Vec<Trajectory>, SimulationError> {
    let simulator = PathSimulator::new(sampler, config);

    match config.execution {
        ExecutionMode::Sequential => {
            let mut rng = seeded_rng(seed);
            simulator.simulate_runs(config.simulations, &mut rng, cancel)
        }
        ExecutionMode::Sharded { shards } => {
            let sizes = split_runs(config.simulations, shards);
            debug!(shards = sizes.len(), ?sizes, "sharding runs");

            let run_shard = |(index, n_runs): (usize, usize)| {
                let mut rng = seeded_rng(stream_seed(seed, index));
                simulator.simulate_runs(n_runs, &mut rng, cancel)
            };

            #[cfg(feature = "parallel")]
            let shard_runs = sizes
                .into_par_iter()
                .enumerate()
                .map(run_shard)
                .collect::<Result<Vec<_>, _>>()?;
            #[cfg(not(feature = "parallel"))]
            let shard_runs = sizes
                .into_iter()
                .enumerate()
                .map(run_shard)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(shard_runs.into_iter().flatten().collect())
        }
    }
}
