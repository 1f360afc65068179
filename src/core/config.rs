//! Module `core::config`.
//!
//! Simulation configuration and its builder. Defaults reproduce the classic single-fund
//! projection: 10,000 invested for 30 years over 100 runs with seed 42.

use serde::{Deserialize, Serialize};

use crate::core::SimulationError;

pub const DEFAULT_INITIAL_INVESTMENT: f64 = 10_000.0;
pub const DEFAULT_YEARS: usize = 30;
pub const DEFAULT_SIMULATIONS: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

/// Policy applied to a balance after each compounding step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WealthFloor {
    /// Balances may go negative after a return below -100% and keep compounding.
    #[default]
    Unclamped,
    /// Balances are floored at zero; ruin is absorbing.
    Zero,
}

impl WealthFloor {
    #[inline]
    pub fn apply(self, balance: f64) -> f64 {
        match self {
            Self::Unclamped => balance,
            Self::Zero => balance.max(0.0),
        }
    }
}

/// How runs are mapped onto random streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExecutionMode {
    /// All runs consume one generator seeded once, in run order.
    #[default]
    Sequential,
    /// Runs are split into contiguous shards, each with its own derived seed.
    ///
    /// Results depend on `(seed, shards)` only, never on thread scheduling.
    Sharded { shards: usize },
}

/// Immutable inputs of one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting balance of every run.
    pub initial_investment: f64,
    /// Horizon in whole years.
    pub years: usize,
    /// Number of independent runs.
    pub simulations: usize,
    /// Fixed seed for reproducible output; `None` draws a fresh seed per invocation.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub wealth_floor: WealthFloor,
    #[serde(default)]
    pub execution: ExecutionMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_investment: DEFAULT_INITIAL_INVESTMENT,
            years: DEFAULT_YEARS,
            simulations: DEFAULT_SIMULATIONS,
            seed: Some(DEFAULT_SEED),
            wealth_floor: WealthFloor::Unclamped,
            execution: ExecutionMode::Sequential,
        }
    }
}

impl SimulationConfig {
    /// Starts a configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Checks the positivity constraints on investment, horizon, run and shard counts.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.initial_investment.is_finite() || self.initial_investment <= 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "initial_investment must be finite and > 0, got {}",
                self.initial_investment
            )));
        }
        if self.years == 0 {
            return Err(SimulationError::InvalidConfig(
                "years must be > 0".to_string(),
            ));
        }
        if self.simulations == 0 {
            return Err(SimulationError::InvalidConfig(
                "simulations must be > 0".to_string(),
            ));
        }
        if let ExecutionMode::Sharded { shards: 0 } = self.execution {
            return Err(SimulationError::InvalidConfig(
                "sharded execution requires at least one shard".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of wealth points per trajectory, year 0 included.
    #[inline]
    pub fn path_len(&self) -> usize {
        self.years + 1
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Debug, Clone, Default)]
pub struct SimulationConfigBuilder {
    initial_investment: Option<f64>,
    years: Option<usize>,
    simulations: Option<usize>,
    seed: Option<u64>,
    wealth_floor: Option<WealthFloor>,
    execution: Option<ExecutionMode>,
}

impl SimulationConfigBuilder {
    /// Sets the starting balance.
    #[inline]
    pub fn initial_investment(mut self, initial_investment: f64) -> Self {
        self.initial_investment = Some(initial_investment);
        self
    }

    /// Sets the horizon in years.
    #[inline]
    pub fn years(mut self, years: usize) -> Self {
        self.years = Some(years);
        self
    }

    /// Sets the number of runs.
    #[inline]
    pub fn simulations(mut self, simulations: usize) -> Self {
        self.simulations = Some(simulations);
        self
    }

    /// Fixes the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn wealth_floor(mut self, wealth_floor: WealthFloor) -> Self {
        self.wealth_floor = Some(wealth_floor);
        self
    }

    pub fn execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = Some(execution);
        self
    }

    /// Validates and builds a [`SimulationConfig`].
    ///
    /// Unset sizes fall back to the crate defaults; an unset seed stays unset.
    pub fn build(self) -> Result<SimulationConfig, SimulationError> {
        let config = SimulationConfig {
            initial_investment: self
                .initial_investment
                .unwrap_or(DEFAULT_INITIAL_INVESTMENT),
            years: self.years.unwrap_or(DEFAULT_YEARS),
            simulations: self.simulations.unwrap_or(DEFAULT_SIMULATIONS),
            seed: self.seed,
            wealth_floor: self.wealth_floor.unwrap_or_default(),
            execution: self.execution.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}
