//! Engine facade: validation, sampler selection, path simulation, and aggregation.
//!
//! All input checks run before the first draw. An invocation either returns a complete
//! [`SimulationResult`] or exactly one [`SimulationError`]; nothing is retried and no invalid
//! input is replaced by a default.

use tracing::{info, info_span, warn};

use crate::core::{SimulationConfig, SimulationError};
use crate::math::resolve_seed;
use crate::mc::{CancelFlag, ReturnSampler, SamplerKind, simulate_paths};
use crate::model::{AssetModel, PortfolioWeights};
use crate::stats::SimulationResult;

/// Runs a full projection.
///
/// `raw_weights` must have one entry per asset; `None` means equal weighting.
///
/// # Examples
/// ```rust
/// use portfolio_projection::core::SimulationConfig;
/// use portfolio_projection::engine::simulate;
/// use portfolio_projection::model::AssetModel;
///
/// let config = SimulationConfig::builder()
///     .initial_investment(10_000.0)
///     .years(1)
///     .simulations(1)
///     .seed(42)
///     .build()
///     .unwrap();
/// let flat = AssetModel::single("cash", 0.0, 0.0).unwrap();
///
/// let result = simulate(&config, &flat, None).unwrap();
/// assert_eq!(result.trajectories[0].values(), &[10_000.0, 10_000.0]);
/// ```
pub fn simulate(
    config: &SimulationConfig,
    model: &AssetModel,
    raw_weights: Option<&[f64]>,
) -> Result<SimulationResult, SimulationError> {
    run(config, model, raw_weights, None)
}

/// [`simulate`] with a cancel flag checked before every run.
///
/// A raised flag yields [`SimulationError::Cancelled`] and discards the runs completed so far.
pub fn simulate_with_cancel(
    config: &SimulationConfig,
    model: &AssetModel,
    raw_weights: Option<&[f64]>,
    cancel: &CancelFlag,
) -> Result<SimulationResult, SimulationError> {
    run(config, model, raw_weights, Some(cancel))
}

/// Validates inputs and builds the sampler without simulating anything.
pub fn prepare(
    config: &SimulationConfig,
    model: &AssetModel,
    raw_weights: Option<&[f64]>,
) -> Result<(SamplerKind, PortfolioWeights), SimulationError> {
    config.validate()?;
    model.validate()?;

    let weights = match raw_weights {
        Some(raw) => PortfolioWeights::normalize(raw)?,
        None => PortfolioWeights::equal(model.n_assets())?,
    };
    if weights.len() != model.n_assets() {
        return Err(SimulationError::InvalidModel(format!(
            "{} weights supplied for {} assets",
            weights.len(),
            model.n_assets()
        )));
    }

    let sampler = SamplerKind::for_model(model, &weights)?;
    Ok((sampler, weights))
}

fn run(
    config: &SimulationConfig,
    model: &AssetModel,
    raw_weights: Option<&[f64]>,
    cancel: Option<&CancelFlag>,
) -> Result<SimulationResult, SimulationError> {
    let (sampler, _weights) = prepare(config, model, raw_weights)?;
    let seed = resolve_seed(config.seed);

    let span = info_span!("simulate", seed, assets = sampler.dimension());
    let _guard = span.enter();
    info!(
        simulations = config.simulations,
        years = config.years,
        initial_investment = config.initial_investment,
        execution = ?config.execution,
        "starting projection"
    );

    let trajectories = match simulate_paths(config, &sampler, seed, cancel) {
        Ok(trajectories) => trajectories,
        Err(SimulationError::Cancelled) => {
            warn!("projection cancelled; discarding completed runs");
            return Err(SimulationError::Cancelled);
        }
        Err(e) => return Err(e),
    };

    let result = SimulationResult::from_trajectories(trajectories, config.initial_investment, seed)
        .ok_or_else(|| SimulationError::InvalidConfig("no runs were simulated".to_string()))?;

    info!(
        mean = result.summary.mean,
        median = result.summary.median,
        p10 = result.summary.p10,
        p90 = result.summary.p90,
        "projection complete"
    );
    Ok(result)
}
