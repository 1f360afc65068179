//! Core configuration, result payloads, and library-wide error structures.

pub mod config;
pub mod serialization;

pub use config::*;
pub use serialization::*;

/// Validation and simulation errors surfaced by the API.
///
/// Every variant except [`SimulationError::Cancelled`] is raised before the first run starts,
/// so an error never comes with a partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Non-positive initial investment, horizon, run count, or shard count.
    InvalidConfig(String),
    /// Malformed correlation/covariance or vector lengths that disagree with the asset count.
    InvalidModel(String),
    /// Raw portfolio weights that cannot be normalized.
    DegenerateWeights(String),
    /// Covariance factorization failure.
    SamplingFailure(String),
    /// Batch abandoned through a cancel flag.
    Cancelled,
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidModel(msg) => write!(f, "invalid model: {msg}"),
            Self::DegenerateWeights(msg) => write!(f, "degenerate weights: {msg}"),
            Self::SamplingFailure(msg) => write!(f, "sampling failure: {msg}"),
            Self::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {}
