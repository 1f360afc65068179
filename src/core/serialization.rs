//! Canonical request and result serialization.
//!
//! [`ProjectionRequest`] bundles everything one engine invocation needs so that callers can
//! ship inputs as JSON, and every result type derives serde so the output can travel back the
//! same way.
//!
//! # Examples
//! ```rust
//! use portfolio_projection::core::{from_json, to_json_pretty, ProjectionRequest};
//! use portfolio_projection::stats::SimulationResult;
//!
//! let payload = r#"{
//!     "config": { "initial_investment": 5000.0, "years": 5, "simulations": 20, "seed": 3 },
//!     "assets": {
//!         "ids": ["equity"],
//!         "expected_returns": [0.06],
//!         "volatilities": [0.15],
//!         "correlation": [[1.0]]
//!     }
//! }"#;
//!
//! let request: ProjectionRequest = from_json(payload).expect("request deserialization");
//! let result = request.run().expect("simulation");
//! assert_eq!(result.final_values.len(), 20);
//!
//! let json = to_json_pretty(&result).expect("json serialization");
//! let decoded: SimulationResult = from_json(&json).expect("json deserialization");
//! assert_eq!(decoded.summary, result.summary);
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{SimulationConfig, SimulationError};
use crate::engine::simulate;
use crate::model::AssetModel;
use crate::stats::SimulationResult;

/// Self-contained engine input payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub config: SimulationConfig,
    pub assets: AssetModel,
    /// Raw weights, one per asset. Omitted means equal weighting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
}

impl Default for ProjectionRequest {
    fn default() -> Self {
        Self {
            config: SimulationConfig::default(),
            assets: AssetModel::default_equity(),
            weights: None,
        }
    }
}

impl ProjectionRequest {
    /// Validates the payload and runs the engine.
    pub fn run(&self) -> Result<SimulationResult, SimulationError> {
        simulate(&self.config, &self.assets, self.weights.as_deref())
    }
}

/// Serialize a value to pretty JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Deserialize a value from JSON.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExecutionMode, WealthFloor};

    #[test]
    fn config_defaults_fill_missing_optional_fields() {
        let cfg: SimulationConfig =
            from_json(r#"{ "initial_investment": 100.0, "years": 2, "simulations": 3 }"#).unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.wealth_floor, WealthFloor::Unclamped);
        assert_eq!(cfg.execution, ExecutionMode::Sequential);
    }

    #[test]
    fn sharded_execution_uses_tagged_representation() {
        let cfg = SimulationConfig {
            execution: ExecutionMode::Sharded { shards: 4 },
            wealth_floor: WealthFloor::Zero,
            ..SimulationConfig::default()
        };
        let json = to_json_pretty(&cfg).unwrap();
        assert!(json.contains(r#""mode": "sharded""#));
        assert!(json.contains(r#""wealth_floor": "zero""#));
        let decoded: SimulationConfig = from_json(&json).unwrap();
        assert_eq!(decoded, cfg);
    }

    #[test]
    fn default_request_runs_classic_projection() {
        let result = ProjectionRequest::default().run().unwrap();
        assert_eq!(result.trajectories.len(), 100);
        assert_eq!(result.seed, 42);
        assert!(result.trajectories.iter().all(|t| t.len() == 31));
    }
}
