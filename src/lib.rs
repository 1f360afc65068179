//! Monte Carlo projection of portfolio wealth.
//!
//! The crate simulates many independent runs of yearly compounding, each driven by random
//! annual returns, and summarizes where the portfolio may end up. Returns come either from a
//! single-asset normal model or from a correlated multivariate normal over several assets,
//! combined through normalized portfolio weights.
//!
//! Pipeline, leaves first:
//! - [`model`]: asset assumptions (expected return, volatility, correlation) and weight
//!   normalization,
//! - [`mc`]: return samplers and the path simulator,
//! - [`stats`]: final-value summary and per-year percentile envelopes,
//! - [`engine`]: validation and orchestration behind [`engine::simulate`].
//!
//! References:
//! - Glasserman (2004), *Monte Carlo Methods in Financial Engineering*, Ch. 2 for
//!   correlated normal sampling.
//! - Hyndman and Fan (1996), *Sample Quantiles in Statistical Packages*, definition 7 for
//!   the percentile convention.
//!
//! Numerical considerations:
//! - Output is a deterministic function of the seed and the execution mode.
//! - Percentiles use linear interpolation between order statistics everywhere.
//! - Balances are not floored by default; a yearly return below -100% makes wealth negative.
//!
//! # Feature Flags
//! - `parallel` (default): runs shards on Rayon's thread pool.
//!
//! # Quick Start
//! Project a single diversified fund:
//! ```rust
//! use portfolio_projection::core::SimulationConfig;
//! use portfolio_projection::engine::simulate;
//! use portfolio_projection::model::AssetModel;
//!
//! let config = SimulationConfig::builder()
//!     .initial_investment(10_000.0)
//!     .years(30)
//!     .simulations(100)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let fund = AssetModel::single("equity", 0.07, 0.124).unwrap();
//!
//! let result = simulate(&config, &fund, None).unwrap();
//! assert_eq!(result.final_values.len(), 100);
//! assert!(result.summary.p10 <= result.summary.median);
//! assert!(result.summary.median <= result.summary.p90);
//! ```
//!
//! Correlated three-asset basket:
//! ```rust
//! use portfolio_projection::core::{ExecutionMode, SimulationConfig};
//! use portfolio_projection::engine::simulate;
//! use portfolio_projection::model::AssetModel;
//!
//! let basket = AssetModel::new(
//!     ["stocks", "bonds", "gold"],
//!     vec![0.08, 0.03, 0.04],
//!     vec![0.18, 0.06, 0.15],
//!     vec![
//!         vec![1.0, 0.2, 0.1],
//!         vec![0.2, 1.0, 0.0],
//!         vec![0.1, 0.0, 1.0],
//!     ],
//! )
//! .unwrap();
//! let config = SimulationConfig::builder()
//!     .years(10)
//!     .simulations(200)
//!     .seed(7)
//!     .execution(ExecutionMode::Sharded { shards: 4 })
//!     .build()
//!     .unwrap();
//!
//! let result = simulate(&config, &basket, Some(&[60.0, 30.0, 10.0])).unwrap();
//! assert_eq!(result.envelope.len(), 11);
//! ```

pub mod core;
pub mod engine;
pub mod math;
pub mod mc;
pub mod model;
pub mod stats;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engine::{simulate, simulate_with_cancel};
    pub use crate::mc::{CancelFlag, ReturnSampler, Trajectory};
    pub use crate::model::*;
    pub use crate::stats::*;
}
