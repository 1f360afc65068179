//! Return model inputs: asset assumptions and portfolio allocation.

pub mod asset;
pub mod weights;

pub use asset::{AssetModel, DEFAULT_EXPECTED_RETURN, DEFAULT_VOLATILITY};
pub use weights::PortfolioWeights;
