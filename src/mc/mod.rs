//! Monte Carlo machinery: return samplers, path compounding, and batch cancellation.

pub mod cancel;
pub mod sampler;
pub mod simulation;

pub use cancel::CancelFlag;
pub use sampler::{CorrelatedReturnSampler, ReturnSampler, SamplerKind, ScalarReturnSampler};
pub use simulation::{PathSimulator, Trajectory, simulate_paths};
