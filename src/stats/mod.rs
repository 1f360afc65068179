//! Aggregation of simulated trajectories into the published result set.

pub mod result;
pub mod summary;

pub use result::SimulationResult;
pub use summary::{
    LOWER_PERCENTILE, MEDIAN_PERCENTILE, PercentileEnvelope, SummaryStats, UPPER_PERCENTILE,
};
