//! Cross-run statistics: final-value summary and per-year percentile envelopes.
//!
//! Every percentile here goes through [`percentile_sorted`], the linear-interpolation rule
//! (`rank = p * (n - 1)`), so the envelope's final column and the summary agree bit for bit.

use serde::{Deserialize, Serialize};

use crate::math::{mean, percentile_sorted};
use crate::mc::Trajectory;

/// Lower band percentile.
pub const LOWER_PERCENTILE: f64 = 10.0;
/// Central percentile.
pub const MEDIAN_PERCENTILE: f64 = 50.0;
/// Upper band percentile.
pub const UPPER_PERCENTILE: f64 = 90.0;

/// Summary of the final-value distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Summarizes a non-empty sample. Returns `None` for an empty one.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let (p10, median, p90) = band(&sorted);

        Some(Self {
            mean: mean(values),
            median,
            p10,
            p90,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }

    /// Rows in display order: Mean, Median, 10th %, 90th %, Min, Max.
    pub fn rows(&self) -> [(&'static str, f64); 6] {
        [
            ("Mean", self.mean),
            ("Median", self.median),
            ("10th %", self.p10),
            ("90th %", self.p90),
            ("Min", self.min),
            ("Max", self.max),
        ]
    }
}

/// Per-year 10th / 50th / 90th percentiles across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileEnvelope {
    pub p10: Vec<f64>,
    pub median: Vec<f64>,
    pub p90: Vec<f64>,
}

impl PercentileEnvelope {
    /// Column-wise percentiles over the trajectory matrix.
    ///
    /// Returns `None` when trajectory lengths differ; an empty input gives an empty envelope.
    pub fn from_trajectories(trajectories: &[Trajectory]) -> Option<Self> {
        let path_len = trajectories.first().map_or(0, Trajectory::len);
        if trajectories.iter().any(|t| t.len() != path_len) {
            return None;
        }
        let mut envelope = Self {
            p10: Vec::with_capacity(path_len),
            median: Vec::with_capacity(path_len),
            p90: Vec::with_capacity(path_len),
        };

        let mut column = Vec::with_capacity(trajectories.len());
        for year in 0..path_len {
            column.clear();
            column.extend(trajectories.iter().map(|t| t.values()[year]));
            column.sort_by(|a, b| a.total_cmp(b));

            let (p10, median, p90) = band(&column);
            envelope.p10.push(p10);
            envelope.median.push(median);
            envelope.p90.push(p90);
        }

        Some(envelope)
    }

    /// Number of year points, year 0 included.
    #[inline]
    pub fn len(&self) -> usize {
        self.median.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.median.is_empty()
    }

    /// `(p10, median, p90)` at `year`.
    pub fn at(&self, year: usize) -> Option<(f64, f64, f64)> {
        Some((
            *self.p10.get(year)?,
            *self.median.get(year)?,
            *self.p90.get(year)?,
        ))
    }
}

#[inline]
fn band(sorted: &[f64]) -> (f64, f64, f64) {
    (
        percentile_sorted(sorted, LOWER_PERCENTILE),
        percentile_sorted(sorted, MEDIAN_PERCENTILE),
        percentile_sorted(sorted, UPPER_PERCENTILE),
    )
}
