//! Portfolio weight normalization and equal weighting.

use serde::{Deserialize, Serialize};

use crate::core::SimulationError;

/// Normalized allocation over the assets of an [`AssetModel`](crate::model::AssetModel).
///
/// Weights are non-negative and sum to one within floating tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioWeights {
    weights: Vec<f64>,
}

impl PortfolioWeights {
    /// Normalizes raw weights by their sum.
    ///
    /// Fails on an empty vector, a negative or non-finite weight, or a zero sum.
    ///
    /// # Examples
    /// ```rust
    /// use portfolio_projection::model::PortfolioWeights;
    ///
    /// let w = PortfolioWeights::normalize(&[60.0, 30.0, 10.0]).unwrap();
    /// assert!((w.as_slice()[0] - 0.6).abs() < 1.0e-12);
    /// assert!(PortfolioWeights::normalize(&[0.0, 0.0, 0.0]).is_err());
    /// ```
    pub fn normalize(raw: &[f64]) -> Result<Self, SimulationError> {
        if raw.is_empty() {
            return Err(SimulationError::DegenerateWeights(
                "at least one weight is required".to_string(),
            ));
        }
        if let Some((i, w)) = raw
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(SimulationError::DegenerateWeights(format!(
                "weights must be finite and >= 0, got {w} at index {i}"
            )));
        }

        let total = raw.iter().sum::<f64>();
        if total <= 0.0 || !total.is_finite() {
            return Err(SimulationError::DegenerateWeights(format!(
                "weights must have a positive finite sum, got {total}"
            )));
        }

        Ok(Self {
            weights: raw.iter().map(|w| w / total).collect(),
        })
    }

    /// Equal weighting over `n_assets`.
    pub fn equal(n_assets: usize) -> Result<Self, SimulationError> {
        Self::normalize(&vec![1.0; n_assets])
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// `sum_i w_i * x_i`.
    #[inline]
    pub fn dot(&self, values: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(values.iter())
            .map(|(w, x)| w * x)
            .sum()
    }
}
