//! Module `model::asset`.
//!
//! Per-asset return assumptions (expected annual return, annual volatility) plus the pairwise
//! correlation structure, and the covariance matrix they imply.

use serde::{Deserialize, Serialize};

use crate::core::SimulationError;
use crate::math::{
    PSD_TOL, covariance_from_correlation, is_positive_semidefinite, min_eigenvalue_symmetric,
    validate_correlation_matrix,
};

/// Expected annual return of the default single-fund model.
pub const DEFAULT_EXPECTED_RETURN: f64 = 0.07;
/// Annual volatility of the default single-fund model.
pub const DEFAULT_VOLATILITY: f64 = 0.124;

/// Annual return model over `K >= 1` assets.
///
/// `K == 1` is the scalar model: samplers use `(expected_returns[0], volatilities[0])` directly
/// and never touch the correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetModel {
    /// Asset identifiers in sampling order.
    pub ids: Vec<String>,
    /// Expected annual simple return per asset.
    pub expected_returns: Vec<f64>,
    /// Annual return volatility per asset.
    pub volatilities: Vec<f64>,
    /// Symmetric, unit-diagonal, PSD correlation matrix.
    pub correlation: Vec<Vec<f64>>,
}

impl AssetModel {
    /// Builds and validates a multi-asset model.
    pub fn new<S: Into<String>>(
        ids: impl IntoIterator<Item = S>,
        expected_returns: Vec<f64>,
        volatilities: Vec<f64>,
        correlation: Vec<Vec<f64>>,
    ) -> Result<Self, SimulationError> {
        let model = Self {
            ids: ids.into_iter().map(Into::into).collect(),
            expected_returns,
            volatilities,
            correlation,
        };
        model.validate()?;
        Ok(model)
    }

    /// Builds the scalar model for one asset.
    pub fn single<S: Into<String>>(
        id: S,
        expected_return: f64,
        volatility: f64,
    ) -> Result<Self, SimulationError> {
        Self::new(
            [id],
            vec![expected_return],
            vec![volatility],
            vec![vec![1.0]],
        )
    }

    /// Single diversified fund with 7% expected return and 12.4% volatility.
    pub fn default_equity() -> Self {
        Self {
            ids: vec!["equity".to_string()],
            expected_returns: vec![DEFAULT_EXPECTED_RETURN],
            volatilities: vec![DEFAULT_VOLATILITY],
            correlation: vec![vec![1.0]],
        }
    }

    #[inline]
    pub fn n_assets(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_single_asset(&self) -> bool {
        self.n_assets() == 1
    }

    /// Checks shapes, finiteness, volatility signs, the correlation matrix, and that the
    /// implied covariance is positive semidefinite.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let k = self.n_assets();
        if k == 0 {
            return Err(SimulationError::InvalidModel(
                "asset model requires at least one asset".to_string(),
            ));
        }
        if self.expected_returns.len() != k {
            return Err(SimulationError::InvalidModel(format!(
                "expected_returns has {} entries for {k} assets",
                self.expected_returns.len()
            )));
        }
        if self.volatilities.len() != k {
            return Err(SimulationError::InvalidModel(format!(
                "volatilities has {} entries for {k} assets",
                self.volatilities.len()
            )));
        }
        if let Some(mu) = self.expected_returns.iter().find(|mu| !mu.is_finite()) {
            return Err(SimulationError::InvalidModel(format!(
                "expected returns must be finite, got {mu}"
            )));
        }
        if let Some(sigma) = self
            .volatilities
            .iter()
            .find(|sigma| !sigma.is_finite() || **sigma < 0.0)
        {
            return Err(SimulationError::InvalidModel(format!(
                "volatilities must be finite and >= 0, got {sigma}"
            )));
        }

        validate_correlation_matrix(&self.correlation, k).map_err(SimulationError::InvalidModel)?;

        if k > 1 {
            let cov = self.covariance();
            if !is_positive_semidefinite(&cov, PSD_TOL) {
                let lmin = min_eigenvalue_symmetric(&cov).unwrap_or(f64::NAN);
                return Err(SimulationError::InvalidModel(format!(
                    "covariance matrix is not positive semidefinite (min eigenvalue {lmin:.3e})"
                )));
            }
        }

        Ok(())
    }

    /// `Sigma = diag(sigma) * rho * diag(sigma)`.
    pub fn covariance(&self) -> Vec<Vec<f64>> {
        covariance_from_correlation(&self.volatilities, &self.correlation)
    }

    /// Per-asset variances (the covariance diagonal).
    pub fn variances(&self) -> Vec<f64> {
        self.volatilities.iter().map(|s| s * s).collect()
    }
}
