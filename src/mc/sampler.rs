//! Module `mc::sampler`.
//!
//! Yearly portfolio return samplers. The scalar sampler draws from `N(mu, sigma^2)` for a
//! single asset; the correlated sampler draws `r = mu + L z` with `L L^T = Sigma` and returns
//! the weighted portfolio return `w . r`.
//!
//! References: Glasserman (2004), Sec. 2.3.3, sampling multivariate normals via Cholesky.

use rand_distr::{Distribution, Normal, StandardNormal};
use tracing::debug;

use crate::core::SimulationError;
use crate::math::{SimRng, cholesky_lower_psd, correlate_normals};
use crate::model::{AssetModel, PortfolioWeights};

/// Pivot tolerance handed to the PSD Cholesky factorization.
const CHOLESKY_TOL: f64 = 1.0e-12;

/// Source of one simulated yearly portfolio return per call.
///
/// Implementations are immutable; all randomness comes from the caller's generator, so the
/// draw sequence is a function of the generator state alone.
pub trait ReturnSampler: Send + Sync {
    /// Number of assets behind each draw.
    fn dimension(&self) -> usize;

    /// Draws one simple portfolio return for one year.
    fn sample_return(&self, rng: &mut SimRng) -> f64;
}

/// Single-asset sampler: the draw is the yearly return.
#[derive(Debug, Clone)]
pub struct ScalarReturnSampler {
    distribution: Normal<f64>,
}

impl ScalarReturnSampler {
    pub fn new(mean: f64, volatility: f64) -> Result<Self, SimulationError> {
        let distribution = Normal::new(mean, volatility).map_err(|e| {
            SimulationError::SamplingFailure(format!(
                "normal(mean={mean}, volatility={volatility}): {e}"
            ))
        })?;
        Ok(Self { distribution })
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.distribution.mean()
    }

    #[inline]
    pub fn volatility(&self) -> f64 {
        self.distribution.std_dev()
    }
}

impl ReturnSampler for ScalarReturnSampler {
    fn dimension(&self) -> usize {
        1
    }

    #[inline]
    fn sample_return(&self, rng: &mut SimRng) -> f64 {
        self.distribution.sample(rng)
    }
}

/// Multi-asset sampler driven by a lower Cholesky factor of the covariance matrix.
#[derive(Debug, Clone)]
pub struct CorrelatedReturnSampler {
    means: Vec<f64>,
    chol: Vec<Vec<f64>>,
    weights: PortfolioWeights,
    /// `w . mu`.
    drift: f64,
    /// `L^T w`, so that `w . (mu + L z) = drift + loadings . z`.
    loadings: Vec<f64>,
}

impl CorrelatedReturnSampler {
    pub fn new(model: &AssetModel, weights: &PortfolioWeights) -> Result<Self, SimulationError> {
        let k = model.n_assets();
        if weights.len() != k {
            return Err(SimulationError::InvalidModel(format!(
                "{} weights supplied for {k} assets",
                weights.len()
            )));
        }

        let chol = cholesky_lower_psd(&model.covariance(), CHOLESKY_TOL).ok_or_else(|| {
            SimulationError::SamplingFailure(
                "covariance matrix could not be factorized".to_string(),
            )
        })?;
        let rank = (0..k).filter(|&i| chol[i][i] > 0.0).count();
        debug!(assets = k, rank, "factorized covariance matrix");

        let w = weights.as_slice();
        let loadings = (0..k)
            .map(|j| (j..k).map(|i| chol[i][j] * w[i]).sum::<f64>())
            .collect();

        Ok(Self {
            means: model.expected_returns.clone(),
            drift: weights.dot(&model.expected_returns),
            chol,
            weights: weights.clone(),
            loadings,
        })
    }

    /// Lower-triangular factor `L` with `L L^T = Sigma`.
    pub fn cholesky(&self) -> &[Vec<f64>] {
        &self.chol
    }

    /// Draws one vector of per-asset returns `mu + L z` into `out`.
    ///
    /// Consumes the same normals, in the same order, as [`ReturnSampler::sample_return`].
    pub fn sample_vector(&self, rng: &mut SimRng, out: &mut [f64]) {
        let z: Vec<f64> = (0..self.means.len())
            .map(|_| StandardNormal.sample(rng))
            .collect();
        correlate_normals(&self.chol, &z, out);
        for (r, mu) in out.iter_mut().zip(self.means.iter()) {
            *r += mu;
        }
    }

    /// Portfolio return implied by one vector of asset returns.
    #[inline]
    pub fn portfolio_return(&self, asset_returns: &[f64]) -> f64 {
        self.weights.dot(asset_returns)
    }
}

impl ReturnSampler for CorrelatedReturnSampler {
    fn dimension(&self) -> usize {
        self.means.len()
    }

    #[inline]
    fn sample_return(&self, rng: &mut SimRng) -> f64 {
        let mut r = self.drift;
        for b in &self.loadings {
            let z: f64 = StandardNormal.sample(rng);
            r += b * z;
        }
        r
    }
}

/// Sampler chosen by asset count: scalar for one asset, correlated otherwise.
#[derive(Debug, Clone)]
pub enum SamplerKind {
    Scalar(ScalarReturnSampler),
    Correlated(CorrelatedReturnSampler),
}

impl SamplerKind {
    pub fn for_model(
        model: &AssetModel,
        weights: &PortfolioWeights,
    ) -> Result<Self, SimulationError> {
        if model.is_single_asset() {
            debug!(
                mean = model.expected_returns[0],
                volatility = model.volatilities[0],
                "using scalar return sampler"
            );
            ScalarReturnSampler::new(model.expected_returns[0], model.volatilities[0])
                .map(Self::Scalar)
        } else {
            debug!(assets = model.n_assets(), "using correlated return sampler");
            CorrelatedReturnSampler::new(model, weights).map(Self::Correlated)
        }
    }
}

impl ReturnSampler for SamplerKind {
    fn dimension(&self) -> usize {
        match self {
            Self::Scalar(s) => s.dimension(),
            Self::Correlated(s) => s.dimension(),
        }
    }

    #[inline]
    fn sample_return(&self, rng: &mut SimRng) -> f64 {
        match self {
            Self::Scalar(s) => s.sample_return(rng),
            Self::Correlated(s) => s.sample_return(rng),
        }
    }
}
