//! Correlation and covariance algebra for multi-asset return sampling.
//!
//! References:
//! - Glasserman, P. (2004), *Monte Carlo Methods in Financial Engineering*, Sec. 2.3.
//! - Higham, N. (2002), *Computing the nearest correlation matrix*.
//!
//! Matrices are plain row-major `Vec<Vec<f64>>`; eigen decompositions go through `nalgebra`.
//! Positive semi-definiteness is checked on the minimum eigenvalue, and the Cholesky routine
//! accepts rank-deficient input (perfectly correlated assets, zero-volatility assets) by
//! zeroing the columns whose pivot vanishes.

use nalgebra::{DMatrix, SymmetricEigen};

/// Absolute tolerance on matrix symmetry and the unit diagonal.
pub const SYMMETRY_TOL: f64 = 1.0e-10;

/// Eigenvalue tolerance, relative to the largest diagonal entry, for PSD checks.
pub const PSD_TOL: f64 = 1.0e-10;

/// Validates that `corr_matrix` is a finite, symmetric `n_assets x n_assets`
/// correlation matrix with unit diagonal and entries in `[-1, 1]`.
pub fn validate_correlation_matrix(
    corr_matrix: &[Vec<f64>],
    n_assets: usize,
) -> Result<(), String> {
    if corr_matrix.len() != n_assets || corr_matrix.iter().any(|row| row.len() != n_assets) {
        return Err(format!(
            "correlation matrix must be {n_assets}x{n_assets} to match asset count"
        ));
    }

    for (i, row_i) in corr_matrix.iter().enumerate() {
        let di = row_i[i];
        if !di.is_finite() || (di - 1.0).abs() > SYMMETRY_TOL {
            return Err(format!("correlation diagonal must be 1, got {di} at ({i}, {i})"));
        }
        for (j, rho) in row_i.iter().copied().enumerate() {
            if !rho.is_finite() || !(-1.0..=1.0).contains(&rho) {
                return Err(format!(
                    "correlation entries must be finite and in [-1, 1], got {rho} at ({i}, {j})"
                ));
            }
            if (rho - corr_matrix[j][i]).abs() > SYMMETRY_TOL {
                return Err(format!("correlation matrix is not symmetric at ({i}, {j})"));
            }
        }
    }

    Ok(())
}

/// Returns the minimum eigenvalue of a symmetric matrix.
pub fn min_eigenvalue_symmetric(matrix: &[Vec<f64>]) -> Option<f64> {
    let n = matrix.len();
    if n == 0 || matrix.iter().any(|row| row.len() != n) {
        return None;
    }

    let eig = SymmetricEigen::new(to_dmatrix(matrix));
    eig.eigenvalues.iter().copied().reduce(f64::min)
}

/// Returns `true` if `matrix` is positive semidefinite within `tol` scaled by its largest
/// diagonal entry.
pub fn is_positive_semidefinite(matrix: &[Vec<f64>], tol: f64) -> bool {
    let scale = max_diagonal(matrix).max(f64::MIN_POSITIVE);
    min_eigenvalue_symmetric(matrix).is_some_and(|lmin| lmin >= -tol * scale)
}

/// Builds `Sigma = diag(vol) * corr * diag(vol)`.
pub fn covariance_from_correlation(volatilities: &[f64], corr_matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    corr_matrix
        .iter()
        .zip(volatilities.iter())
        .map(|(row, si)| {
            row.iter()
                .zip(volatilities.iter())
                .map(|(rho, sj)| si * sj * rho)
                .collect()
        })
        .collect()
}

/// Cholesky decomposition for symmetric positive semidefinite matrices.
///
/// Returns lower-triangular `L` such that `L L^T ~= matrix`, or `None` when the matrix is not
/// square, not finite, or has a negative pivot beyond `tol` (relative to the largest diagonal
/// entry). Pivots within tolerance of zero produce an all-zero column.
pub fn cholesky_lower_psd(matrix: &[Vec<f64>], tol: f64) -> Option<Vec<Vec<f64>>> {
    let n = matrix.len();
    if n == 0
        || matrix.iter().any(|row| row.len() != n)
        || matrix.iter().flatten().any(|x| !x.is_finite())
    {
        return None;
    }

    let scale = max_diagonal(matrix).max(f64::MIN_POSITIVE);
    let pivot_tol = tol * scale;
    // Residual allowed against a zero pivot; cancellation error grows like sqrt(tol).
    let residual_tol = tol.sqrt() * scale;

    let mut l = vec![vec![0.0_f64; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = matrix[i][j];
            for (&lik, &ljk) in l[i].iter().zip(l[j].iter()).take(j) {
                sum -= lik * ljk;
            }

            if i == j {
                if sum < -residual_tol {
                    return None;
                }
                l[i][i] = if sum > pivot_tol { sum.sqrt() } else { 0.0 };
            } else if l[j][j] > 0.0 {
                l[i][j] = sum / l[j][j];
            } else if sum.abs() > residual_tol {
                return None;
            }
        }
    }

    Some(l)
}

/// Applies a lower Cholesky factor to independent normals: `out = L * indep`.
pub fn correlate_normals(chol: &[Vec<f64>], indep: &[f64], out: &mut [f64]) {
    for (i, out_i) in out.iter_mut().enumerate().take(chol.len()) {
        let mut sum = 0.0;
        for (lij, zj) in chol[i].iter().zip(indep.iter()).take(i + 1) {
            sum += lij * zj;
        }
        *out_i = sum;
    }
}

fn max_diagonal(matrix: &[Vec<f64>]) -> f64 {
    matrix
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.get(i).copied())
        .fold(0.0_f64, |acc, d| acc.max(d.abs()))
}

fn to_dmatrix(matrix: &[Vec<f64>]) -> DMatrix<f64> {
    let n = matrix.len();
    let data = matrix
        .iter()
        .flat_map(|row| row.iter().copied())
        .collect::<Vec<_>>();
    DMatrix::from_row_slice(n, n, &data)
}
