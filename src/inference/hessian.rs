//! inference::hessian: observed-information covariance and standard errors.
//!
//! Purpose
//! -------
//! Turn the gradient of a fitted model's cost `c(θ) = NLL(θ)` into a
//! covariance estimate for `θ̂`: the finite-difference Hessian of `c` is the
//! observed information, and its (pseudo-)inverse is the classical
//! covariance.
//!
//! Key behaviors
//! -------------
//! - [`observed_information`]: symmetrized finite-difference Jacobian of the
//!   cost gradient.
//! - [`covariance_matrix`]: eigen-decomposition pseudo-inverse, dropping
//!   eigenvalues at or below `EIGEN_EPS`.
//! - [`calc_standard_errors`]: square roots of the covariance diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - `grad_fn` is the gradient of the **cost** (NLL), not of `ℓ`; a
//!   maximum of `ℓ` then has positive semidefinite information.
//! - Flat or negative-curvature directions contribute nothing to the
//!   covariance rather than producing negative variances.
//!
//! Testing notes
//! -------------
//! - Quadratics with known Hessians check the inverse and the dropping of
//!   singular directions.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        finite_diff::compute_hessian,
        types::{Grad, Hessian, Theta},
    },
    numerical_stability::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Finite-difference Hessian of the cost at `theta_hat`.
///
/// # Errors
/// Non-finite or mis-shaped Hessians from
/// [`compute_hessian`](crate::optimization::loglik_optimizer::finite_diff::compute_hessian).
pub fn observed_information<F: Fn(&Theta) -> Grad>(
    grad_fn: &F, theta_hat: &Theta,
) -> OptResult<Hessian> {
    compute_hessian(grad_fn, theta_hat)
}

/// Pseudo-inverse of the observed information at `theta_hat`.
///
/// # Errors
/// See [`observed_information`].
pub fn covariance_matrix<F: Fn(&Theta) -> Grad>(
    grad_fn: &F, theta_hat: &Theta,
) -> OptResult<Array2<f64>> {
    let info = observed_information(grad_fn, theta_hat)?;
    Ok(pseudo_inverse(&info))
}

/// Classical standard errors for `θ̂`: `sqrt(diag(I(θ̂)⁺))`.
///
/// # Errors
/// See [`observed_information`].
pub fn calc_standard_errors<F: Fn(&Theta) -> Grad>(
    grad_fn: &F, theta_hat: &Theta,
) -> OptResult<Array1<f64>> {
    let cov = covariance_matrix(grad_fn, theta_hat)?;
    Ok(cov.diag().mapv(f64::sqrt))
}

// ---- Helper methods ----

fn to_dmatrix(m: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(m.nrows(), m.ncols(), |i, j| m[[i, j]])
}

/// `Σ_k q_k q_kᵀ / λ_k` over eigenpairs with `λ_k > EIGEN_EPS`.
fn pseudo_inverse(info: &Hessian) -> Array2<f64> {
    let n = info.nrows();
    let eigen = to_dmatrix(info).symmetric_eigen();
    let q = &eigen.eigenvectors;
    let mut cov = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda <= EIGEN_EPS {
            continue;
        }
        for i in 0..n {
            for j in 0..n {
                cov[[i, j]] += q[(i, k)] * q[(j, k)] / lambda;
            }
        }
    }
    cov
}
