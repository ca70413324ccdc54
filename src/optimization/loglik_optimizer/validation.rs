//! Consistency checks shared by the optimizer layer.
//!
//! - Tolerances: [`verify_tol_grad`], [`verify_tol_cost`].
//! - Derivatives: [`validate_grad`], [`validate_hessian`].
//! - Outcomes: [`validate_theta_hat`], [`validate_value`].
//!
//! Each check reports the first offending entry through a dedicated
//! [`OptError`] variant.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::types::{Grad, Hessian, Theta},
};

fn verify_tol(tol: Option<f64>, make: fn(f64, &'static str) -> OptError) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => Err(make(tol, "Tolerance must be finite.")),
        Some(tol) if tol <= 0.0 => Err(make(tol, "Tolerance must be positive.")),
        _ => Ok(()),
    }
}

/// Optional gradient-norm tolerance: `None`, or finite and > 0.
///
/// # Errors
/// [`OptError::InvalidTolGrad`].
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    verify_tol(tol, |tol, reason| OptError::InvalidTolGrad { tol, reason })
}

/// Optional cost-change tolerance: `None`, or finite and > 0.
///
/// # Errors
/// [`OptError::InvalidTolCost`].
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    verify_tol(tol, |tol, reason| OptError::InvalidTolCost { tol, reason })
}

/// Gradient of length `dim` with finite entries.
///
/// # Errors
/// [`OptError::GradientDimMismatch`] or [`OptError::InvalidGradient`].
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Unwrap the solver's best parameter vector, requiring finite entries.
///
/// # Errors
/// [`OptError::MissingThetaHat`] or [`OptError::InvalidThetaHat`].
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta_hat = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, &value)) = theta_hat.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta_hat)
}

/// Log-likelihood value must be finite.
///
/// # Errors
/// [`OptError::NonFiniteCost`].
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Hessian must be `dim × dim` with finite entries.
///
/// # Errors
/// [`OptError::HessianDimMismatch`] or [`OptError::InvalidHessian`].
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    match hessian.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(OptError::InvalidHessian { row, col, value }),
        None => Ok(()),
    }
}
