//! loglik_optimizer::finite_diff: finite-difference gradients and Hessians.
//!
//! Purpose
//! -------
//! Wrap the `finitediff` crate with error capture and validation so the
//! adapter (gradient fallback) and the inference layer (observed information)
//! get derivatives they can trust or a typed error.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`]: central differences, falling back to forward
//!   differences when an evaluation failed or produced a non-finite entry.
//! - [`compute_hessian`]: central-difference Jacobian of a gradient callback,
//!   with the same forward fallback, symmetrized in place.
//!
//! Conventions
//! -----------
//! - `finitediff` closures must return plain `f64`, so errors raised inside
//!   them are parked in a `RefCell` slot and the closure returns `NaN`; the
//!   first parked error is surfaced after differencing.
//! - Differences are taken in the unconstrained θ space.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        types::{Grad, Hessian, Theta},
        validation::{validate_grad, validate_hessian},
    },
};
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Finite-difference gradient of a fallible scalar function.
///
/// Central differences first; if any evaluation failed or the result does
/// not validate, a forward-difference gradient is attempted once.
///
/// # Errors
/// The first error raised by `func` during the forward pass, or a
/// validation error for the forward-difference gradient.
pub fn fd_gradient<G>(theta: &Theta, func: G) -> OptResult<Grad>
where
    G: Fn(&Theta) -> OptResult<f64>,
{
    let slot: RefCell<Option<OptError>> = RefCell::new(None);
    let capture = |x: &Theta| -> f64 {
        match func(x) {
            Ok(v) => v,
            Err(e) => {
                slot.borrow_mut().get_or_insert(e);
                f64::NAN
            }
        }
    };
    let dim = theta.len();

    let central = theta.central_diff(&capture);
    if slot.borrow().is_none() && validate_grad(&central, dim).is_ok() {
        return Ok(central);
    }
    run_fd_diff(theta, &capture, &slot)
}

/// Forward-difference gradient with error capture through `slot`.
///
/// # Errors
/// A captured error from `func`, or [`validate_grad`] failures.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, slot: &RefCell<Option<OptError>>,
) -> OptResult<Grad> {
    slot.replace(None);
    let grad = theta.forward_diff(func);
    if let Some(err) = slot.take() {
        return Err(err);
    }
    validate_grad(&grad, theta.len())?;
    Ok(grad)
}

/// Symmetrized finite-difference Jacobian of `grad_fn` at `theta`.
///
/// With `grad_fn = ∇c` this is the Hessian of the cost, i.e. the observed
/// information when `c` is an NLL.
///
/// # Errors
/// [`OptError::InvalidHessian`] / [`OptError::HessianDimMismatch`] if
/// neither the central nor the forward approximation validates.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(grad_fn: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(grad_fn);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(grad_fn);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

// ---- Helper methods ----

fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
