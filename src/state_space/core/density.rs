//! Scalar Gaussian log-density shared by both likelihood evaluators.
//!
//! Everything here works in log space so that long sequences never underflow:
//! the evaluators accumulate `-log_density(..)` terms instead of multiplying
//! densities. Both functions are generic over `T: Float` so the same code runs
//! for `f32`, `f64`, or a dual-number type used for automatic differentiation.
use crate::state_space::{
    core::validation::{lit, validate_scale},
    errors::SSMResult,
};
use num_traits::Float;

/// `0.5 * ln(2π)`.
pub const HALF_LN_2PI: f64 = 0.918_938_533_204_672_7;

/// Log-density of `N(mean, sd²)` at `x`.
///
/// Computes `-0.5 ln(2π) - ln(sd) - 0.5 ((x - mean) / sd)²`.
///
/// # Errors
/// [`SSMError::InvalidScale`](crate::state_space::errors::SSMError::InvalidScale)
/// if `sd` is ≤ 0 or non-finite.
#[inline]
pub fn log_density<T: Float>(x: T, mean: T, sd: T) -> SSMResult<T> {
    let sd = validate_scale(sd)?;
    let z = (x - mean) / sd;
    Ok(-lit::<T>(HALF_LN_2PI) - sd.ln() - lit::<T>(0.5) * z * z)
}

/// Log-density of `N(mean, var)` at `x`, parameterized by the variance.
///
/// Computes `-0.5 (ln(2π var) + (x - mean)² / var)`, the form the Kalman
/// recursion uses for the one-step prediction residual.
///
/// # Errors
/// [`SSMError::InvalidScale`](crate::state_space::errors::SSMError::InvalidScale)
/// if `var` is ≤ 0 or non-finite.
#[inline]
pub fn log_density_var<T: Float>(x: T, mean: T, var: T) -> SSMResult<T> {
    let var = validate_scale(var)?;
    let resid = x - mean;
    Ok(-lit::<T>(0.5) * ((lit::<T>(std::f64::consts::TAU) * var).ln() + resid * resid / var))
}
