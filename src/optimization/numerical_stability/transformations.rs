//! Numerical stability utilities.
//!
//! Maps between the unconstrained optimizer space and the constrained
//! AR(1) parameter space without ever producing a non-stationary or
//! non-positive iterate.
//!
//! # Provided items
//! - [`STATIONARITY_MARGIN`]: small buffer keeping `|a| ≤ 1 - margin`.
//! - [`bounded_tanh`] / [`bounded_tanh_inv`] / [`bounded_tanh_deriv`]:
//!   `ℝ → (-(1 - margin), 1 - margin)` for the AR coefficient.
//! - [`EIGEN_EPS`]: eigenvalue floor used by pseudo-inverses in inference.
//!
//! Variances use the plain `exp`/`ln` pair (`q = exp(log_q)`), matching the
//! log-variance evaluator variants; no helper is needed for those.

/// Safety margin for strict stationarity of the AR coefficient.
///
/// The optimizer-space map never returns `|a|` closer to 1 than this, so the
/// stationary prior variance `q / (1 - a²)` stays finite for every iterate.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Eigenvalues at or below this are treated as zero when forming
/// pseudo-inverses of an information matrix.
pub const EIGEN_EPS: f64 = 1e-12;

/// Clamp applied to `a / (1 - margin)` before `atanh`, so the inverse map
/// stays finite for coefficients sitting on the boundary.
const ATANH_CLAMP: f64 = 1.0 - 1e-12;

/// Map an unconstrained real to a stationary AR coefficient:
/// `a = (1 - STATIONARITY_MARGIN) · tanh(θ)`.
///
/// `tanh` saturates to ±1 for large `|θ|` without overflow, so this is safe
/// for every finite input.
#[inline]
pub fn bounded_tanh(theta: f64) -> f64 {
    (1.0 - STATIONARITY_MARGIN) * theta.tanh()
}

/// Derivative `da/dθ = (1 - STATIONARITY_MARGIN) · (1 - tanh²(θ))`.
#[inline]
pub fn bounded_tanh_deriv(theta: f64) -> f64 {
    let t = theta.tanh();
    (1.0 - STATIONARITY_MARGIN) * (1.0 - t * t)
}

/// Inverse of [`bounded_tanh`].
///
/// Inputs at or beyond the scaled boundary are clamped first, so the result
/// is always finite (large in magnitude near the boundary).
#[inline]
pub fn bounded_tanh_inv(a: f64) -> f64 {
    let ratio = (a / (1.0 - STATIONARITY_MARGIN)).clamp(-ATANH_CLAMP, ATANH_CLAMP);
    ratio.atanh()
}
