//! AR(1) structural parameters and the optimizer-space mapping.
//!
//! Purpose
//! -------
//! Hold validated model-space parameters `(a, q, r)` for the AR(1)
//! state-space model and convert them to and from the unconstrained vector
//! `θ` the optimizer works on.
//!
//! Key behaviors
//! -------------
//! - [`AR1Params::new`] validates `|a| < 1`, `q > 0`, `r > 0`.
//! - [`AR1Params::from_log_variances`] builds parameters from `(a, log_q,
//!   log_r)`, the log-variance parameterization.
//! - [`stationary_variance`] computes the prior variance `q / (1 − a²)` of
//!   `x[0]`, shared by the joint likelihood, the filter, and the simulator.
//! - [`VarianceMode`] selects whether `(q, r)` are fixed data or estimated.
//!
//! Conventions
//! -----------
//! - θ layout: `[θ_a]` in [`VarianceMode::Known`], `[θ_a, log_q, log_r]` in
//!   [`VarianceMode::Estimated`], with `a = (1 − margin)·tanh(θ_a)`.
//! - Models that append latent-path values to θ pass only the structural
//!   prefix to [`AR1Params::from_theta`].
use crate::{
    optimization::numerical_stability::transformations::{bounded_tanh, bounded_tanh_inv},
    state_space::{
        core::validation::{lit, validate_coefficient, validate_scale, validate_theta},
        errors::{SSMError, SSMResult},
    },
};
use ndarray::{Array1, ArrayView1, array};
use num_traits::Float;

/// Stationary variance `q / (1 − a²)` of the AR(1) state.
///
/// # Errors
/// - [`SSMError::InvalidScale`] if `q` is ≤ 0 or non-finite.
/// - [`SSMError::NonStationaryCoefficient`] if `|a| ≥ 1`.
#[inline]
pub fn stationary_variance<T: Float>(a: T, q: T) -> SSMResult<T> {
    let q = validate_scale(q)?;
    let a = validate_coefficient(a)?;
    validate_scale(q / (T::one() - a * a))
}

/// How the variance parameters enter an estimation problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarianceMode {
    /// `q` and `r` are fixed data; only `a` (and any latent path) is estimated.
    Known { q: f64, r: f64 },
    /// `log_q` and `log_r` are estimated together with `a`.
    Estimated,
}

impl VarianceMode {
    /// Validated [`VarianceMode::Known`].
    ///
    /// # Errors
    /// [`SSMError::InvalidScale`] if either variance is ≤ 0 or non-finite.
    pub fn known(q: f64, r: f64) -> SSMResult<Self> {
        Ok(VarianceMode::Known { q: validate_scale(q)?, r: validate_scale(r)? })
    }

    /// Number of structural entries at the front of θ.
    pub fn n_structural(&self) -> usize {
        match self {
            VarianceMode::Known { .. } => 1,
            VarianceMode::Estimated => 3,
        }
    }
}

impl Default for VarianceMode {
    fn default() -> Self {
        VarianceMode::Estimated
    }
}

/// Validated model-space parameters of the AR(1) state-space model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AR1Params {
    /// AR coefficient, `|a| < 1`.
    pub a: f64,
    /// State innovation variance, `q > 0`.
    pub q: f64,
    /// Observation noise variance, `r > 0`.
    pub r: f64,
}

impl AR1Params {
    /// Create validated parameters.
    ///
    /// # Errors
    /// - [`SSMError::NonStationaryCoefficient`] if `|a| ≥ 1`.
    /// - [`SSMError::InvalidScale`] if `q` or `r` is ≤ 0 or non-finite.
    pub fn new(a: f64, q: f64, r: f64) -> SSMResult<Self> {
        Ok(AR1Params {
            a: validate_coefficient(a)?,
            q: validate_scale(q)?,
            r: validate_scale(r)?,
        })
    }

    /// Create parameters from log-variances: `q = exp(log_q)`, `r = exp(log_r)`.
    ///
    /// # Errors
    /// As [`AR1Params::new`]; a `log_*` large enough to overflow `exp`
    /// surfaces as [`SSMError::InvalidScale`].
    pub fn from_log_variances(a: f64, log_q: f64, log_r: f64) -> SSMResult<Self> {
        AR1Params::new(a, log_q.exp(), log_r.exp())
    }

    /// Prior variance of `x[0]`, `q / (1 − a²)`.
    pub fn stationary_variance(&self) -> f64 {
        self.q / (1.0 - self.a * self.a)
    }

    /// Build parameters from the structural prefix of an optimizer vector.
    ///
    /// `theta` must hold exactly `mode.n_structural()` finite entries.
    /// In [`VarianceMode::Known`] the variances are taken from the mode.
    ///
    /// # Errors
    /// - [`SSMError::InvalidThetaLength`] / [`SSMError::InvalidThetaInput`]
    ///   for a malformed θ.
    /// - Domain errors from [`AR1Params::new`].
    pub fn from_theta(theta: ArrayView1<f64>, mode: &VarianceMode) -> SSMResult<Self> {
        validate_theta(theta, mode.n_structural())?;
        let a = bounded_tanh(theta[0]);
        match *mode {
            VarianceMode::Known { q, r } => AR1Params::new(a, q, r),
            VarianceMode::Estimated => AR1Params::from_log_variances(a, theta[1], theta[2]),
        }
    }

    /// Map to the structural θ prefix for `mode` (inverse of
    /// [`AR1Params::from_theta`]).
    pub fn to_theta(&self, mode: &VarianceMode) -> Array1<f64> {
        let theta_a = bounded_tanh_inv(self.a);
        match mode {
            VarianceMode::Known { .. } => array![theta_a],
            VarianceMode::Estimated => array![theta_a, self.q.ln(), self.r.ln()],
        }
    }

    /// Parameters cast to `T` for the generic evaluators.
    pub fn cast<T: Float>(&self) -> (T, T, T) {
        (lit(self.a), lit(self.q), lit(self.r))
    }
}

impl TryFrom<(f64, f64, f64)> for AR1Params {
    type Error = SSMError;

    fn try_from((a, q, r): (f64, f64, f64)) -> SSMResult<Self> {
        AR1Params::new(a, q, r)
    }
}
