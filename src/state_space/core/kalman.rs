//! Marginal negative log-likelihood via a scalar Kalman filter.
//!
//! The latent path is integrated out analytically. Starting from the
//! stationary prior `x[0] ~ N(0, q / (1 − a²))`, each observation performs
//! one predict/update cycle and contributes the Gaussian NLL of its one-step
//! prediction error `v = y[t] − x_pred` with variance `S = P_pred + r`.
//!
//! [`KalmanStep`] is the single-step primitive shared with the diagnostic
//! filter pass in [`crate::state_space::core::filter`].
use crate::state_space::{
    core::{
        density::log_density_var,
        params::stationary_variance,
        validation::{validate_coefficient, validate_scale, validate_series_len},
    },
    errors::SSMResult,
};
use num_traits::Float;

/// Predictive state `(x_pred, P_pred)` carried between observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Predictive<T> {
    pub mean: T,
    pub var: T,
}

/// Everything one predict/update cycle produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct KalmanStep<T> {
    pub innovation: T,
    pub innovation_var: T,
    pub filtered_mean: T,
    pub filtered_var: T,
    /// `−log N(y; x_pred, S)` for this observation.
    pub nll: T,
    pub next: Predictive<T>,
}

impl<T: Float> Predictive<T> {
    /// Stationary prior for `x[0]`.
    pub fn stationary(a: T, q: T) -> SSMResult<Self> {
        Ok(Predictive { mean: T::zero(), var: stationary_variance(a, q)? })
    }

    /// Update on `y`, then predict one step ahead with `(a, q)`.
    pub fn step(&self, y: T, a: T, q: T, r: T) -> SSMResult<KalmanStep<T>> {
        let s = validate_scale(self.var + r)?;
        let v = y - self.mean;
        let nll = -log_density_var(y, self.mean, s)?;
        let k = self.var / s;
        let filtered_mean = self.mean + k * v;
        let filtered_var = (T::one() - k) * self.var;
        Ok(KalmanStep {
            innovation: v,
            innovation_var: s,
            filtered_mean,
            filtered_var,
            nll,
            next: Predictive { mean: a * filtered_mean, var: a * a * filtered_var + q },
        })
    }
}

/// Marginal NLL of `y` given `(a, q, r)`, with the latent path integrated out.
///
/// # Errors
/// - [`SSMError::EmptySequence`] if `y` is empty.
/// - [`SSMError::InvalidScale`] if `q` or `r` is ≤ 0 or non-finite, or if an
///   innovation variance is not positive.
/// - [`SSMError::NonStationaryCoefficient`] if `|a| ≥ 1` (raised when the
///   prior is initialized).
///
/// [`SSMError::EmptySequence`]: crate::state_space::errors::SSMError::EmptySequence
/// [`SSMError::InvalidScale`]: crate::state_space::errors::SSMError::InvalidScale
/// [`SSMError::NonStationaryCoefficient`]: crate::state_space::errors::SSMError::NonStationaryCoefficient
pub fn kalman_marginal_nll<T: Float>(y: &[T], a: T, q: T, r: T) -> SSMResult<T> {
    validate_series_len(y)?;
    let r = validate_scale(r)?;
    let a = validate_coefficient(a)?;
    let mut state = Predictive::stationary(a, q)?;

    let mut nll = T::zero();
    for &y_t in y {
        let step = state.step(y_t, a, q, r)?;
        nll = nll + step.nll;
        state = step.next;
    }
    Ok(nll)
}

/// [`kalman_marginal_nll`] with `q = exp(log_q)` and `r = exp(log_r)`.
pub fn kalman_marginal_nll_log_var<T: Float>(y: &[T], a: T, log_q: T, log_r: T) -> SSMResult<T> {
    kalman_marginal_nll(y, a, log_q.exp(), log_r.exp())
}
