//! State-augmented (joint) negative log-likelihood.
//!
//! The latent path `x` is treated as a vector of free parameters and the
//! NLL of `(x, y)` is the sum of three blocks:
//!
//! ```text
//! transitions  Σ_{t≥1} −log N(x[t]; a·x[t−1], q)
//! observations Σ_{t≥0} −log N(y[t]; x[t],      r)
//! prior              −log N(x[0]; 0, q / (1 − a²))
//! ```
//!
//! Integrating `exp(−nll)` over `x` yields the marginal likelihood that
//! [`crate::state_space::core::kalman`] computes in closed form.
use crate::state_space::{
    core::{
        density::log_density,
        params::stationary_variance,
        validation::{validate_coefficient, validate_path_len, validate_scale, validate_series_len},
    },
    errors::SSMResult,
};
use num_traits::Float;

/// Joint NLL of observations `y` and latent path `x` given `(a, q, r)`.
///
/// # Errors
/// - [`SSMError::EmptySequence`] if `y` is empty.
/// - [`SSMError::LengthMismatch`] if `x.len() != y.len()`.
/// - [`SSMError::InvalidScale`] if `q` or `r` is ≤ 0 or non-finite.
/// - [`SSMError::NonStationaryCoefficient`] if `|a| ≥ 1`.
///
/// [`SSMError::EmptySequence`]: crate::state_space::errors::SSMError::EmptySequence
/// [`SSMError::LengthMismatch`]: crate::state_space::errors::SSMError::LengthMismatch
/// [`SSMError::InvalidScale`]: crate::state_space::errors::SSMError::InvalidScale
/// [`SSMError::NonStationaryCoefficient`]: crate::state_space::errors::SSMError::NonStationaryCoefficient
pub fn state_augmented_nll<T: Float>(y: &[T], a: T, q: T, r: T, x: &[T]) -> SSMResult<T> {
    let n = validate_series_len(y)?;
    validate_path_len(n, x.len())?;
    let sd_q = validate_scale(q)?.sqrt();
    let sd_r = validate_scale(r)?.sqrt();
    let a = validate_coefficient(a)?;

    let mut nll = T::zero();
    for w in x.windows(2) {
        nll = nll - log_density(w[1], a * w[0], sd_q)?;
    }
    for (&y_t, &x_t) in y.iter().zip(x) {
        nll = nll - log_density(y_t, x_t, sd_r)?;
    }
    let prior_sd = stationary_variance(a, q)?.sqrt();
    nll = nll - log_density(x[0], T::zero(), prior_sd)?;
    Ok(nll)
}

/// [`state_augmented_nll`] with `q = exp(log_q)` and `r = exp(log_r)`.
pub fn state_augmented_nll_log_var<T: Float>(
    y: &[T], a: T, log_q: T, log_r: T, x: &[T],
) -> SSMResult<T> {
    state_augmented_nll(y, a, log_q.exp(), log_r.exp(), x)
}
