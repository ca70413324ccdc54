//! Shared pieces of the AR(1) estimation models.
//!
//! - θ ↔ model-space chain rule for the structural prefix.
//! - Moment-based starting values.
//! - Delta-method standard errors and the [`ParamStdErrors`] report.
//! - The NLL-gradient closure handed to the inference layer.
use crate::{
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, OptimOutcome, Theta},
        numerical_stability::{bounded_tanh_deriv, bounded_tanh_inv},
    },
    state_space::{
        core::{
            data::ObservationSeries,
            gradients::StructuralGrad,
            params::{AR1Params, VarianceMode},
        },
        errors::SSMError,
    },
};
use ndarray::{Array1, s};

/// Starting coefficients are kept inside `[-A0_CAP, A0_CAP]`.
const A0_CAP: f64 = 0.9;

/// Floor for the sample variance used in starting values.
const VAR_FLOOR: f64 = 1e-8;

/// Standard errors of a fitted model.
///
/// `theta` holds the observed-information SEs for every entry of `θ̂`
/// (including the latent path for the state-augmented model). `a`, `q`,
/// `r` are delta-method SEs in model space; `q` and `r` are `None` when the
/// variances were fixed by [`VarianceMode::Known`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParamStdErrors {
    pub theta: Array1<f64>,
    pub a: f64,
    pub q: Option<f64>,
    pub r: Option<f64>,
}

/// Map a structural gradient of the NLL w.r.t. `(a, q, r)` to the θ prefix
/// for `mode`.
///
/// `∂/∂θ_a = ∂/∂a · a'(θ_a)`; log-variances pick up a factor of the
/// variance itself.
pub fn structural_theta_grad(
    g: StructuralGrad<f64>, theta_a: f64, params: &AR1Params, mode: &VarianceMode,
) -> Array1<f64> {
    let d_theta_a = g.a * bounded_tanh_deriv(theta_a);
    match mode {
        VarianceMode::Known { .. } => Array1::from(vec![d_theta_a]),
        VarianceMode::Estimated => {
            let g = g.to_log_variance(params.q, params.r);
            Array1::from(vec![d_theta_a, g.q, g.r])
        }
    }
}

/// Moment-based structural start.
///
/// `a₀` is the lag-1 autocorrelation clipped to `±0.9`. In
/// [`VarianceMode::Estimated`] the sample variance is split evenly between
/// the state's stationary variance and the observation noise, giving
/// `q₀ = ½ s² (1 − a₀²)` and `r₀ = ½ s²`.
pub fn default_structural_theta0(data: &ObservationSeries, mode: &VarianceMode) -> Array1<f64> {
    let a0 = data.lag1_autocorrelation().clamp(-A0_CAP, A0_CAP);
    let theta_a = bounded_tanh_inv(a0);
    match mode {
        VarianceMode::Known { .. } => Array1::from(vec![theta_a]),
        VarianceMode::Estimated => {
            let (_, var) = data.moments();
            let half = 0.5 * var.max(VAR_FLOOR);
            Array1::from(vec![theta_a, (half * (1.0 - a0 * a0)).ln(), half.ln()])
        }
    }
}

/// Delta-method standard errors for `(a, q, r)` from θ-space SEs.
///
/// The structural transforms act elementwise, so each model-space SE is the
/// θ-space SE scaled by the absolute derivative of its transform.
pub fn delta_method(
    se_theta: Array1<f64>, theta_hat: &Theta, params: &AR1Params, mode: &VarianceMode,
) -> ParamStdErrors {
    let a = se_theta[0] * bounded_tanh_deriv(theta_hat[0]).abs();
    let (q, r) = match mode {
        VarianceMode::Known { .. } => (None, None),
        VarianceMode::Estimated => (Some(se_theta[1] * params.q), Some(se_theta[2] * params.r)),
    };
    ParamStdErrors { theta: se_theta, a, q, r }
}

/// Fitted θ̂, or [`OptError::ModelNotFitted`].
pub fn fitted_theta(results: Option<&OptimOutcome>) -> OptResult<&Theta> {
    results.map(|o| &o.theta_hat).ok_or_else(|| SSMError::ModelNotFitted.into())
}

/// Model-space parameters from the structural prefix of `theta`.
pub fn structural_params(theta: &Theta, mode: &VarianceMode) -> OptResult<AR1Params> {
    Ok(AR1Params::from_theta(theta.slice(s![..mode.n_structural()]), mode)?)
}

/// Gradient of the total NLL, `−n ∇ℓ̄(θ)`, for a model whose log-likelihood
/// is the per-observation average `ℓ̄`. Evaluation failures become `NaN`
/// entries so the Hessian validation reports them.
pub fn nll_gradient<'a, M: LogLikelihood>(
    model: &'a M, data: &'a M::Data, n_obs: usize,
) -> impl Fn(&Theta) -> Grad + 'a {
    let scale = -(n_obs as f64);
    move |theta: &Theta| match model.grad(theta, data) {
        Ok(g) => g * scale,
        Err(_) => Array1::from_elem(theta.len(), f64::NAN),
    }
}
