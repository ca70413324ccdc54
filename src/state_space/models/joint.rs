//! StateAugmentedModel: joint maximization over parameters and latent path.
//!
//! Purpose
//! -------
//! Treat the latent AR(1) path `x` as free parameters next to the structural
//! prefix and maximize `ℓ̄(θ) = −state_augmented_nll(y, a, q, r, x) / n`.
//! This is the joint-mode estimator used when the latent path itself is of
//! interest, or to compare against the marginal fit.
//!
//! Key behaviors
//! -------------
//! - θ layout: the structural prefix of the variance mode followed by the
//!   `n` path values, so `θ.len() = n_structural + n`.
//! - Analytic gradient for the prefix (chained through the transforms) and
//!   for every path entry.
//! - [`StateAugmentedModel::fit`] stores the outcome, the fitted
//!   [`AR1Params`], and the fitted path.
//!
//! Invariants & assumptions
//! ------------------------
//! - With estimated variances the joint likelihood is unbounded as `x → y`
//!   and `r → 0`; the estimator is meant for known variances, or for
//!   evaluating `ℓ̄` and its gradient in an external optimizer.
//!
//! Testing notes
//! -------------
//! - Gradient checks against finite differences in both variance modes.
//! - A known-variance fit reaches a stationary point with finite SEs.
use crate::{
    inference::calc_standard_errors,
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, OptimOutcome, Theta, maximize},
    },
    state_space::{
        core::{
            data::ObservationSeries,
            gradients::state_augmented_nll_grad,
            joint::state_augmented_nll,
            options::SSMOptions,
            params::AR1Params,
            validation::validate_theta,
        },
        models::model_internals::{
            ParamStdErrors, default_structural_theta0, delta_method, fitted_theta, nll_gradient,
            structural_params, structural_theta_grad,
        },
    },
};
use ndarray::{Array1, ArrayView1, s};

/// State-augmented (joint) estimator for the AR(1)-plus-noise model.
#[derive(Debug, Clone, PartialEq)]
pub struct StateAugmentedModel {
    pub options: SSMOptions,
    pub results: Option<OptimOutcome>,
    pub fitted_params: Option<AR1Params>,
    pub fitted_path: Option<Array1<f64>>,
}

impl StateAugmentedModel {
    pub fn new(options: SSMOptions) -> StateAugmentedModel {
        StateAugmentedModel { options, results: None, fitted_params: None, fitted_path: None }
    }

    /// Length of θ for a series of `data.len()` observations.
    pub fn n_params(&self, data: &ObservationSeries) -> usize {
        self.options.variance_mode.n_structural() + data.len()
    }

    /// Moment-based structural start followed by `x₀ = y`.
    pub fn default_theta0(&self, data: &ObservationSeries) -> Theta {
        let prefix = default_structural_theta0(data, &self.options.variance_mode);
        let k = prefix.len();
        let mut theta0 = Array1::zeros(k + data.len());
        theta0.slice_mut(s![..k]).assign(&prefix);
        theta0.slice_mut(s![k..]).assign(&data.view());
        theta0
    }

    /// Maximize the joint log-likelihood from `theta0`.
    ///
    /// # Errors
    /// Validation of `theta0`, optimizer failures, and domain errors raised
    /// while evaluating the likelihood. On error the model is left unchanged.
    pub fn fit(&mut self, theta0: Theta, data: &ObservationSeries) -> OptResult<()> {
        let outcome = maximize(&*self, theta0, data, &self.options.mle_opts)?;
        let k = self.options.variance_mode.n_structural();
        let params = structural_params(&outcome.theta_hat, &self.options.variance_mode)?;
        self.fitted_path = Some(outcome.theta_hat.slice(s![k..]).to_owned());
        self.fitted_params = Some(params);
        self.results = Some(outcome);
        Ok(())
    }

    /// Observed-information SEs for every entry of θ̂ (path included) and
    /// delta-method SEs for `(a, q, r)`.
    ///
    /// # Errors
    /// - `OptError::ModelNotFitted` before [`fit`](Self::fit).
    /// - Hessian failures from the inference layer.
    pub fn standard_errors(&self, data: &ObservationSeries) -> OptResult<ParamStdErrors> {
        let theta_hat = fitted_theta(self.results.as_ref())?;
        let mode = &self.options.variance_mode;
        let params = structural_params(theta_hat, mode)?;
        let se_theta = calc_standard_errors(&nll_gradient(self, data, data.len()), theta_hat)?;
        Ok(delta_method(se_theta, theta_hat, &params, mode))
    }

    fn split(&self, theta: &Theta, data: &ObservationSeries) -> OptResult<(AR1Params, Vec<f64>)> {
        validate_theta(theta.view(), self.n_params(data))?;
        let params = structural_params(theta, &self.options.variance_mode)?;
        let k = self.options.variance_mode.n_structural();
        Ok((params, theta.slice(s![k..]).to_vec()))
    }
}

impl LogLikelihood for StateAugmentedModel {
    type Data = ObservationSeries;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let (p, x) = self.split(theta, data)?;
        let nll = state_augmented_nll(data.as_slice(), p.a, p.q, p.r, &x)?;
        Ok(-nll / data.len() as f64)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), self.n_params(data))?;
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let mode = &self.options.variance_mode;
        let (p, x) = self.split(theta, data)?;
        let (_, g) = state_augmented_nll_grad(data.as_slice(), p.a, p.q, p.r, &x)?;
        let k = mode.n_structural();
        let mut full = Array1::zeros(theta.len());
        full.slice_mut(s![..k]).assign(&structural_theta_grad(g.structural, theta[0], &p, mode));
        full.slice_mut(s![k..]).assign(&ArrayView1::from(&g.path));
        Ok(full / -(data.len() as f64))
    }
}
