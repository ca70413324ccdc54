//! KalmanMarginalModel: maximum likelihood on the Kalman marginal NLL.
//!
//! Purpose
//! -------
//! Estimate `(a, q, r)` (or `a` alone with known variances) by maximizing
//! the per-observation log-likelihood
//! `ℓ̄(θ) = −kalman_marginal_nll(y, a, q, r) / n` with the crate's L-BFGS
//! driver. Gradients of `ℓ̄` stay O(1) in θ for any `n`.
//!
//! Key behaviors
//! -------------
//! - θ layout: `[θ_a]` with `VarianceMode::Known`, `[θ_a, log_q, log_r]`
//!   with `VarianceMode::Estimated`; `a = bounded_tanh(θ_a)`.
//! - Analytic gradient from the filter's sensitivity recursion, chained to θ.
//! - After [`KalmanMarginalModel::fit`], `results` (whose `value` is
//!   `ℓ̄(θ̂)`) and `fitted_params` are populated;
//!   [`KalmanMarginalModel::standard_errors`] and
//!   [`KalmanMarginalModel::filter`] read them.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every θ maps to a stationary coefficient, so domain errors during
//!   optimization come only from overflow in `exp(log_q)` / `exp(log_r)`.
//!
//! Testing notes
//! -------------
//! - Value/gradient consistency against finite differences of `value`.
//! - Parameter recovery on simulated data with error shrinking in `n`.
use crate::{
    inference::calc_standard_errors,
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, OptimOutcome, Theta, maximize},
    },
    state_space::{
        core::{
            data::ObservationSeries,
            filter::{FilterOutput, kalman_filter},
            gradients::kalman_marginal_nll_grad,
            kalman::kalman_marginal_nll,
            options::SSMOptions,
            params::AR1Params,
            validation::validate_theta,
        },
        errors::{SSMError, SSMResult},
        models::model_internals::{
            ParamStdErrors, default_structural_theta0, delta_method, fitted_theta, nll_gradient,
            structural_params, structural_theta_grad,
        },
    },
};

/// Marginal-likelihood estimator for the AR(1)-plus-noise model.
#[derive(Debug, Clone, PartialEq)]
pub struct KalmanMarginalModel {
    pub options: SSMOptions,
    pub results: Option<OptimOutcome>,
    pub fitted_params: Option<AR1Params>,
}

impl KalmanMarginalModel {
    pub fn new(options: SSMOptions) -> KalmanMarginalModel {
        KalmanMarginalModel { options, results: None, fitted_params: None }
    }

    /// Length of θ for this model's variance mode.
    pub fn n_params(&self) -> usize {
        self.options.variance_mode.n_structural()
    }

    /// Moment-based starting vector.
    pub fn default_theta0(&self, data: &ObservationSeries) -> Theta {
        default_structural_theta0(data, &self.options.variance_mode)
    }

    /// Maximize the marginal log-likelihood from `theta0`.
    ///
    /// # Errors
    /// Validation of `theta0`, optimizer failures, and domain errors raised
    /// while evaluating the likelihood. On error the model is left unchanged.
    pub fn fit(&mut self, theta0: Theta, data: &ObservationSeries) -> OptResult<()> {
        let outcome = maximize(&*self, theta0, data, &self.options.mle_opts)?;
        let params = structural_params(&outcome.theta_hat, &self.options.variance_mode)?;
        self.fitted_params = Some(params);
        self.results = Some(outcome);
        Ok(())
    }

    /// Observed-information SEs for θ̂ and delta-method SEs for `(a, q, r)`.
    ///
    /// # Errors
    /// - [`OptError::ModelNotFitted`](crate::optimization::errors::OptError::ModelNotFitted)
    ///   before [`fit`](Self::fit).
    /// - Hessian failures from the inference layer.
    pub fn standard_errors(&self, data: &ObservationSeries) -> OptResult<ParamStdErrors> {
        let theta_hat = fitted_theta(self.results.as_ref())?;
        let mode = &self.options.variance_mode;
        let params = structural_params(theta_hat, mode)?;
        let se_theta = calc_standard_errors(&nll_gradient(self, data, data.len()), theta_hat)?;
        Ok(delta_method(se_theta, theta_hat, &params, mode))
    }

    /// Run the diagnostic filter at the fitted parameters.
    ///
    /// # Errors
    /// [`SSMError::ModelNotFitted`] before [`fit`](Self::fit).
    pub fn filter(&self, data: &ObservationSeries) -> SSMResult<FilterOutput> {
        let params = self.fitted_params.as_ref().ok_or(SSMError::ModelNotFitted)?;
        kalman_filter(data.as_slice(), params)
    }
}

impl LogLikelihood for KalmanMarginalModel {
    type Data = ObservationSeries;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let p = AR1Params::from_theta(theta.view(), &self.options.variance_mode)?;
        let nll = kalman_marginal_nll(data.as_slice(), p.a, p.q, p.r)?;
        Ok(-nll / data.len() as f64)
    }

    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), self.n_params())?;
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let mode = &self.options.variance_mode;
        let p = AR1Params::from_theta(theta.view(), mode)?;
        let (_, g) = kalman_marginal_nll_grad(data.as_slice(), p.a, p.q, p.r)?;
        Ok(structural_theta_grad(g, theta[0], &p, mode) / -(data.len() as f64))
    }
}
