//! Diagnostic forward filter pass.
//!
//! Runs the same predict/update cycle as
//! [`kalman_marginal_nll`](crate::state_space::core::kalman::kalman_marginal_nll)
//! but keeps the per-step quantities instead of discarding them: one-step
//! predictions, filtered moments, and innovations. Useful for residual
//! checks after a fit. This is a filter only; no smoothing pass is run.
use crate::state_space::{
    core::{
        kalman::Predictive,
        params::AR1Params,
        validation::{validate_coefficient, validate_scale, validate_series_len},
    },
    errors::SSMResult,
};
use ndarray::Array1;

/// Per-step output of [`kalman_filter`]. Every array has length `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutput {
    /// `E[x_t | y_0..y_{t−1}]`.
    pub predicted_mean: Array1<f64>,
    /// `Var[x_t | y_0..y_{t−1}]`.
    pub predicted_var: Array1<f64>,
    /// `E[x_t | y_0..y_t]`.
    pub filtered_mean: Array1<f64>,
    /// `Var[x_t | y_0..y_t]`.
    pub filtered_var: Array1<f64>,
    /// One-step prediction errors `y_t − predicted_mean_t`.
    pub innovation: Array1<f64>,
    /// Innovation variances `predicted_var_t + r`.
    pub innovation_var: Array1<f64>,
    /// Marginal NLL; equal to `kalman_marginal_nll` on the same inputs.
    pub nll: f64,
}

impl FilterOutput {
    /// Innovations divided by their standard deviations. Under the model
    /// these are i.i.d. standard normal.
    pub fn standardized_innovations(&self) -> Array1<f64> {
        &self.innovation / &self.innovation_var.mapv(f64::sqrt)
    }
}

/// Run the Kalman filter over `y` and record every intermediate quantity.
///
/// # Errors
/// [`SSMError::EmptySequence`](crate::state_space::errors::SSMError::EmptySequence)
/// for an empty `y`; scale and coefficient errors as in the marginal
/// evaluator, applied to the fields of `params`.
pub fn kalman_filter(y: &[f64], params: &AR1Params) -> SSMResult<FilterOutput> {
    let n = validate_series_len(y)?;
    let AR1Params { a, q, r } = *params;
    let r = validate_scale(r)?;
    let a = validate_coefficient(a)?;
    let mut out = FilterOutput {
        predicted_mean: Array1::zeros(n),
        predicted_var: Array1::zeros(n),
        filtered_mean: Array1::zeros(n),
        filtered_var: Array1::zeros(n),
        innovation: Array1::zeros(n),
        innovation_var: Array1::zeros(n),
        nll: 0.0,
    };

    let mut state = Predictive::stationary(a, q)?;
    for (t, &y_t) in y.iter().enumerate() {
        let step = state.step(y_t, a, q, r)?;
        out.predicted_mean[t] = state.mean;
        out.predicted_var[t] = state.var;
        out.filtered_mean[t] = step.filtered_mean;
        out.filtered_var[t] = step.filtered_var;
        out.innovation[t] = step.innovation;
        out.innovation_var[t] = step.innovation_var;
        out.nll += step.nll;
        state = step.next;
    }
    Ok(out)
}
