//! Integration tests for the AR(1) state-space stack.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: simulate a path, wrap the
//!   observations, evaluate both likelihoods, fit the marginal and joint
//!   estimators, and compute standard errors.
//! - Exercise the public re-exports the way a downstream crate would.
//!
//! Coverage
//! --------
//! - `state_space::core`: simulation, both NLLs and their log-variance
//!   variants, the diagnostic filter, and input validation errors.
//! - `state_space::models`: `KalmanMarginalModel` and `StateAugmentedModel`
//!   fitting and standard errors.
//! - `optimization::loglik_optimizer`: `MLEOptions` with both line searches.
//!
//! Exclusions
//! ----------
//! - Derivative accuracy and numerical edge cases, covered by unit tests.
//! - Python bindings.
use approx::assert_relative_eq;
use ar1_ssm::{
    optimization::{
        errors::OptError,
        loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
    },
    state_space::{
        AR1Params, KalmanMarginalModel, ObservationSeries, SSMError, SSMOptions,
        StateAugmentedModel, VarianceMode, kalman_filter, kalman_marginal_nll,
        kalman_marginal_nll_log_var, simulate_ar1, state_augmented_nll,
        state_augmented_nll_log_var,
    },
};

/// Simulated observations from `a = 0.7, q = 1.0, r = 0.5`.
fn simulated_series(n: usize, seed: u64) -> (AR1Params, ObservationSeries, Vec<f64>) {
    let truth = AR1Params::new(0.7, 1.0, 0.5).expect("valid truth");
    let path = simulate_ar1(&truth, n, seed).expect("valid simulation");
    let states = path.states.to_vec();
    let data = ObservationSeries::new(path.observations).expect("finite observations");
    (truth, data, states)
}

fn mle_options(line_searcher: LineSearcher) -> MLEOptions {
    let tols = Tolerances::new(Some(1e-6), Some(1e-10), Some(500)).expect("valid tolerances");
    MLEOptions::new(tols, line_searcher, false, None).expect("valid options")
}

#[test]
// Purpose
// -------
// The documented scenario evaluates identically through every entry point.
//
// Given
// -----
// - y = [0.5, 0.3, −0.1, 0.4], a = 0.7, q = 1.0, r = 0.5.
//
// Expect
// ------
// - Repeated evaluation is bit-for-bit identical.
// - The log-variance variant and the filter agree with the direct call.
// - The joint NLL at x = y is finite and matches its log-variance variant.
fn reference_scenario_is_consistent() {
    let y = [0.5, 0.3, -0.1, 0.4];
    let (a, q, r) = (0.7_f64, 1.0, 0.5);

    let first = kalman_marginal_nll(&y, a, q, r).expect("valid inputs");
    let second = kalman_marginal_nll(&y, a, q, r).expect("valid inputs");
    assert_eq!(first.to_bits(), second.to_bits());

    let log_var = kalman_marginal_nll_log_var(&y, a, q.ln(), r.ln()).expect("valid inputs");
    assert_relative_eq!(log_var, first, max_relative = 1e-12);

    let params = AR1Params::new(a, q, r).expect("valid params");
    let filtered = kalman_filter(&y, &params).expect("valid inputs");
    assert_relative_eq!(filtered.nll, first, max_relative = 1e-12);

    let joint = state_augmented_nll(&y, a, q, r, &y).expect("valid inputs");
    let joint_log_var =
        state_augmented_nll_log_var(&y, a, q.ln(), r.ln(), &y).expect("valid inputs");
    assert!(joint.is_finite());
    assert_relative_eq!(joint_log_var, joint, max_relative = 1e-12);
}

#[test]
// Purpose
// -------
// Evaluated at the filtered path, the joint NLL is finite and on the same
// scale as the marginal NLL of the documented scenario.
//
// Given
// -----
// - y = [0.5, 0.3, −0.1, 0.4], a = 0.7, q = 1.0, r = 0.5.
// - x = filtered means E[x_t | y_0..y_t] from the diagnostic filter.
//
// Expect
// ------
// - Both NLLs finite and positive.
// - Their ratio lies in [0.1, 10].
// - The filtered path scores better than x = y under the joint NLL.
fn joint_nll_at_filtered_path_matches_marginal_scale() {
    let y = [0.5, 0.3, -0.1, 0.4];
    let params = AR1Params::new(0.7, 1.0, 0.5).expect("valid params");
    let marginal = kalman_marginal_nll(&y, 0.7, 1.0, 0.5).expect("valid inputs");

    let filtered = kalman_filter(&y, &params).expect("valid inputs");
    let x = filtered.filtered_mean.to_vec();
    let joint = state_augmented_nll(&y, 0.7, 1.0, 0.5, &x).expect("valid inputs");

    assert!(marginal.is_finite() && marginal > 0.0, "marginal = {marginal}");
    assert!(joint.is_finite() && joint > 0.0, "joint = {joint}");
    let ratio = joint / marginal;
    assert!((0.1..=10.0).contains(&ratio), "joint {joint} vs marginal {marginal}");

    let at_y = state_augmented_nll(&y, 0.7, 1.0, 0.5, &y).expect("valid inputs");
    assert!(joint < at_y, "filtered path {joint} vs x = y {at_y}");
}

#[test]
// Purpose
// -------
// Domain violations surface as typed errors through the public API.
fn invalid_inputs_are_rejected() {
    let y = [0.5, 0.3];
    assert!(matches!(
        kalman_marginal_nll(&y, 1.0, 1.0, 0.5),
        Err(SSMError::NonStationaryCoefficient { .. })
    ));
    assert!(matches!(
        state_augmented_nll(&y, 0.5, 0.0, 0.5, &y),
        Err(SSMError::InvalidScale { .. })
    ));
    assert!(matches!(kalman_marginal_nll(&y, 0.5, 1.0, -0.5), Err(SSMError::InvalidScale { .. })));
    assert_eq!(kalman_marginal_nll::<f64>(&[], 0.5, 1.0, 0.5), Err(SSMError::EmptySequence));
    assert!(matches!(
        state_augmented_nll(&y, 0.5, 1.0, 0.5, &[0.0]),
        Err(SSMError::LengthMismatch { expected: 2, actual: 1 })
    ));
    assert_eq!(ObservationSeries::try_from(Vec::new()), Err(SSMError::EmptySequence));
}

#[test]
// Purpose
// -------
// The marginal estimator recovers the simulating parameters with either
// line search and reports coherent standard errors.
//
// Given
// -----
// - n = 4000 observations from a = 0.7, q = 1.0, r = 0.5.
//
// Expect
// ------
// - |â − a| < 0.05 and |q̂ − q|, |r̂ − r| < 0.3 for both line searches.
// - The two line searches agree on â to 1e-3.
// - Every standard error is finite and positive.
fn marginal_fit_pipeline() {
    let (truth, data, _) = simulated_series(4000, 314);
    let mut estimates = Vec::new();

    for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
        let opts = SSMOptions::new(VarianceMode::Estimated, mle_options(ls));
        let mut model = KalmanMarginalModel::new(opts);
        let theta0 = model.default_theta0(&data);
        model.fit(theta0, &data).expect("fit should succeed");

        let p = model.fitted_params.expect("fitted");
        assert!((p.a - truth.a).abs() < 0.05, "{ls:?}: a_hat = {}", p.a);
        assert!((p.q - truth.q).abs() < 0.3, "{ls:?}: q_hat = {}", p.q);
        assert!((p.r - truth.r).abs() < 0.3, "{ls:?}: r_hat = {}", p.r);

        let se = model.standard_errors(&data).expect("finite information");
        assert!(se.a.is_finite() && se.a > 0.0);
        assert!(se.q.is_some_and(|s| s.is_finite() && s > 0.0));
        assert!(se.r.is_some_and(|s| s.is_finite() && s > 0.0));
        estimates.push(p.a);
    }
    assert!((estimates[0] - estimates[1]).abs() < 1e-3, "estimates = {estimates:?}");
}

#[test]
// Purpose
// -------
// With known variances the joint estimator's fitted path tracks the latent
// states more closely than the raw observations do.
//
// Given
// -----
// - n = 150 observations, q and r fixed at their true values.
//
// Expect
// ------
// - Mean squared error of the fitted path against the simulated states is
//   below that of y.
fn joint_fit_denoises_observations() {
    let (_, data, states) = simulated_series(150, 2718);
    let tols = Tolerances::new(Some(1e-7), Some(1e-13), Some(3000)).expect("valid tolerances");
    let mle = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None).expect("valid");
    let mode = VarianceMode::known(1.0, 0.5).expect("valid variances");
    let mut model = StateAugmentedModel::new(SSMOptions::new(mode, mle));
    let theta0 = model.default_theta0(&data);
    model.fit(theta0, &data).expect("fit should succeed");

    let path = model.fitted_path.as_ref().expect("fitted path");
    let mse = |est: &[f64]| {
        est.iter().zip(&states).map(|(e, s)| (e - s).powi(2)).sum::<f64>() / states.len() as f64
    };
    let mse_path = mse(path.as_slice().expect("contiguous path"));
    let mse_obs = mse(data.as_slice());
    assert!(mse_path < mse_obs, "path mse {mse_path} vs observation mse {mse_obs}");
}

#[test]
// Purpose
// -------
// Inference before fitting fails cleanly for both estimators.
fn standard_errors_require_fit() {
    let (_, data, _) = simulated_series(50, 1);
    let opts = SSMOptions::default();
    assert_eq!(
        KalmanMarginalModel::new(opts.clone()).standard_errors(&data),
        Err(OptError::ModelNotFitted)
    );
    assert_eq!(StateAugmentedModel::new(opts).standard_errors(&data), Err(OptError::ModelNotFitted));
}
