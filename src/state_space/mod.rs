//! state_space: AR(1) linear-Gaussian state-space likelihoods and models.
//!
//! Purpose
//! -------
//! Provide the negative log-likelihood of the AR(1)-plus-noise model in two
//! equivalent forms (state-augmented and Kalman-marginal), together with the
//! estimation models that drive them through the crate's L-BFGS optimizer.
//!
//! Key behaviors
//! -------------
//! - [`core`]: densities, both NLL evaluators and their gradients, parameter
//!   containers, the filter diagnostic pass, and simulation.
//! - [`models`]: [`KalmanMarginalModel`] and [`StateAugmentedModel`],
//!   implementations of `LogLikelihood` with `fit` and `standard_errors`.
//! - [`errors`]: [`SSMError`] and the [`SSMResult`] alias shared by the stack.
//!
//! Conventions
//! -----------
//! - Optimizer space: `θ = [θ_a]` (known variances) or
//!   `θ = [θ_a, log_q, log_r]` (estimated variances), followed by the `n`
//!   latent-path values for the state-augmented model.
//! - The stack performs no I/O. Optimizer logging is opt-in through
//!   `MLEOptions::verbose` and the `obs_slog` feature.
//!
//! Downstream usage
//! ----------------
//! 1. Wrap observations in [`ObservationSeries`].
//! 2. Pick a [`VarianceMode`] and build [`SSMOptions`].
//! 3. Construct a model, call `fit(model.default_theta0(&data), &data)`.
//! 4. Read `fitted_params`, then `standard_errors(&data)` if needed.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    AR1Params, FilterOutput, ObservationSeries, SSMOptions, SimulatedPath, VarianceMode,
    kalman_filter, kalman_marginal_nll, kalman_marginal_nll_log_var, log_density,
    simulate_ar1, state_augmented_nll, state_augmented_nll_log_var,
};
pub use self::errors::{SSMError, SSMResult};
pub use self::models::{KalmanMarginalModel, ParamStdErrors, StateAugmentedModel};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        AR1Params, KalmanMarginalModel, ObservationSeries, SSMError, SSMOptions, SSMResult,
        StateAugmentedModel, VarianceMode, kalman_marginal_nll, state_augmented_nll,
    };
}
