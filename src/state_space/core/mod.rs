//! core: AR(1) state-space densities, likelihoods, and parameter types.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks for the linear-Gaussian AR(1)
//! state-space model
//!
//! ```text
//! x[t] = a·x[t−1] + w[t],  w[t] ~ N(0, q)
//! y[t] = x[t] + v[t],      v[t] ~ N(0, r)
//! x[0] ~ N(0, q / (1 − a²))
//! ```
//!
//! The estimation models in `state_space::models` and the Python bindings
//! build on these primitives.
//!
//! Key behaviors
//! -------------
//! - [`log_density`]: scalar Gaussian log-density, always in log space.
//! - [`state_augmented_nll`]: joint NLL of `(x, y)` with the path as free
//!   parameters.
//! - [`kalman_marginal_nll`]: marginal NLL of `y` with the path integrated
//!   out by a scalar Kalman filter.
//! - Log-variance variants of both evaluators, analytic gradients
//!   ([`gradients`]), a diagnostic filter pass ([`kalman_filter`]), and
//!   seeded simulation ([`simulate_ar1`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - `|a| < 1`, `q > 0`, `r > 0` at every evaluation; violations are typed
//!   [`SSMError`](crate::state_space::errors::SSMError)s, never NaN or ±inf.
//! - The prior variance of `x[0]` is always `q / (1 − a²)`.
//!
//! Conventions
//! -----------
//! - Evaluators are pure functions generic over `T: num_traits::Float`; the
//!   observation sequence and latent path are passed as contiguous slices.
//! - Nothing here logs or performs I/O.
//!
//! Testing notes
//! -------------
//! - The marginal evaluator is checked against a dense `N(0, Σ)` evaluation
//!   and against quadrature of the joint density; gradients against finite
//!   differences.

pub mod data;
pub mod density;
pub mod filter;
pub mod gradients;
pub mod joint;
pub mod kalman;
pub mod options;
pub mod params;
pub mod simulate;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::ObservationSeries;
pub use self::density::{log_density, log_density_var};
pub use self::filter::{FilterOutput, kalman_filter};
pub use self::gradients::{
    JointGradient, StructuralGrad, kalman_marginal_nll_grad, state_augmented_nll_grad,
};
pub use self::joint::{state_augmented_nll, state_augmented_nll_log_var};
pub use self::kalman::{kalman_marginal_nll, kalman_marginal_nll_log_var};
pub use self::options::SSMOptions;
pub use self::params::{AR1Params, VarianceMode, stationary_variance};
pub use self::simulate::{SimulatedPath, simulate_ar1};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::data::ObservationSeries;
    pub use super::joint::state_augmented_nll;
    pub use super::kalman::kalman_marginal_nll;
    pub use super::options::SSMOptions;
    pub use super::params::{AR1Params, VarianceMode};
}
