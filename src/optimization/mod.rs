//! optimization: MLE stack, parameter transforms, and unified error surface.
//!
//! Purpose
//! -------
//! Fit the AR(1) state-space models by maximizing their log-likelihood
//! `ℓ(θ) = −NLL(θ)` over an unconstrained parameter vector, without exposing
//! argmin's generics to the model code.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: the [`LogLikelihood`] trait, validated options, and
//!   [`maximize`] (L-BFGS with More–Thuente or Hager–Zhang line search).
//! - `numerical_stability`: the bounded-tanh map for the autoregressive
//!   coefficient and the shared numerical constants.
//! - `errors`: [`OptError`] / [`OptResult`], including the state-space
//!   domain errors a trial `θ` can trigger.
//!
//! Conventions
//! -----------
//! - Solvers minimize `c(θ) = −ℓ(θ)`; everything user-facing is reported in
//!   terms of `ℓ`.
//! - Parameters, gradients, and Hessians are `ndarray` containers of `f64`.
//!
//! [`LogLikelihood`]: loglik_optimizer::LogLikelihood
//! [`maximize`]: loglik_optimizer::maximize
//! [`OptError`]: errors::OptError
//! [`OptResult`]: errors::OptResult
pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
