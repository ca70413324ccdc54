//! loglik_optimizer: argmin-backed maximization of log-likelihoods.
//!
//! Layout
//! ------
//! - `traits`: [`LogLikelihood`], [`MLEOptions`], [`Tolerances`],
//!   [`LineSearcher`], [`OptimOutcome`].
//! - `adapter`: bridge from a model to argmin's cost/gradient traits.
//! - `solver`: L-BFGS builders and the executor loop.
//! - `finite_diff`: gradient fallback and Hessians for inference.
//! - `validation`: shared finiteness and shape checks.
//! - `types`: numeric aliases and solver type wiring.
pub mod adapter;
pub mod api;
pub mod finite_diff;
pub mod solver;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
