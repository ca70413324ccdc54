//! models: estimation front-ends for the AR(1) state-space likelihoods.
//!
//! - [`KalmanMarginalModel`]: marginal MLE of `(a, q, r)`.
//! - [`StateAugmentedModel`]: joint maximization over parameters and path.
//! - [`model_internals`]: shared θ transforms, starting values, and
//!   delta-method standard errors ([`ParamStdErrors`]).
pub mod joint;
pub mod marginal;
pub mod model_internals;

pub use self::joint::StateAugmentedModel;
pub use self::marginal::KalmanMarginalModel;
pub use self::model_internals::ParamStdErrors;

pub mod prelude {
    pub use super::joint::StateAugmentedModel;
    pub use super::marginal::KalmanMarginalModel;
    pub use super::model_internals::ParamStdErrors;
}
