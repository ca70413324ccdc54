//! inference: post-estimation uncertainty for fitted models.
//!
//! Classical (observed-information) covariance and standard errors in the
//! unconstrained parameter space `θ`. Mapping to natural parameters
//! (`a`, `q`, `r`) by the delta method lives with the models, which know
//! their own transforms.
pub mod hessian;

pub use self::hessian::{calc_standard_errors, covariance_matrix, observed_information};
