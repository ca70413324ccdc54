//! numerical_stability: stationarity-preserving transforms and shared tolerances.
//!
//! Purpose
//! -------
//! Keep every optimizer iterate inside the AR(1) model's domain. The
//! likelihood evaluators reject `|a| ≥ 1` and non-positive variances as typed
//! errors; the estimation models avoid ever producing such values by
//! optimizing over an unconstrained vector `θ` and mapping it through the
//! transforms defined here.
//!
//! Key behaviors
//! -------------
//! - `a = (1 − margin)·tanh(θ_a)` with an analytic derivative for the chain
//!   rule and a clamped inverse for building starting values.
//! - Shared constants (`STATIONARITY_MARGIN`, `EIGEN_EPS`) so the models and
//!   the inference layer agree on margins and eigenvalue floors.
//!
//! Conventions
//! -----------
//! - Pure `f64` helpers with no I/O, logging, or global state; safe inside
//!   tight inner loops.
//! - Variance parameters are mapped with `exp` directly (log-variance
//!   parameterization) and need no helper here.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover saturation, round trips, and the
//!   analytic derivative against finite differences.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, STATIONARITY_MARGIN, bounded_tanh, bounded_tanh_deriv, bounded_tanh_inv,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, STATIONARITY_MARGIN, bounded_tanh, bounded_tanh_deriv, bounded_tanh_inv,
    };
}
