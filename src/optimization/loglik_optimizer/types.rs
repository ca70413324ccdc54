//! loglik_optimizer::types: numeric aliases and solver wiring.
//!
//! Every optimizer module imports these aliases instead of spelling out
//! `ndarray` or argmin generics, so the state-space models only ever see
//! `Theta`, `Grad`, and `Cost`.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector `θ`.
///
/// For the AR(1) models this is `[θ_a]` or `[θ_a, log_q, log_r]`, optionally
/// followed by the latent path.
pub type Theta = Array1<f64>;

/// Gradient vector with the same layout as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense `dim × dim` Hessian.
pub type Hessian = Array2<f64>;

/// Scalar cost `c(θ) = −ℓ(θ)` handed to argmin.
pub type Cost = f64;

/// argmin function-evaluation counters (`"cost_count"`, `"gradient_count"`, …).
pub type FnEvalMap = HashMap<String, u64>;

/// Default L-BFGS history size.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Upper end of the Hager–Zhang initial bracket, in units of the search
/// direction. Much larger brackets underflow `exp(log_q)` on the first trial.
pub const HZ_MAX_STEP: f64 = 10.0;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS with the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS with the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
