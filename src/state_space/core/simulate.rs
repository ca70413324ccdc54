//! Seeded simulation of AR(1) state-space data.
//!
//! Draws `x[0]` from the stationary prior, propagates `x[t] = a·x[t−1] + w[t]`,
//! and adds observation noise `v[t]`. A fixed seed fully determines the
//! output, so parameter-recovery studies are reproducible.
use crate::state_space::{
    core::params::AR1Params,
    errors::{SSMError, SSMResult},
};
use ndarray::Array1;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

/// Simulated latent states and observations, both of length `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPath {
    pub states: Array1<f64>,
    pub observations: Array1<f64>,
}

/// Simulate `n` steps of the model defined by `params`.
///
/// # Errors
/// - [`SSMError::InvalidSimulationLength`] if `n == 0`.
/// - [`SSMError::InvalidScale`] if a noise distribution cannot be built.
pub fn simulate_ar1(params: &AR1Params, n: usize, seed: u64) -> SSMResult<SimulatedPath> {
    if n == 0 {
        return Err(SSMError::InvalidSimulationLength);
    }
    let normal = |var: f64| {
        Normal::new(0.0, var.sqrt()).map_err(|_| SSMError::InvalidScale { value: var })
    };
    let prior = normal(params.stationary_variance())?;
    let state_noise = normal(params.q)?;
    let obs_noise = normal(params.r)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut states = Array1::zeros(n);
    let mut observations = Array1::zeros(n);
    let mut x = prior.sample(&mut rng);
    for t in 0..n {
        if t > 0 {
            x = params.a * x + state_noise.sample(&mut rng);
        }
        states[t] = x;
        observations[t] = x + obs_noise.sample(&mut rng);
    }
    Ok(SimulatedPath { states, observations })
}
