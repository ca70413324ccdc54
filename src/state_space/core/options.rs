//! Estimation-time configuration for AR(1) state-space models.
//!
//! Purpose
//! -------
//! Bundle the two knobs every estimation model needs, the variance mode and
//! the optimizer options, so model constructors take one validated value
//! instead of loose arguments.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both components are validated by their own constructors
//!   ([`VarianceMode::known`], [`MLEOptions::new`]); [`SSMOptions`] adds no
//!   cross-field checks.
use crate::{
    optimization::loglik_optimizer::MLEOptions, state_space::core::params::VarianceMode,
};

/// Configuration for fitting an AR(1) state-space model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SSMOptions {
    /// Whether `(q, r)` are fixed data or estimated.
    pub variance_mode: VarianceMode,
    /// L-BFGS / line-search settings.
    pub mle_opts: MLEOptions,
}

impl SSMOptions {
    /// Construct from already-validated components.
    pub fn new(variance_mode: VarianceMode, mle_opts: MLEOptions) -> Self {
        SSMOptions { variance_mode, mle_opts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Defaults estimate the variances and use default optimizer settings;
    // `new` stores its inputs unchanged.
    fn default_and_new_preserve_components() {
        let defaults = SSMOptions::default();
        assert_eq!(defaults.variance_mode, VarianceMode::Estimated);
        assert_eq!(defaults.mle_opts, MLEOptions::default());

        let known = VarianceMode::known(1.0, 0.5).expect("valid");
        let opts = SSMOptions::new(known, MLEOptions::default());
        assert_eq!(opts.variance_mode, known);
    }
}
