//! Errors for the AR(1) state-space likelihoods (domain checks on scales,
//! stationarity, sequence shapes, and model-level bookkeeping).
//!
//! This module defines [`SSMError`], the single error type returned by the
//! Gaussian density, both likelihood evaluators, the filter diagnostics, the
//! simulator, and the parameter containers. It implements `Display`/`Error`
//! and, behind the `python-bindings` feature, converts to a Python
//! `ValueError`.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Offending values are reported as `f64` regardless of the numeric type the
//!   evaluator ran with; non-representable values are reported as `NaN`.
//! - Every domain violation is surfaced at the point it is detected. There is
//!   no local recovery; the caller (usually an optimizer) decides whether to
//!   reject the trial parameter vector.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for every fallible state-space operation.
pub type SSMResult<T> = Result<T, SSMError>;

/// Unified error type for AR(1) state-space evaluation and modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum SSMError {
    // ---- Density / scale ----
    /// A standard deviation or variance is ≤ 0 or non-finite.
    InvalidScale { value: f64 },

    // ---- Structural parameters ----
    /// `|a| ≥ 1` (or `a` non-finite); the stationary variance is undefined.
    NonStationaryCoefficient { a: f64 },

    // ---- Sequences ----
    /// Observation sequence has length 0.
    EmptySequence,

    /// Latent path length differs from the observation length.
    LengthMismatch { expected: usize, actual: usize },

    /// An observation is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    // ---- Optimizer-space vectors ----
    /// θ has the wrong number of entries for the configured model.
    InvalidThetaLength { expected: usize, actual: usize },

    /// θ contains a non-finite entry.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Simulation ----
    /// Simulation was asked for zero observations.
    InvalidSimulationLength,

    // ---- Model state ----
    /// Model hasn't been fitted yet.
    ModelNotFitted,
}

impl std::error::Error for SSMError {}

impl std::fmt::Display for SSMError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SSMError::InvalidScale { value } => {
                write!(f, "Scale (standard deviation or variance) must be finite and > 0; got: {value}")
            }
            SSMError::NonStationaryCoefficient { a } => {
                write!(f, "AR coefficient must satisfy |a| < 1 for a stationary prior; got: {a}")
            }
            SSMError::EmptySequence => write!(f, "Observation sequence is empty."),
            SSMError::LengthMismatch { expected, actual } => {
                write!(f, "Latent path length mismatch: expected {expected}, got {actual}")
            }
            SSMError::NonFiniteData { index, value } => {
                write!(f, "Observation at index {index} is non-finite: {value}")
            }
            SSMError::InvalidThetaLength { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            SSMError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            SSMError::InvalidSimulationLength => {
                write!(f, "Simulation length must be at least one observation.")
            }
            SSMError::ModelNotFitted => write!(f, "Model hasn't been fitted yet."),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<SSMError> for PyErr {
    fn from(err: SSMError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check that each message carries its payload so optimizer logs are
    // useful without a debugger.
    fn display_embeds_offending_values() {
        let scale = SSMError::InvalidScale { value: -0.5 }.to_string();
        let coeff = SSMError::NonStationaryCoefficient { a: 1.25 }.to_string();
        let len = SSMError::LengthMismatch { expected: 4, actual: 3 }.to_string();

        assert!(scale.contains("-0.5"));
        assert!(coeff.contains("1.25"));
        assert!(len.contains('4') && len.contains('3'));
        assert_eq!(SSMError::EmptySequence.to_string(), "Observation sequence is empty.");
    }
}
