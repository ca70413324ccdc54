//! Error surface of the optimization layer.
//!
//! [`OptError`] collects configuration mistakes (tolerances, line search,
//! L-BFGS memory), numerical failures (non-finite costs, gradients, or
//! Hessians), argmin backend errors, and the state-space domain errors that a
//! likelihood evaluation can raise for a trial `θ`. Every public optimizer
//! entry point returns [`OptResult<T>`].
//!
//! Conversions
//! -----------
//! - `From<argmin::core::Error>`: an error that started life as an
//!   [`OptError`] (raised inside the cost or gradient) is recovered as-is;
//!   argmin's own [`ArgminError`] variants map one-to-one; anything else
//!   becomes [`OptError::BackendError`].
//! - `From<SSMError>`: each domain variant has a counterpart here so callers
//!   can match on the cause after an optimizer run.
//! - `From<OptError> for PyErr` behind the `python-bindings` feature.
use crate::state_space::errors::SSMError;
use argmin::core::{ArgminError, Error};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// No analytic gradient; finite differences should be used.
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },

    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// At least one stopping rule must be provided.
    NoTolerancesProvided,

    /// Unknown line searcher name.
    InvalidLineSearch { name: String, reason: &'static str },

    /// L-BFGS memory needs to be at least 1.
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost { value: f64 },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// The solver returned no best parameter vector.
    MissingThetaHat,

    /// L-BFGS stopped because its line search failed.
    SolverExit { reason: String, iterations: u64 },

    // ---- Argmin ----
    InvalidParameter { text: String },
    NotImplemented { text: String },
    NotInitialized { text: String },
    ConditionViolated { text: String },
    CheckPointNotFound { text: String },
    PotentialBug { text: String },
    ImpossibleError { text: String },
    /// Any other backend error, carried as text.
    BackendError { text: String },

    // ---- Finite differences ----
    /// Hessian matrix dimensions do not match parameter dimensions.
    HessianDimMismatch { expected: usize, found: (usize, usize) },

    /// Hessian values need to be finite.
    InvalidHessian { row: usize, col: usize, value: f64 },

    // ---- State-space domain ----
    /// A variance or standard deviation is ≤ 0 or non-finite.
    InvalidScale { value: f64 },

    /// AR coefficient outside the stationary region.
    NonStationaryCoefficient { a: f64 },

    /// Observation sequence is empty.
    EmptySequence,

    /// Latent path length differs from the observation length.
    PathLengthMismatch { expected: usize, actual: usize },

    /// Observation is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    /// θ has the wrong length for the model.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// θ contains a non-finite entry.
    InvalidThetaInput { index: usize, value: f64 },

    /// Simulation requested with zero length.
    InvalidSimulationLength,

    /// Inference requested before `fit`.
    ModelNotFitted,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => write!(f, "Analytic gradient not implemented"),
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => write!(f, "No tolerances provided"),
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => write!(f, "Non-finite cost value: {value}"),

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => write!(f, "Missing estimated parameters (theta hat)"),
            OptError::SolverExit { reason, iterations } => {
                write!(f, "Solver exited after {iterations} iterations: {reason}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => write!(f, "Invalid parameter: {text}"),
            OptError::NotImplemented { text } => write!(f, "Not implemented: {text}"),
            OptError::NotInitialized { text } => write!(f, "Not initialized: {text}"),
            OptError::ConditionViolated { text } => write!(f, "Condition violated: {text}"),
            OptError::CheckPointNotFound { text } => write!(f, "Checkpoint not found: {text}"),
            OptError::PotentialBug { text } => write!(f, "Potential bug: {text}"),
            OptError::ImpossibleError { text } => write!(f, "Impossible error: {text}"),
            OptError::BackendError { text } => write!(f, "Backend error: {text}"),

            // ---- Finite differences ----
            OptError::HessianDimMismatch { expected, found } => write!(
                f,
                "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
            ),
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- State-space domain ----
            OptError::InvalidScale { value } => {
                write!(f, "Invalid variance or standard deviation: {value}, must be finite and > 0")
            }
            OptError::NonStationaryCoefficient { a } => {
                write!(f, "Non-stationary AR coefficient: |{a}| >= 1")
            }
            OptError::EmptySequence => write!(f, "Observation sequence is empty"),
            OptError::PathLengthMismatch { expected, actual } => {
                write!(f, "Latent path length mismatch: expected {expected}, actual {actual}")
            }
            OptError::NonFiniteData { index, value } => {
                write!(f, "Non-finite observation at index {index}: {value}")
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::InvalidSimulationLength => {
                write!(f, "Simulation length must be at least one observation")
            }
            OptError::ModelNotFitted => write!(f, "Model hasn't been fitted yet"),
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                other => OptError::BackendError { text: other.to_string() },
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<SSMError> for OptError {
    fn from(err: SSMError) -> Self {
        match err {
            SSMError::InvalidScale { value } => OptError::InvalidScale { value },
            SSMError::NonStationaryCoefficient { a } => OptError::NonStationaryCoefficient { a },
            SSMError::EmptySequence => OptError::EmptySequence,
            SSMError::LengthMismatch { expected, actual } => {
                OptError::PathLengthMismatch { expected, actual }
            }
            SSMError::NonFiniteData { index, value } => OptError::NonFiniteData { index, value },
            SSMError::InvalidThetaLength { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            SSMError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            SSMError::InvalidSimulationLength => OptError::InvalidSimulationLength,
            SSMError::ModelNotFitted => OptError::ModelNotFitted,
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
