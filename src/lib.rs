//! ar1_ssm: likelihoods and estimators for the linear-Gaussian AR(1)
//! state-space model, with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and, with the `python-bindings`
//! feature, as the PyO3 bridge exposing the negative log-likelihoods and
//! their gradients to a Python optimizer through the `_ar1_ssm` extension
//! module.
//!
//! The model is
//! `x[0] ~ N(0, q / (1 − a²))`, `x[t] = a x[t−1] + N(0, q)`,
//! `y[t] = x[t] + N(0, r)`.
//!
//! Key behaviors
//! -------------
//! - [`state_space`]: the state-augmented and Kalman-marginal NLLs (generic
//!   over `num_traits::Float`), gradients, filtering, simulation, and the
//!   two estimation models.
//! - [`optimization`]: argmin-backed L-BFGS maximization of a
//!   `LogLikelihood` and the shared parameter transforms.
//! - [`inference`]: observed-information standard errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - This file performs only FFI glue, input extraction, and error mapping;
//!   all numerical work lives in the inner modules.
//! - Domain errors (`InvalidScale`, `NonStationaryCoefficient`,
//!   `EmptySequence`, …) surface in Python as `ValueError`.
//!
//! Conventions
//! -----------
//! - Python functions take 1-D float64 arrays, pandas Series, or sequences for
//!   `y` and `x`; scalar parameters are plain floats.
//! - Gradients are returned as `(nll, (d_a, d_q, d_r))`, with an extra NumPy
//!   array of path partials for the state-augmented NLL.
pub mod inference;
pub mod optimization;
pub mod state_space;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{state_space::core as ssm, utils::extract_series};

/// Joint NLL of observations `y` and latent path `x`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (y, a, q, r, x))]
fn state_augmented_nll<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, a: f64, q: f64, r: f64, x: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let y = extract_series(py, y)?;
    let x = extract_series(py, x)?;
    Ok(ssm::state_augmented_nll(&y, a, q, r, &x)?)
}

/// Joint NLL with variances given as logarithms.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (y, a, log_q, log_r, x))]
fn state_augmented_nll_log_var<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, a: f64, log_q: f64, log_r: f64,
    x: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let y = extract_series(py, y)?;
    let x = extract_series(py, x)?;
    Ok(ssm::state_augmented_nll_log_var(&y, a, log_q, log_r, &x)?)
}

/// Kalman marginal NLL of `y` with the latent path integrated out.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (y, a, q, r))]
fn kalman_marginal_nll<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, a: f64, q: f64, r: f64,
) -> PyResult<f64> {
    let y = extract_series(py, y)?;
    Ok(ssm::kalman_marginal_nll(&y, a, q, r)?)
}

/// Kalman marginal NLL with variances given as logarithms.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (y, a, log_q, log_r))]
fn kalman_marginal_nll_log_var<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, a: f64, log_q: f64, log_r: f64,
) -> PyResult<f64> {
    let y = extract_series(py, y)?;
    Ok(ssm::kalman_marginal_nll_log_var(&y, a, log_q, log_r)?)
}

/// Marginal NLL and its partials `(d_a, d_q, d_r)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (y, a, q, r))]
fn kalman_marginal_nll_grad<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, a: f64, q: f64, r: f64,
) -> PyResult<(f64, (f64, f64, f64))> {
    let y = extract_series(py, y)?;
    let (nll, g) = ssm::kalman_marginal_nll_grad(&y, a, q, r)?;
    Ok((nll, (g.a, g.q, g.r)))
}

/// Joint NLL, structural partials `(d_a, d_q, d_r)`, and path partials.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (y, a, q, r, x))]
fn state_augmented_nll_grad<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, a: f64, q: f64, r: f64, x: &Bound<'py, PyAny>,
) -> PyResult<(f64, (f64, f64, f64), Bound<'py, PyArray1<f64>>)> {
    let y = extract_series(py, y)?;
    let x = extract_series(py, x)?;
    let (nll, g) = ssm::state_augmented_nll_grad(&y, a, q, r, &x)?;
    let s = g.structural;
    Ok((nll, (s.a, s.q, s.r), g.path.into_pyarray(py)))
}

/// Define the `_ar1_ssm` Python module.
///
/// Errors
/// ------
/// - `PyErr`
///   If registering a function fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _ar1_ssm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(state_augmented_nll, m)?)?;
    m.add_function(wrap_pyfunction!(state_augmented_nll_log_var, m)?)?;
    m.add_function(wrap_pyfunction!(state_augmented_nll_grad, m)?)?;
    m.add_function(wrap_pyfunction!(kalman_marginal_nll, m)?)?;
    m.add_function(wrap_pyfunction!(kalman_marginal_nll_log_var, m)?)?;
    m.add_function(wrap_pyfunction!(kalman_marginal_nll_grad, m)?)?;
    Ok(())
}
