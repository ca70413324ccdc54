//! utils: Python input helpers for the `_ar1_ssm` bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyUntypedArrayMethods,
};

#[cfg(feature = "python-bindings")]
const SERIES_TYPE_ERROR: &str =
    "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64";

/// Borrow a contiguous float64 array from a NumPy array, a pandas Series
/// (via `to_numpy`), or any Python sequence of floats.
///
/// Errors
/// ------
/// - `TypeError` if `raw_data` is none of the accepted inputs.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr.is_contiguous() {
            return Ok(arr);
        }
    }
    if let Ok(obj) = raw_data.call_method1("to_numpy", (false,)) {
        if let Ok(series) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series.is_contiguous() {
                return Ok(series);
            }
        }
    }
    let vec: Vec<f64> = raw_data.extract().map_err(|_| PyTypeError::new_err(SERIES_TYPE_ERROR))?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Owned copy of a 1-D float64 input; see [`extract_f64_array`].
///
/// Errors
/// ------
/// - `TypeError` for unsupported inputs.
#[cfg(feature = "python-bindings")]
pub fn extract_series<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    arr.as_slice().map(<[f64]>::to_vec).map_err(|_| PyTypeError::new_err(SERIES_TYPE_ERROR))
}
