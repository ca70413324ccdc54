//! Shared domain checks for the AR(1) state-space core.
//!
//! Purpose
//! -------
//! Centralize the small set of checks every evaluator needs (positive
//! scales, a stationary AR coefficient, sequence shapes, optimizer-space
//! vectors) so the density, the joint likelihood, and the Kalman recursion
//! report the same [`SSMError`] variant for the same violation.
//!
//! Conventions
//! -----------
//! - Scalar checks are generic over `T: Float` and return the validated value
//!   so they can be used inline (`let sd = validate_scale(sd)?;`).
//! - Comparisons are written so that `NaN` fails them (`!(x > 0)` rather than
//!   `x <= 0`), which routes NaN inputs to the same typed error.
//! - Offending values are converted to `f64` for reporting via [`to_report`].
use crate::state_space::errors::{SSMError, SSMResult};
use ndarray::ArrayView1;
use num_traits::Float;

/// Validate a standard deviation or variance: finite and strictly positive.
///
/// # Errors
/// [`SSMError::InvalidScale`] if `value` is ≤ 0, NaN, or infinite.
#[inline]
pub fn validate_scale<T: Float>(value: T) -> SSMResult<T> {
    if !(value > T::zero()) || !value.is_finite() {
        return Err(SSMError::InvalidScale { value: to_report(value) });
    }
    Ok(value)
}

/// Validate the AR coefficient against the stationarity region `|a| < 1`.
///
/// # Errors
/// [`SSMError::NonStationaryCoefficient`] if `|a| ≥ 1` or `a` is not finite.
#[inline]
pub fn validate_coefficient<T: Float>(a: T) -> SSMResult<T> {
    if !(a.abs() < T::one()) {
        return Err(SSMError::NonStationaryCoefficient { a: to_report(a) });
    }
    Ok(a)
}

/// Validate that an observation sequence is non-empty and return its length.
///
/// # Errors
/// [`SSMError::EmptySequence`] if `y` is empty.
#[inline]
pub fn validate_series_len<T>(y: &[T]) -> SSMResult<usize> {
    if y.is_empty() {
        return Err(SSMError::EmptySequence);
    }
    Ok(y.len())
}

/// Validate that a latent path has exactly one entry per observation.
///
/// # Errors
/// [`SSMError::LengthMismatch`] if `actual != expected`.
#[inline]
pub fn validate_path_len(expected: usize, actual: usize) -> SSMResult<()> {
    if expected != actual {
        return Err(SSMError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Validate that every observation is finite; reports the first offender.
///
/// # Errors
/// [`SSMError::NonFiniteData`] with the index and value of the first NaN/±inf.
pub fn validate_finite_series(y: ArrayView1<f64>) -> SSMResult<()> {
    match y.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(SSMError::NonFiniteData { index, value }),
        None => Ok(()),
    }
}

/// Validate an optimizer-space vector: expected length and finite entries.
///
/// # Errors
/// - [`SSMError::InvalidThetaLength`] if `theta.len() != expected`.
/// - [`SSMError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, expected: usize) -> SSMResult<()> {
    if theta.len() != expected {
        return Err(SSMError::InvalidThetaLength { expected, actual: theta.len() });
    }
    match theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(SSMError::InvalidThetaInput { index, value }),
        None => Ok(()),
    }
}

/// Convert a generic float to `f64` for error payloads (`NaN` if impossible).
#[inline]
pub fn to_report<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Cast an `f64` literal into `T` (`NaN` if `T` cannot represent it).
#[inline]
pub(crate) fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Boundary behavior of the scalar and vector checks. Evaluator-level
    // error routing is covered in the density / joint / kalman modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Scales must be strictly positive and finite; NaN must not slip through.
    fn validate_scale_rejects_zero_negative_nan_and_inf() {
        assert_eq!(validate_scale(0.25_f64), Ok(0.25));
        for bad in [0.0_f64, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(validate_scale(bad), Err(SSMError::InvalidScale { .. })));
        }
    }

    #[test]
    // Purpose
    // -------
    // The stationarity region is open: |a| = 1 is already a violation.
    fn validate_coefficient_is_open_interval() {
        assert!(validate_coefficient(0.999_f64).is_ok());
        assert!(validate_coefficient(-0.999_f64).is_ok());
        for bad in [1.0_f64, -1.0, 1.5, f64::NAN] {
            assert!(matches!(
                validate_coefficient(bad),
                Err(SSMError::NonStationaryCoefficient { .. })
            ));
        }
    }

    #[test]
    // Purpose
    // -------
    // Sequence and θ checks report the first offending position.
    fn vector_checks_report_first_offender() {
        let empty: [f64; 0] = [];
        assert_eq!(validate_series_len(&empty), Err(SSMError::EmptySequence));
        assert_eq!(validate_path_len(4, 3), Err(SSMError::LengthMismatch { expected: 4, actual: 3 }));

        let y = array![0.1, f64::NAN, f64::INFINITY];
        assert!(matches!(
            validate_finite_series(y.view()),
            Err(SSMError::NonFiniteData { index: 1, .. })
        ));

        let theta = array![0.0, 1.0];
        assert_eq!(
            validate_theta(theta.view(), 3),
            Err(SSMError::InvalidThetaLength { expected: 3, actual: 2 })
        );
        let theta = array![0.0, f64::NEG_INFINITY, 1.0];
        assert!(matches!(
            validate_theta(theta.view(), 3),
            Err(SSMError::InvalidThetaInput { index: 1, .. })
        ));
    }
}
