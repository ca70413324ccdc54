//! Observation container for AR(1) state-space estimation.
//!
//! Purpose
//! -------
//! Validate an observation series once, at construction, so estimation
//! models can hand a plain `&[f64]` to the likelihood evaluators on every
//! call without re-checking it.
//!
//! Invariants
//! ----------
//! - `len() > 0`.
//! - Every entry is finite.
//! - The observations are private, so both hold for the series' lifetime.
//!
//! The raw evaluators still accept any slice and check emptiness themselves;
//! this type is the entry point for the estimation layer.
use crate::state_space::{
    core::validation::validate_finite_series,
    errors::{SSMError, SSMResult},
};
use ndarray::{Array1, ArrayView1};

/// Validated observation series `y[0..n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    data: Vec<f64>,
}

impl ObservationSeries {
    /// Construct a validated series.
    ///
    /// # Errors
    /// - [`SSMError::EmptySequence`] if `data` is empty.
    /// - [`SSMError::NonFiniteData`] for the first NaN/±inf entry.
    ///
    /// [`SSMError::EmptySequence`]: crate::state_space::errors::SSMError::EmptySequence
    /// [`SSMError::NonFiniteData`]: crate::state_space::errors::SSMError::NonFiniteData
    pub fn new(data: Array1<f64>) -> SSMResult<Self> {
        if data.is_empty() {
            return Err(SSMError::EmptySequence);
        }
        validate_finite_series(data.view())?;
        Ok(ObservationSeries { data: data.to_vec() })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Contiguous view of the observations.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The observations as an `ndarray` view.
    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.data)
    }

    /// Sample mean and variance `(ȳ, s²)` with divisor `n`.
    pub fn moments(&self) -> (f64, f64) {
        let y = self.view();
        (y.mean().unwrap_or(0.0), y.var(0.0))
    }

    /// Lag-1 sample autocorrelation; 0 when `n < 2` or the series is constant.
    pub fn lag1_autocorrelation(&self) -> f64 {
        let (mean, var) = self.moments();
        if self.len() < 2 || !(var > 0.0) {
            return 0.0;
        }
        let y = self.as_slice();
        let cov: f64 =
            y.windows(2).map(|w| (w[0] - mean) * (w[1] - mean)).sum::<f64>() / self.len() as f64;
        cov / var
    }
}

impl TryFrom<Vec<f64>> for ObservationSeries {
    type Error = SSMError;

    fn try_from(data: Vec<f64>) -> SSMResult<Self> {
        ObservationSeries::new(Array1::from(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Construction invariants and the moment helpers used for starting
    // values.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Empty and non-finite inputs are rejected with the first offender.
    fn new_rejects_empty_and_non_finite() {
        assert_eq!(ObservationSeries::new(Array1::zeros(0)), Err(SSMError::EmptySequence));
        assert!(matches!(
            ObservationSeries::new(array![0.1, 0.2, f64::NAN]),
            Err(SSMError::NonFiniteData { index: 2, .. })
        ));
        let ok = ObservationSeries::try_from(vec![0.5, 0.3, -0.1, 0.4]).expect("valid");
        assert_eq!(ok.len(), 4);
        assert_eq!(ok.as_slice(), &[0.5, 0.3, -0.1, 0.4]);
    }

    #[test]
    // Purpose
    // -------
    // A non-contiguous input keeps every observation in order.
    //
    // Given
    // -----
    // - Every other entry of [0, 1, …, 7], an owned array with stride 2.
    //
    // Expect
    // ------
    // - `as_slice` and `view` both yield [0, 2, 4, 6].
    fn strided_input_is_copied_contiguously() {
        let mut strided = Array1::range(0.0, 8.0, 1.0);
        strided.slice_collapse(ndarray::s![..;2]);
        assert!(strided.as_slice().is_none());

        let series = ObservationSeries::new(strided.clone()).expect("valid");
        assert_eq!(series.as_slice(), &[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(series.view(), strided.view());
        assert_eq!(series.len(), 4);
    }

    #[test]
    // Purpose
    // -------
    // Moments and lag-1 autocorrelation match direct computation.
    fn moments_and_autocorrelation() {
        let series = ObservationSeries::new(array![1.0, 2.0, 3.0, 4.0]).expect("valid");
        let (mean, var) = series.moments();
        assert_relative_eq!(mean, 2.5);
        assert_relative_eq!(var, 1.25);
        // Σ (y_t − ȳ)(y_{t+1} − ȳ) = (−1.5)(−0.5) + (−0.5)(0.5) + (0.5)(1.5) = 1.25
        assert_relative_eq!(series.lag1_autocorrelation(), (1.25 / 4.0) / 1.25);

        let constant = ObservationSeries::new(array![2.0, 2.0]).expect("valid");
        assert_eq!(constant.lag1_autocorrelation(), 0.0);
    }
}
