//! Adapter exposing a [`LogLikelihood`] as an argmin minimization problem.
//!
//! The cost is `c(θ) = −ℓ(θ)`. An analytic `∇ℓ` is negated; without one,
//! the cost itself is finite-differenced (no sign flip on that path).
use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::fd_gradient,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Borrowing bridge from a model and its data to argmin's
/// [`CostFunction`] / [`Gradient`].
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }

    fn neg_value(&self, theta: &Theta) -> Result<Cost, OptError> {
        let value = self.f.value(theta, self.data)?;
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value });
        }
        Ok(-value)
    }
}

impl<F: LogLikelihood> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    /// `−ℓ(θ)`; non-finite values are rejected as [`OptError::NonFiniteCost`].
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.neg_value(theta)?)
    }
}

impl<F: LogLikelihood> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// `−∇ℓ(θ)` from the model, or a finite-difference gradient of the cost
    /// when the model reports [`OptError::GradientNotImplemented`].
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                Ok(fd_gradient(theta, |x| self.neg_value(x))?)
            }
            Err(e) => Err(e.into()),
        }
    }
}
