//! Public configuration and model interface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: implemented by the state-space models.
//! - [`MLEOptions`] / [`Tolerances`]: validated optimizer configuration.
//! - [`LineSearcher`]: line search used inside L-BFGS.
//! - [`OptimOutcome`]: normalized result of a run.
//!
//! Convention: the optimizer maximizes `ℓ(θ)` by minimizing `c(θ) = −ℓ(θ)`.
//! For the AR(1) models `ℓ(θ)` is the negated NLL per observation, so
//! `OptimOutcome::value` is `−NLL(θ̂) / n`.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        types::{Cost, FnEvalMap, Grad, Theta},
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Model interface for the optimizer.
///
/// `value` returns `ℓ(θ)`; `grad`, when implemented, returns `∇ℓ(θ)` (the
/// adapter flips signs for argmin). Without `grad`, finite differences of
/// the cost are used. `check` runs once on `θ₀` before optimization.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used by L-BFGS. Parses case-insensitively from
/// `"MoreThuente"` / `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSearcher {
    #[default]
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Stopping rules. At least one field must be `Some`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Stop when the gradient norm falls below this value.
    pub tol_grad: Option<f64>,
    /// Stop when the change in cost falls below this value.
    pub tol_cost: Option<f64>,
    /// Hard iteration cap.
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if max_iter == Some(0) {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    /// `tol_grad = 1e-6`, no cost rule, at most 300 iterations.
    fn default() -> Self {
        Self { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) }
    }
}

/// Optimizer configuration.
///
/// `verbose` attaches argmin's slog terminal observer and prints `ℓ(θ₀)`
/// when the crate is built with the `obs_slog` feature; otherwise it is
/// ignored. `lbfgs_mem = None` uses [`DEFAULT_LBFGS_MEM`].
///
/// [`DEFAULT_LBFGS_MEM`]: crate::optimization::loglik_optimizer::types::DEFAULT_LBFGS_MEM
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Validated options.
    ///
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if lbfgs_mem == Some(0) {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

/// Result of [`maximize`](crate::optimization::loglik_optimizer::maximize).
///
/// - `value` is the best **log-likelihood** `ℓ(θ̂)`, not the cost.
/// - `converged` is `true` only when argmin reports `SolverConverged` or
///   `TargetCostReached`; `status` carries argmin's reason either way.
/// - `grad_norm` is the norm of the last cost gradient, if argmin kept one.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated outcome from raw solver state.
    ///
    /// # Errors
    /// Validation errors for a missing or non-finite `theta_hat` or a
    /// non-finite `value`.
    pub fn new(
        theta_hat: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat)?;
        validate_value(value)?;
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        );
        let status = match termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm: grad.map(|g| g.l2_norm()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Configuration validation and outcome normalization. Solver behavior is
    // covered in `solver` and by the model tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `Tolerances::new` enforces at least one rule and valid values.
    fn tolerances_validation() {
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(
            Tolerances::new(Some(-1.0), None, None),
            Err(OptError::InvalidTolGrad { .. })
        ));
        assert!(matches!(
            Tolerances::new(None, Some(f64::NAN), None),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(Tolerances::new(None, None, Some(0)), Err(OptError::InvalidMaxIter { .. })));
        assert!(Tolerances::new(None, None, Some(10)).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Line-search parsing is case-insensitive and rejects unknown names.
    fn line_searcher_parses_case_insensitively() {
        assert_eq!("HAGERZHANG".parse::<LineSearcher>(), Ok(LineSearcher::HagerZhang));
        assert_eq!("moreThuente".parse::<LineSearcher>(), Ok(LineSearcher::MoreThuente));
        assert!(matches!(
            "backtracking".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Zero L-BFGS memory is a configuration error; defaults are valid.
    fn mle_options_validation() {
        let tols = Tolerances::default();
        assert!(matches!(
            MLEOptions::new(tols, LineSearcher::HagerZhang, false, Some(0)),
            Err(OptError::InvalidLBFGSMem { .. })
        ));
        let opts = MLEOptions::new(tols, LineSearcher::HagerZhang, false, Some(5)).expect("valid");
        assert_eq!(opts.lbfgs_mem, Some(5));
        assert_eq!(MLEOptions::default().line_searcher, LineSearcher::MoreThuente);
    }

    #[test]
    // Purpose
    // -------
    // Outcome normalization maps termination status and gradient norm.
    fn outcome_normalizes_status_and_grad_norm() {
        let out = OptimOutcome::new(
            Some(array![0.5]),
            -3.0,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
            Some(array![3.0, 4.0]),
        )
        .expect("valid outcome");
        assert!(out.converged);
        assert_eq!(out.iterations, 12);
        assert_eq!(out.grad_norm, Some(5.0));

        let not_done = OptimOutcome::new(
            Some(array![0.5]),
            -3.0,
            TerminationStatus::NotTerminated,
            0,
            FnEvalMap::new(),
            None,
        )
        .expect("valid outcome");
        assert!(!not_done.converged);
        assert_eq!(not_done.status, "Not terminated");
    }

    #[test]
    // Purpose
    // -------
    // Stopping on the iteration cap or a solver exit is not convergence.
    fn outcome_flags_exit_and_max_iter_as_not_converged() {
        for reason in [
            TerminationReason::SolverExit("Line search terminated".to_string()),
            TerminationReason::MaxItersReached,
        ] {
            let out = OptimOutcome::new(
                Some(array![0.5]),
                -3.0,
                TerminationStatus::Terminated(reason),
                4,
                FnEvalMap::new(),
                None,
            )
            .expect("valid outcome");
            assert!(!out.converged, "{}", out.status);
        }
    }
}
