//! loglik_optimizer::solver: L-BFGS construction and execution.
//!
//! Purpose
//! -------
//! Hide argmin's generic wiring behind two steps: build an L-BFGS solver for
//! the requested line search, then run it from `θ₀` and normalize the final
//! state into an [`OptimOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`build_optimizer_more_thuente`] / [`build_optimizer_hager_zhang`] pick
//!   the line search and history size; [`configure_lbfgs`] applies the
//!   gradient and cost tolerances.
//! - [`run_lbfgs`] seeds the executor with `θ₀`, applies `max_iter`, and
//!   converts the best cost back to a log-likelihood (`value = −c(θ̂)`).
//! - A failed line search ends argmin's run with `SolverExit`; that status is
//!   returned as [`OptError::SolverExit`] instead of an outcome.
//!
//! Conventions
//! -----------
//! - With the `obs_slog` feature and `opts.verbose`, `ℓ(θ₀)` and `‖∇c(θ₀)‖`
//!   go to stderr and argmin's slog terminal observer reports every
//!   iteration. Without the feature `verbose` is inert.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        traits::{LogLikelihood, MLEOptions, OptimOutcome},
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HZ_MAX_STEP, HagerZhangLS, LbfgsHagerZhang,
            LbfgsMoreThuente, MoreThuenteLS, Theta,
        },
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::{
    core::{Executor, IterState, Solver, State, TerminationReason, TerminationStatus},
    solver::quasinewton::LBFGS,
};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// L-BFGS with the Hager–Zhang line search, initial bracket
/// `[ε, HZ_MAX_STEP]`.
///
/// # Errors
/// Bracket or tolerance errors raised by argmin while configuring the solver.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let linesearch = HagerZhangLS::new().with_bounds(f64::EPSILON, HZ_MAX_STEP)?;
    configure_lbfgs(LbfgsHagerZhang::new(linesearch, mem), opts)
}

/// L-BFGS with the More–Thuente line search.
///
/// # Errors
/// Tolerance errors raised by argmin while configuring the solver.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply the optional gradient and cost tolerances to an L-BFGS solver.
///
/// # Errors
/// Propagates argmin's rejection of a tolerance as an `OptError`.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Run `solver` on `problem` from `theta0`.
///
/// # Errors
/// - Errors raised inside the cost or gradient (model-domain errors are
///   recovered as their original `OptError` variant).
/// - [`OptError::SolverExit`] when a line search failed, typically because
///   a trial θ left the model's domain.
/// - Outcome validation errors for a missing or non-finite `θ̂`.
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, IterState<Theta, Grad, (), (), (), Cost>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }

    let mut executor = Executor::new(problem, solver).configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        executor = executor.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut state = executor.run()?.state().clone();
    let iterations = state.get_iter();
    let fn_evals = state.get_func_counts().clone();
    let termination = state.get_termination_status().clone();
    if let TerminationStatus::Terminated(TerminationReason::SolverExit(reason)) = &termination {
        return Err(OptError::SolverExit { reason: reason.clone(), iterations });
    }
    let grad = state.take_gradient();
    OptimOutcome::new(
        state.take_best_param(),
        -state.get_best_cost(),
        termination,
        iterations,
        fn_evals,
        grad,
    )
}

#[cfg(feature = "obs_slog")]
fn log_initial_state<F: LogLikelihood>(
    theta0: &Theta, problem: &ArgMinAdapter<'_, F>,
) -> OptResult<()> {
    let ell0 = -problem.cost(theta0)?;
    let grad_norm = problem.gradient(theta0).ok().map(|g| g.l2_norm());
    eprintln!(
        "init: ell(theta0) = {:.6}{}",
        ell0,
        grad_norm.map(|n| format!(", ||grad|| = {n:.6}")).unwrap_or_default()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, Tolerances};
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Builders accept default and explicit memory with and without
    //   tolerances.
    // - `run_lbfgs` reaches the optimum of a concave quadratic with both line
    //   searches and reports `value = ℓ(θ̂)`.
    // - `max_iter` caps the iteration count.
    // - A line-search failure surfaces as `OptError::SolverExit`.
    // -------------------------------------------------------------------------

    /// ℓ(θ) = −½‖θ − μ‖².
    struct Paraboloid {
        mu: Theta,
    }

    impl LogLikelihood for Paraboloid {
        type Data = ();
        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            Ok(-0.5 * (theta - &self.mu).mapv(|d| d * d).sum())
        }
        fn check(&self, theta: &Theta, _: &()) -> OptResult<()> {
            if theta.len() != self.mu.len() {
                return Err(OptError::ThetaLengthMismatch {
                    expected: self.mu.len(),
                    actual: theta.len(),
                });
            }
            Ok(())
        }
        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok(&self.mu - theta)
        }
    }

    fn opts(line_searcher: LineSearcher, max_iter: usize) -> MLEOptions {
        let tols = Tolerances::new(Some(1e-10), None, Some(max_iter)).expect("valid tolerances");
        MLEOptions::new(tols, line_searcher, false, None).expect("valid options")
    }

    #[test]
    // Purpose
    // -------
    // Builders succeed for default and explicit memory, and with no
    // gradient/cost tolerance at all.
    fn builders_accept_valid_options() {
        assert!(build_optimizer_hager_zhang(&opts(LineSearcher::HagerZhang, 10)).is_ok());
        assert!(build_optimizer_more_thuente(&opts(LineSearcher::MoreThuente, 10)).is_ok());

        let tols = Tolerances::new(None, None, Some(5)).expect("valid tolerances");
        let bare = MLEOptions::new(tols, LineSearcher::MoreThuente, false, Some(3)).expect("valid");
        assert!(configure_lbfgs(LBFGS::new(MoreThuenteLS::new(), 3), &bare).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Both line searches drive a concave quadratic to its maximizer.
    //
    // Given
    // -----
    // - μ = (1, −2), θ₀ = (0, 0).
    //
    // Expect
    // ------
    // - θ̂ ≈ μ, value ≈ 0, converged.
    fn run_lbfgs_finds_maximizer() {
        let model = Paraboloid { mu: array![1.0, -2.0] };
        for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            let o = opts(ls, 100);
            let problem = ArgMinAdapter::new(&model, &());
            let out = match ls {
                LineSearcher::MoreThuente => {
                    let solver = build_optimizer_more_thuente(&o).expect("solver");
                    run_lbfgs(array![0.0, 0.0], &o, problem, solver)
                }
                LineSearcher::HagerZhang => {
                    let solver = build_optimizer_hager_zhang(&o).expect("solver");
                    run_lbfgs(array![0.0, 0.0], &o, problem, solver)
                }
            }
            .expect("optimization should succeed");

            assert!(out.converged, "{ls:?}: {}", out.status);
            assert_relative_eq!(out.theta_hat[0], 1.0, epsilon = 1e-6);
            assert_relative_eq!(out.theta_hat[1], -2.0, epsilon = 1e-6);
            assert!(out.value <= 0.0 && out.value > -1e-10);
        }
    }

    /// ℓ(θ) = θ₀, defined only for θ₀ ≤ 3.
    struct Ramp;

    impl LogLikelihood for Ramp {
        type Data = ();
        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            if theta[0] > 3.0 {
                return Err(OptError::InvalidScale { value: 3.0 - theta[0] });
            }
            Ok(theta[0])
        }
        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
        fn grad(&self, _: &Theta, _: &()) -> OptResult<Grad> {
            Ok(array![1.0])
        }
    }

    #[test]
    // Purpose
    // -------
    // A line search that steps outside the model's domain fails the run
    // instead of returning the last iterate as an outcome.
    //
    // Given
    // -----
    // - ℓ(θ) = θ on θ ≤ 3, an error beyond; θ₀ = 0.
    // - Hager–Zhang, whose first trial is at θ₀ + HZ_MAX_STEP.
    //
    // Expect
    // ------
    // - `OptError::SolverExit` naming the domain error.
    fn run_lbfgs_reports_line_search_failure() {
        let o = opts(LineSearcher::HagerZhang, 50);
        let solver = build_optimizer_hager_zhang(&o).expect("solver");
        let out = run_lbfgs(array![0.0], &o, ArgMinAdapter::new(&Ramp, &()), solver);
        match out {
            Err(OptError::SolverExit { reason, .. }) => {
                assert!(reason.contains("Invalid variance"), "reason = {reason}")
            }
            other => panic!("expected SolverExit, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `max_iter` bounds the reported iteration count.
    fn run_lbfgs_respects_max_iter() {
        let model = Paraboloid { mu: array![5.0, 5.0, 5.0] };
        let o = opts(LineSearcher::MoreThuente, 1);
        let solver = build_optimizer_more_thuente(&o).expect("solver");
        let out = run_lbfgs(array![0.0, 0.0, 0.0], &o, ArgMinAdapter::new(&model, &()), solver)
            .expect("one iteration should succeed");
        assert!(out.iterations <= 1);
    }
}
