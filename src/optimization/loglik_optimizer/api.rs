//! Public entry point for log-likelihood maximization.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        solver::{build_optimizer_hager_zhang, build_optimizer_more_thuente, run_lbfgs},
        traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome},
        types::Theta,
    },
};

/// Maximize `f`'s log-likelihood over `θ` with L-BFGS, starting at `theta0`.
///
/// `f.check(θ₀, data)` runs first, so an invalid start fails before any
/// solver is built.
///
/// # Errors
/// - Whatever `f.check` returns.
/// - Solver construction, evaluation, and outcome validation errors.
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
