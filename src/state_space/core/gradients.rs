//! Analytic gradients of both negative log-likelihoods.
//!
//! Purpose
//! -------
//! Supply exact first derivatives to the optimizer so it does not fall back
//! to finite differences in the inner loop.
//!
//! Key behaviors
//! -------------
//! - [`kalman_marginal_nll_grad`] runs the filter together with a forward
//!   sensitivity recursion: alongside `(x_pred, P_pred)` it carries
//!   `∂x_pred/∂(a, q, r)` and `∂P_pred/∂(a, q, r)`, and differentiates each
//!   per-step term `0.5 (ln(2πS) + v²/S)`.
//! - [`state_augmented_nll_grad`] differentiates the three joint blocks
//!   directly; the path gradient has one entry per time step.
//! - [`StructuralGrad::to_log_variance`] applies the chain rule for the
//!   log-variance parameterization (`∂/∂log_q = q · ∂/∂q`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated exactly as in the value-only evaluators, and the
//!   returned NLL equals theirs up to rounding.
//! - Gradients are of the NLL (a cost). Models negate them for the
//!   maximizing `LogLikelihood` interface.
//!
//! Testing notes
//! -------------
//! - Each gradient is checked against central finite differences of the
//!   value-only evaluator, including the path gradient of the joint NLL.
use crate::state_space::{
    core::{
        params::stationary_variance,
        validation::{
            lit, validate_coefficient, validate_path_len, validate_scale, validate_series_len,
        },
    },
    errors::SSMResult,
};
use num_traits::Float;

/// Derivatives of an NLL with respect to `(a, q, r)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructuralGrad<T> {
    pub a: T,
    pub q: T,
    pub r: T,
}

impl<T: Float> StructuralGrad<T> {
    fn zero() -> Self {
        StructuralGrad { a: T::zero(), q: T::zero(), r: T::zero() }
    }

    fn from_array(g: [T; 3]) -> Self {
        StructuralGrad { a: g[0], q: g[1], r: g[2] }
    }

    /// Re-express as derivatives w.r.t. `(a, log_q, log_r)` at the given
    /// variances.
    pub fn to_log_variance(self, q: T, r: T) -> Self {
        StructuralGrad { a: self.a, q: self.q * q, r: self.r * r }
    }
}

/// Gradient of the joint NLL: structural part and one entry per path value.
#[derive(Debug, Clone, PartialEq)]
pub struct JointGradient<T> {
    pub structural: StructuralGrad<T>,
    pub path: Vec<T>,
}

/// Marginal NLL and its gradient w.r.t. `(a, q, r)`.
///
/// # Errors
/// Same as [`kalman_marginal_nll`](crate::state_space::core::kalman::kalman_marginal_nll).
pub fn kalman_marginal_nll_grad<T: Float>(
    y: &[T], a: T, q: T, r: T,
) -> SSMResult<(T, StructuralGrad<T>)> {
    validate_series_len(y)?;
    let r = validate_scale(r)?;
    let a = validate_coefficient(a)?;
    let mut p = stationary_variance(a, q)?;

    let (zero, one, two, half) = (T::zero(), T::one(), lit::<T>(2.0), lit::<T>(0.5));
    let ln_2pi = lit::<T>(std::f64::consts::TAU.ln());
    let denom = one - a * a;

    let mut m = zero;
    let mut dm = [zero; 3];
    let mut dp = [two * a * q / (denom * denom), one / denom, zero];
    let mut nll = zero;
    let mut g = [zero; 3];

    for &y_t in y {
        let s = validate_scale(p + r)?;
        let ds = [dp[0], dp[1], dp[2] + one];
        let v = y_t - m;
        nll = nll + half * (ln_2pi + s.ln() + v * v / s);

        let k = p / s;
        let m_filt = m + k * v;
        let p_filt = (one - k) * p;
        let transition = [two * a * p_filt, one, zero];
        for i in 0..3 {
            let dv = -dm[i];
            g[i] = g[i] + half * (ds[i] / s + two * v * dv / s - v * v * ds[i] / (s * s));
            let dk = (dp[i] * s - p * ds[i]) / (s * s);
            let dm_filt = dm[i] + dk * v + k * dv;
            let dp_filt = -dk * p + (one - k) * dp[i];
            dm[i] = a * dm_filt + if i == 0 { m_filt } else { zero };
            dp[i] = a * a * dp_filt + transition[i];
        }
        m = a * m_filt;
        p = a * a * p_filt + q;
    }
    Ok((nll, StructuralGrad::from_array(g)))
}

/// Joint NLL and its gradient w.r.t. `(a, q, r)` and the latent path `x`.
///
/// # Errors
/// Same as [`state_augmented_nll`](crate::state_space::core::joint::state_augmented_nll).
pub fn state_augmented_nll_grad<T: Float>(
    y: &[T], a: T, q: T, r: T, x: &[T],
) -> SSMResult<(T, JointGradient<T>)> {
    let n = validate_series_len(y)?;
    validate_path_len(n, x.len())?;
    let q = validate_scale(q)?;
    let r = validate_scale(r)?;
    let a = validate_coefficient(a)?;
    let v0 = stationary_variance(a, q)?;

    let (one, two, half) = (T::one(), lit::<T>(2.0), lit::<T>(0.5));
    let half_ln_2pi = lit::<T>(0.5 * std::f64::consts::TAU.ln());
    let mut nll = T::zero();
    let mut g = StructuralGrad::zero();
    let mut gx = vec![T::zero(); n];

    for t in 1..n {
        let e = x[t] - a * x[t - 1];
        nll = nll + half_ln_2pi + half * q.ln() + half * e * e / q;
        gx[t] = gx[t] + e / q;
        gx[t - 1] = gx[t - 1] - a * e / q;
        g.a = g.a - x[t - 1] * e / q;
        g.q = g.q + half / q - half * e * e / (q * q);
    }
    for t in 0..n {
        let u = y[t] - x[t];
        nll = nll + half_ln_2pi + half * r.ln() + half * u * u / r;
        gx[t] = gx[t] - u / r;
        g.r = g.r + half / r - half * u * u / (r * r);
    }

    let x0 = x[0];
    nll = nll + half_ln_2pi + half * v0.ln() + half * x0 * x0 / v0;
    gx[0] = gx[0] + x0 / v0;
    let d_v0 = half / v0 - half * x0 * x0 / (v0 * v0);
    let denom = one - a * a;
    g.a = g.a + d_v0 * two * a * q / (denom * denom);
    g.q = g.q + d_v0 / denom;

    Ok((nll, JointGradient { structural: g, path: gx }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_space::core::{joint::state_augmented_nll, kalman::kalman_marginal_nll};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Analytic gradients against central differences of the value-only
    // evaluators, plus value consistency and the log-variance chain rule.
    // -------------------------------------------------------------------------

    const Y: [f64; 6] = [0.5, 0.3, -0.1, 0.4, 1.1, -0.6];
    const H: f64 = 1e-6;

    #[test]
    // Purpose
    // -------
    // The sensitivity recursion differentiates the Kalman NLL exactly.
    //
    // Given
    // -----
    // - Several (a, q, r) including a negative coefficient.
    //
    // Expect
    // ------
    // - NLL equal to `kalman_marginal_nll`; each partial within 1e-5 of a
    //   central difference.
    fn marginal_grad_matches_finite_differences() {
        for &(a, q, r) in &[(0.7, 1.0, 0.5), (-0.45, 0.4, 1.3), (0.92, 0.2, 0.1)] {
            let (nll, g) = kalman_marginal_nll_grad(&Y, a, q, r).expect("valid");
            let f = |a: f64, q: f64, r: f64| kalman_marginal_nll(&Y, a, q, r).expect("valid");
            assert_relative_eq!(nll, f(a, q, r), max_relative = 1e-12);

            let fd_a = (f(a + H, q, r) - f(a - H, q, r)) / (2.0 * H);
            let fd_q = (f(a, q + H, r) - f(a, q - H, r)) / (2.0 * H);
            let fd_r = (f(a, q, r + H) - f(a, q, r - H)) / (2.0 * H);
            assert_relative_eq!(g.a, fd_a, epsilon = 1e-5);
            assert_relative_eq!(g.q, fd_q, epsilon = 1e-5);
            assert_relative_eq!(g.r, fd_r, epsilon = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // Structural and path gradients of the joint NLL match central
    // differences.
    fn joint_grad_matches_finite_differences() {
        let x = [0.4, 0.25, -0.05, 0.35, 0.9, -0.3];
        let (a, q, r) = (0.6, 0.8, 0.4);
        let (nll, grad) = state_augmented_nll_grad(&Y, a, q, r, &x).expect("valid");
        let f = |a: f64, q: f64, r: f64, x: &[f64]| {
            state_augmented_nll(&Y, a, q, r, x).expect("valid")
        };
        assert_relative_eq!(nll, f(a, q, r, &x), max_relative = 1e-12);

        let g = grad.structural;
        assert_relative_eq!(g.a, (f(a + H, q, r, &x) - f(a - H, q, r, &x)) / (2.0 * H), epsilon = 1e-5);
        assert_relative_eq!(g.q, (f(a, q + H, r, &x) - f(a, q - H, r, &x)) / (2.0 * H), epsilon = 1e-5);
        assert_relative_eq!(g.r, (f(a, q, r + H, &x) - f(a, q, r - H, &x)) / (2.0 * H), epsilon = 1e-5);

        for t in 0..x.len() {
            let mut up = x;
            let mut dn = x;
            up[t] += H;
            dn[t] -= H;
            let fd = (f(a, q, r, &up) - f(a, q, r, &dn)) / (2.0 * H);
            assert_relative_eq!(grad.path[t], fd, epsilon = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // ∂/∂log_q = q·∂/∂q is what the log-variance evaluator differentiates to.
    fn log_variance_chain_rule() {
        let (a, q, r) = (0.3, 1.7, 0.6);
        let (_, g) = kalman_marginal_nll_grad(&Y, a, q, r).expect("valid");
        let g_log = g.to_log_variance(q, r);
        let (lq, lr) = (q.ln(), r.ln());
        let f = |lq: f64, lr: f64| kalman_marginal_nll(&Y, a, lq.exp(), lr.exp()).expect("valid");
        assert_relative_eq!(g_log.q, (f(lq + H, lr) - f(lq - H, lr)) / (2.0 * H), epsilon = 1e-5);
        assert_relative_eq!(g_log.r, (f(lq, lr + H) - f(lq, lr - H)) / (2.0 * H), epsilon = 1e-5);
        assert_eq!(g_log.a, g.a);
    }
}
