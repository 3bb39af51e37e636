use boxdim_core::Real;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Generic non-linear least squares problem with dense parameter/residual vectors.
///
/// The default Jacobian uses forward differences with a step of
/// `1e-6 * max(1, |x_i|)` per parameter.
pub trait NllsProblem {
    /// Number of parameters in the optimization vector.
    fn num_params(&self) -> usize;
    /// Number of residual rows in the problem.
    fn num_residuals(&self) -> usize;

    /// Residuals for the current parameters.
    fn residuals(&self, x: &DVector<Real>) -> DVector<Real>;

    /// Jacobian of [`Self::residuals`] for the current parameters.
    fn jacobian(&self, x: &DVector<Real>) -> DMatrix<Real> {
        let base = self.residuals(x);
        let mut j = DMatrix::zeros(base.len(), x.len());
        let mut x_pert = x.clone();
        for k in 0..x.len() {
            let step = 1e-6 * x[k].abs().max(1.0);
            x_pert[k] = x[k] + step;
            let diff = (self.residuals(&x_pert) - &base) / step;
            j.set_column(k, &diff);
            x_pert[k] = x[k];
        }
        j
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Maximum number of solver iterations before termination.
    ///
    /// The LM backend follows the MINPACK convention and caps function
    /// evaluations at `max_iters * (n + 1)`.
    pub max_iters: usize,
    /// Relative tolerance on the objective (cost) reduction.
    pub ftol: Real,
    /// Orthogonality/gradient tolerance.
    pub gtol: Real,
    /// Relative tolerance on parameter updates.
    pub xtol: Real,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_iters: 200,
            ftol: 1e-12,
            gtol: 1e-12,
            xtol: 1e-12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Residual evaluations spent by the solver.
    pub iterations: usize,
    /// Final objective `0.5 * ||r||^2`.
    pub final_cost: Real,
    /// The solver stopped at a stationary point (tolerance met, zero
    /// residuals, or no further improvement possible in floating point).
    pub converged: bool,
    /// Human-readable termination reason reported by the backend.
    pub termination: String,
}

pub trait NllsSolverBackend {
    fn solve<P: NllsProblem>(
        &self,
        problem: &P,
        x0: DVector<Real>,
        opts: &SolveOptions,
    ) -> (DVector<Real>, SolveReport);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Parabola;

    impl NllsProblem for Parabola {
        fn num_params(&self) -> usize {
            2
        }

        fn num_residuals(&self) -> usize {
            2
        }

        fn residuals(&self, x: &DVector<Real>) -> DVector<Real> {
            DVector::from_vec(vec![x[0] * x[0], 3.0 * x[1] - x[0]])
        }
    }

    #[test]
    fn finite_difference_jacobian_matches_analytic() {
        let x = DVector::from_vec(vec![2.0, -1.0]);
        let j = Parabola.jacobian(&x);
        assert!((j[(0, 0)] - 4.0).abs() < 1e-4, "d r0/d x0 = {}", j[(0, 0)]);
        assert!(j[(0, 1)].abs() < 1e-12);
        assert!((j[(1, 0)] + 1.0).abs() < 1e-6);
        assert!((j[(1, 1)] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn solve_options_fill_missing_fields() {
        let opts: SolveOptions = serde_json::from_str(r#"{"max_iters": 50}"#).unwrap();
        assert_eq!(opts.max_iters, 50);
        assert_eq!(opts.ftol, SolveOptions::default().ftol);
    }
}
