//! Iterative backend: unpreconditioned conjugate gradient.

use eddy_core::SolverError;
use nalgebra_sparse::CsrMatrix;

use crate::reduced::ReducedSystem;
use crate::solver::Solver;

/// Stopping criteria for [`ConjugateGradientSolver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CgParams {
    /// Stop once `‖r‖ / ‖b‖` falls to or below this value.
    pub tolerance: f64,
    /// Iteration budget. `0` means "use the system dimension times ten".
    pub max_iterations: usize,
}

impl Default for CgParams {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 0,
        }
    }
}

/// Conjugate gradient on the same reduced SPD system the Cholesky
/// backend factorizes. Setup is only the reduction; each solve iterates.
pub struct ConjugateGradientSolver {
    system: ReducedSystem,
    params: CgParams,
}

impl ConjugateGradientSolver {
    /// Prepare `laplacian` for iterative solves, pinning `pinned` if given.
    pub fn factorize(
        laplacian: &CsrMatrix<f64>,
        pinned: Option<usize>,
        params: CgParams,
    ) -> Result<Self, SolverError> {
        let system = ReducedSystem::new(laplacian, pinned)?;
        log::debug!(
            "cg: prepared {}x{} system (tolerance {:e})",
            system.reduced_dim(),
            system.reduced_dim(),
            params.tolerance
        );
        Ok(Self { system, params })
    }

    /// The stopping criteria in use.
    pub fn params(&self) -> CgParams {
        self.params
    }

    fn max_iterations(&self) -> usize {
        if self.params.max_iterations == 0 {
            self.system.reduced_dim().max(1) * 10
        } else {
            self.params.max_iterations
        }
    }
}

impl Solver for ConjugateGradientSolver {
    fn name(&self) -> &str {
        "conjugate_gradient"
    }

    fn dim(&self) -> usize {
        self.system.dim()
    }

    fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>, SolverError> {
        let b = self.system.restrict(rhs)?;
        let a = self.system.matrix();
        let b_norm = dot(&b, &b).sqrt();
        let mut x = vec![0.0; b.len()];
        if b_norm == 0.0 {
            return Ok(self.system.expand(&x));
        }

        let mut r = b;
        let mut p = r.clone();
        let mut ap = vec![0.0; r.len()];
        let mut rr = dot(&r, &r);
        let limit = self.max_iterations();

        for iteration in 0..limit {
            if rr.sqrt() / b_norm <= self.params.tolerance {
                log::trace!("cg: converged after {iteration} iterations");
                return Ok(self.system.expand(&x));
            }
            spmv(a, &p, &mut ap);
            let alpha = rr / dot(&p, &ap);
            for i in 0..x.len() {
                x[i] += alpha * p[i];
                r[i] -= alpha * ap[i];
            }
            let rr_next = dot(&r, &r);
            let beta = rr_next / rr;
            for i in 0..p.len() {
                p[i] = r[i] + beta * p[i];
            }
            rr = rr_next;
        }

        let residual = rr.sqrt() / b_norm;
        if residual <= self.params.tolerance {
            return Ok(self.system.expand(&x));
        }
        Err(SolverError::DidNotConverge {
            iterations: limit,
            residual,
        })
    }
}

// ── Dense helpers ──────────────────────────────────────────────

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `y = A x` over the raw CSR arrays.
fn spmv(a: &CsrMatrix<f64>, x: &[f64], y: &mut [f64]) {
    let offsets = a.row_offsets();
    let cols = a.col_indices();
    let vals = a.values();
    for (i, out) in y.iter_mut().enumerate() {
        let mut acc = 0.0;
        for k in offsets[i]..offsets[i + 1] {
            acc += vals[k] * x[cols[k]];
        }
        *out = acc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryCondition;
    use crate::cholesky::CholeskySolver;
    use crate::laplacian::assemble_laplacian;

    #[test]
    fn agrees_with_cholesky() {
        let n = 6;
        let l = assemble_laplacian(n, BoundaryCondition::Neumann);
        // Zero-mean rhs keeps the system consistent.
        let mut rhs: Vec<f64> = (0..n * n).map(|i| ((i * 13) % 7) as f64).collect();
        let mean = rhs.iter().sum::<f64>() / rhs.len() as f64;
        rhs.iter_mut().for_each(|v| *v -= mean);

        let direct = CholeskySolver::factorize(&l, Some(0)).unwrap();
        let iterative = ConjugateGradientSolver::factorize(&l, Some(0), CgParams::default()).unwrap();
        let a = direct.solve(&rhs).unwrap();
        let b = iterative.solve(&rhs).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-8, "{x} vs {y}");
        }
    }

    #[test]
    fn zero_rhs_returns_zero_immediately() {
        let l = assemble_laplacian(3, BoundaryCondition::Dirichlet);
        let solver = ConjugateGradientSolver::factorize(&l, None, CgParams::default()).unwrap();
        assert_eq!(solver.solve(&[0.0; 9]).unwrap(), vec![0.0; 9]);
    }

    #[test]
    fn tiny_budget_reports_non_convergence() {
        let l = assemble_laplacian(8, BoundaryCondition::Dirichlet);
        let params = CgParams {
            tolerance: 1e-14,
            max_iterations: 1,
        };
        let solver = ConjugateGradientSolver::factorize(&l, None, params).unwrap();
        let mut rhs = vec![0.0; 64];
        rhs[0] = 1.0;
        rhs[37] = -3.0;
        let err = solver.solve(&rhs).unwrap_err();
        assert!(matches!(err, SolverError::DidNotConverge { iterations: 1, .. }));
    }

    #[test]
    fn spmv_matches_row_iteration() {
        let l = assemble_laplacian(3, BoundaryCondition::Periodic);
        let x: Vec<f64> = (0..9).map(|i| i as f64).collect();
        let mut y = vec![0.0; 9];
        spmv(&l, &x, &mut y);
        for (i, row) in l.row_iter().enumerate() {
            let want: f64 = row
                .col_indices()
                .iter()
                .zip(row.values())
                .map(|(&j, v)| v * x[j])
                .sum();
            assert_eq!(y[i], want);
        }
    }
}
