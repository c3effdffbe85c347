//! Direct backend: sparse Cholesky, factorized once.

use eddy_core::SolverError;
use nalgebra::DMatrix;
use nalgebra_sparse::factorization::CscCholesky;
use nalgebra_sparse::{CscMatrix, CsrMatrix};

use crate::reduced::ReducedSystem;
use crate::solver::Solver;

/// Sparse Cholesky factorization of the reduced SPD system.
///
/// All the expensive work happens in [`CholeskySolver::factorize`];
/// each [`Solver::solve`] is two triangular sweeps.
pub struct CholeskySolver {
    system: ReducedSystem,
    // `None` when pinning leaves no unknowns (a 1x1 singular grid).
    factor: Option<CscCholesky<f64>>,
}

impl CholeskySolver {
    /// Factorize `laplacian`, pinning unknown `pinned` to zero if given.
    pub fn factorize(laplacian: &CsrMatrix<f64>, pinned: Option<usize>) -> Result<Self, SolverError> {
        let system = ReducedSystem::new(laplacian, pinned)?;
        let factor = if system.reduced_dim() == 0 {
            None
        } else {
            let csc = CscMatrix::from(system.matrix());
            let factor = CscCholesky::factor(&csc).map_err(|e| SolverError::FactorizationFailed {
                reason: format!("{e:?}"),
            })?;
            Some(factor)
        };
        log::debug!(
            "cholesky: factorized {}x{} system (pinned: {:?})",
            system.reduced_dim(),
            system.reduced_dim(),
            pinned
        );
        Ok(Self { system, factor })
    }
}

impl Solver for CholeskySolver {
    fn name(&self) -> &str {
        "cholesky"
    }

    fn dim(&self) -> usize {
        self.system.dim()
    }

    fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>, SolverError> {
        let b = self.system.restrict(rhs)?;
        let Some(factor) = &self.factor else {
            return Ok(self.system.expand(&[]));
        };
        let b = DMatrix::from_column_slice(b.len(), 1, &b);
        let x = factor.solve(&b);
        Ok(self.system.expand(x.as_slice()))
    }
}
