//! Reduction of a (possibly singular) Laplacian to an SPD system.
//!
//! The Laplacian is negative semi-definite. Both backends solve
//! `(-L) x = -b`, which is positive definite once the null space is
//! removed. For zero-row-sum boundary conditions the null space is the
//! constants, so one unknown is pinned to zero and its row and column
//! are dropped.

use eddy_core::SolverError;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// The negated Laplacian with an optional pinned unknown removed.
#[derive(Clone, Debug)]
pub(crate) struct ReducedSystem {
    dim: usize,
    pinned: Option<usize>,
    matrix: CsrMatrix<f64>,
}

impl ReducedSystem {
    /// Build `-L` restricted to every unknown except `pinned`.
    pub(crate) fn new(laplacian: &CsrMatrix<f64>, pinned: Option<usize>) -> Result<Self, SolverError> {
        let dim = laplacian.nrows();
        if laplacian.ncols() != dim {
            return Err(SolverError::DimensionMismatch {
                expected: dim,
                got: laplacian.ncols(),
            });
        }
        if let Some(p) = pinned {
            if p >= dim {
                return Err(SolverError::DimensionMismatch {
                    expected: dim,
                    got: p + 1,
                });
            }
        }
        let reduced_dim = dim - usize::from(pinned.is_some());
        let mut coo = CooMatrix::new(reduced_dim, reduced_dim);
        for (i, j, v) in laplacian.triplet_iter() {
            if let (Some(ri), Some(rj)) = (reduce_index(i, pinned), reduce_index(j, pinned)) {
                coo.push(ri, rj, -*v);
            }
        }
        Ok(Self {
            dim,
            pinned,
            matrix: CsrMatrix::from(&coo),
        })
    }

    /// Number of unknowns in the full system.
    pub(crate) fn dim(&self) -> usize {
        self.dim
    }

    /// Number of unknowns after pinning.
    pub(crate) fn reduced_dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// The SPD matrix `-L` without the pinned row and column.
    pub(crate) fn matrix(&self) -> &CsrMatrix<f64> {
        &self.matrix
    }

    /// Map a full right-hand side `b` to the reduced `-b`.
    pub(crate) fn restrict(&self, rhs: &[f64]) -> Result<Vec<f64>, SolverError> {
        if rhs.len() != self.dim {
            return Err(SolverError::DimensionMismatch {
                expected: self.dim,
                got: rhs.len(),
            });
        }
        Ok(rhs
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != self.pinned)
            .map(|(_, b)| -b)
            .collect())
    }

    /// Re-insert the pinned unknown (as zero) into a reduced solution.
    pub(crate) fn expand(&self, reduced: &[f64]) -> Vec<f64> {
        let mut full = Vec::with_capacity(self.dim);
        let mut values = reduced.iter();
        for i in 0..self.dim {
            if Some(i) == self.pinned {
                full.push(0.0);
            } else {
                full.push(values.next().copied().unwrap_or(0.0));
            }
        }
        full
    }
}

fn reduce_index(i: usize, pinned: Option<usize>) -> Option<usize> {
    match pinned {
        Some(p) if i == p => None,
        Some(p) if i > p => Some(i - 1),
        _ => Some(i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryCondition;
    use crate::laplacian::assemble_laplacian;

    #[test]
    fn pinning_drops_one_row_and_negates() {
        let l = assemble_laplacian(3, BoundaryCondition::Neumann);
        let sys = ReducedSystem::new(&l, Some(0)).unwrap();
        assert_eq!(sys.dim(), 9);
        assert_eq!(sys.reduced_dim(), 8);
        // Old (4, 4) is now (3, 3), negated.
        let center = sys.matrix().get_entry(3, 3).unwrap().into_value();
        assert_eq!(center, 4.0);
    }

    #[test]
    fn unpinned_keeps_full_dimension() {
        let l = assemble_laplacian(3, BoundaryCondition::Dirichlet);
        let sys = ReducedSystem::new(&l, None).unwrap();
        assert_eq!(sys.reduced_dim(), 9);
    }

    #[test]
    fn restrict_and_expand_skip_pinned_slot() {
        let l = assemble_laplacian(2, BoundaryCondition::Neumann);
        let sys = ReducedSystem::new(&l, Some(0)).unwrap();
        assert_eq!(sys.restrict(&[1.0, 2.0, 3.0, 4.0]).unwrap(), vec![-2.0, -3.0, -4.0]);
        assert_eq!(sys.expand(&[5.0, 6.0, 7.0]), vec![0.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn restrict_rejects_wrong_length() {
        let l = assemble_laplacian(2, BoundaryCondition::Neumann);
        let sys = ReducedSystem::new(&l, Some(0)).unwrap();
        assert_eq!(
            sys.restrict(&[1.0; 3]).unwrap_err(),
            SolverError::DimensionMismatch {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn single_cell_reduces_to_empty_system() {
        let l = assemble_laplacian(1, BoundaryCondition::Neumann);
        let sys = ReducedSystem::new(&l, Some(0)).unwrap();
        assert_eq!(sys.reduced_dim(), 0);
        assert_eq!(sys.expand(&[]), vec![0.0]);
    }
}
