//! 5-point Laplacian assembly over a square cell grid.
//!
//! Unknowns are numbered row-major, `index = row * n + col`. Each row of
//! the matrix holds `-4` on the diagonal and `+1` per neighbour; the
//! boundary condition decides what happens to neighbours past the edge.

use eddy_core::SolverError;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use smallvec::SmallVec;

use crate::boundary::BoundaryCondition;

/// Resolve a single axis value under the given boundary condition.
/// Returns `None` when the neighbour lies outside a non-periodic grid.
pub(crate) fn resolve_axis(val: isize, len: isize, bc: BoundaryCondition) -> Option<usize> {
    if val >= 0 && val < len {
        return Some(val as usize);
    }
    match bc {
        BoundaryCondition::Neumann | BoundaryCondition::Dirichlet => None,
        BoundaryCondition::Periodic => Some(val.rem_euclid(len) as usize),
    }
}

/// Flat indices of the 4-connected neighbours of `(row, col)` that
/// exist under `bc`. Periodic grids may list the same index twice (or
/// the cell itself) when `n < 3`.
pub(crate) fn neighbours_flat(
    row: usize,
    col: usize,
    n: usize,
    bc: BoundaryCondition,
) -> SmallVec<[usize; 4]> {
    let offsets: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    let len = n as isize;
    let mut result = SmallVec::new();
    for (dr, dc) in offsets {
        let nr = resolve_axis(row as isize + dr, len, bc);
        let nc = resolve_axis(col as isize + dc, len, bc);
        if let (Some(nr), Some(nc)) = (nr, nc) {
            result.push(nr * n + nc);
        }
    }
    result
}

/// Assemble the `n² × n²` Laplacian for an `n × n` grid.
///
/// Neumann rows add `+1` to the diagonal per missing neighbour (the
/// ghost value mirrors the cell), so their diagonal is `-k` for `k`
/// existing neighbours. Dirichlet rows keep `-4` and drop the missing
/// neighbours. Periodic rows wrap; duplicate entries are summed.
///
/// # Examples
///
/// ```
/// use eddy_solver::{assemble_laplacian, BoundaryCondition};
///
/// let l = assemble_laplacian(3, BoundaryCondition::Neumann);
/// assert_eq!(l.nrows(), 9);
/// // Corner cell: two neighbours, diagonal -2.
/// let corner = l.row(0);
/// assert_eq!(corner.get_entry(0).unwrap().into_value(), -2.0);
/// ```
pub fn assemble_laplacian(n: usize, bc: BoundaryCondition) -> CsrMatrix<f64> {
    let dim = n * n;
    let mut coo = CooMatrix::new(dim, dim);
    for row in 0..n {
        for col in 0..n {
            let i = row * n + col;
            let nbs = neighbours_flat(row, col, n, bc);
            let diagonal = match bc {
                BoundaryCondition::Neumann => -(nbs.len() as f64),
                BoundaryCondition::Dirichlet | BoundaryCondition::Periodic => -4.0,
            };
            coo.push(i, i, diagonal);
            for j in nbs {
                coo.push(i, j, 1.0);
            }
        }
    }
    CsrMatrix::from(&coo)
}

/// Verify that every row of `matrix` sums to exactly zero.
///
/// Stencil coefficients are small integers, so the sums are exact; any
/// nonzero sum means the boundary handling is broken.
pub fn check_row_sums(matrix: &CsrMatrix<f64>) -> Result<(), SolverError> {
    for (row, entries) in matrix.row_iter().enumerate() {
        let sum: f64 = entries.values().iter().sum();
        if sum != 0.0 {
            return Err(SolverError::RowSumNonZero { row, sum });
        }
    }
    Ok(())
}
