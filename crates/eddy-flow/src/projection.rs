//! Pressure projection: make a velocity field divergence-free.

use eddy_core::{ScalarField, StepError};
use eddy_grid::StaggeredGrid;
use eddy_solver::Solver;

/// Cell-centered divergence of `field`.
pub fn divergence(field: &StaggeredGrid) -> ScalarField {
    let n = field.grid_dim();
    let mut div = ScalarField::zeros(n);
    for row in 0..n {
        for col in 0..n {
            div.set(row, col, field.divergence_at(row, col));
        }
    }
    div
}

/// Largest absolute cell divergence over the whole grid.
pub fn max_abs_divergence(field: &StaggeredGrid) -> f64 {
    divergence(field).max_abs()
}

/// Largest absolute divergence over every cell except `(0, 0)`.
///
/// Cell `(0, 0)` is the pinned pressure cell and keeps any net boundary
/// flux after [`project`]; every other cell is exact.
pub fn max_unpinned_divergence(field: &StaggeredGrid) -> f64 {
    let n = field.grid_dim();
    let mut max = 0.0_f64;
    for row in 0..n {
        for col in 0..n {
            if (row, col) != (0, 0) {
                max = max.max(field.divergence_at(row, col).abs());
            }
        }
    }
    max
}

/// Remove the divergent part of `field`.
///
/// Solves `L p = (rho / dt) · div` with `solver`, then subtracts
/// `(dt / rho) · ∇p` from every interior face. Faces on the grid edge are
/// copied through unchanged. Returns the corrected grid and the pressure.
///
/// `solver` must be built with [`BoundaryCondition::Neumann`]: the edge
/// faces are held fixed, which is the zero-flux condition that Laplacian
/// encodes. Other boundaries leave divergence in the edge cells.
///
/// If the edge faces carry a net flux the system has no exact solution;
/// the pinned-cell solvers then leave the residual in cell `(0, 0)` and
/// every other cell ends up divergence-free.
///
/// [`BoundaryCondition::Neumann`]: eddy_solver::BoundaryCondition::Neumann
pub fn project<S: Solver + ?Sized>(
    solver: &S,
    field: &StaggeredGrid,
    dt: f64,
    rho: f64,
) -> Result<(StaggeredGrid, ScalarField), StepError> {
    check_positive("dt", dt)?;
    check_positive("rho", rho)?;

    let n = field.grid_dim();
    let scale = rho / dt;
    let rhs: Vec<f64> = divergence(field)
        .into_vec()
        .into_iter()
        .map(|d| scale * d)
        .collect();
    let pressure = ScalarField::from_vec(n, solver.solve(&rhs)?)?;

    let mut next = field.clone();
    let k = dt / rho;
    for row in 0..n {
        for col in 0..n {
            let (r, c) = (row as isize, col as isize);
            let here = pressure.get(row, col);
            if col + 1 < n {
                let grad = pressure.get(row, col + 1) - here;
                next.set_right(r, c, field.right(r, c)? - k * grad)?;
            }
            if row + 1 < n {
                let grad = pressure.get(row + 1, col) - here;
                next.set_bottom(r, c, field.bottom(r, c)? - k * grad)?;
            }
        }
    }
    Ok((next, pressure))
}

fn check_positive(name: &'static str, value: f64) -> Result<(), StepError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StepError::InvalidParameter { name, value })
    }
}
