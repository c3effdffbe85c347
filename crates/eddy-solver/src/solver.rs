//! The `Solver` seam and the configured Poisson solver.

use std::fmt;
use std::str::FromStr;

use eddy_core::{ParseVariantError, SolverError};

use crate::boundary::BoundaryCondition;
use crate::cg::{CgParams, ConjugateGradientSolver};
use crate::cholesky::CholeskySolver;
use crate::laplacian::{assemble_laplacian, check_row_sums};

/// A prepared linear solve for `L x = b`.
///
/// Implementations do their setup once at construction and are then
/// shared read-only; `solve` takes `&self` and may be called repeatedly.
pub trait Solver: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Number of unknowns in the full system.
    fn dim(&self) -> usize;

    /// Solve for a right-hand side of length [`Solver::dim`].
    fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>, SolverError>;
}

/// Which backend a [`PoissonSolver`] uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Sparse Cholesky, factorized once.
    #[default]
    Cholesky,
    /// Conjugate gradient, iterating on every solve.
    ConjugateGradient,
}

impl FromStr for SolverKind {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cholesky" => Ok(Self::Cholesky),
            "cg" | "conjugate_gradient" => Ok(Self::ConjugateGradient),
            _ => Err(ParseVariantError {
                kind: "solver",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cholesky => write!(f, "cholesky"),
            Self::ConjugateGradient => write!(f, "conjugate_gradient"),
        }
    }
}

/// Pressure Poisson solver for an `n × n` grid.
///
/// Assembles the Laplacian for the chosen boundary condition, checks it,
/// and hands it to a backend. For zero-row-sum conditions cell `(0, 0)`
/// is pinned to zero, which makes the system nonsingular. A consistent
/// right-hand side is then solved exactly; an inconsistent one leaves its
/// residual in cell `(0, 0)` alone.
///
/// # Examples
///
/// ```
/// use eddy_solver::{setup_solver, Solver};
///
/// let solver = setup_solver(3).unwrap();
/// let p = solver.solve(&[0.0; 9]).unwrap();
/// assert_eq!(p, vec![0.0; 9]);
/// ```
pub struct PoissonSolver {
    grid_dim: usize,
    boundary: BoundaryCondition,
    kind: SolverKind,
    backend: Box<dyn Solver>,
}

impl PoissonSolver {
    /// Build a solver with the given boundary condition and backend,
    /// using default CG parameters.
    pub fn with_kind(
        grid_dim: usize,
        boundary: BoundaryCondition,
        kind: SolverKind,
    ) -> Result<Self, SolverError> {
        Self::with_options(grid_dim, boundary, kind, CgParams::default())
    }

    /// Build a solver with explicit CG parameters (ignored by Cholesky).
    pub fn with_options(
        grid_dim: usize,
        boundary: BoundaryCondition,
        kind: SolverKind,
        cg: CgParams,
    ) -> Result<Self, SolverError> {
        if grid_dim == 0 {
            return Err(SolverError::DimensionMismatch {
                expected: 1,
                got: 0,
            });
        }
        let laplacian = assemble_laplacian(grid_dim, boundary);
        let pinned = if boundary.has_zero_row_sums() {
            check_row_sums(&laplacian)?;
            Some(0)
        } else {
            None
        };
        let backend: Box<dyn Solver> = match kind {
            SolverKind::Cholesky => Box::new(CholeskySolver::factorize(&laplacian, pinned)?),
            SolverKind::ConjugateGradient => {
                Box::new(ConjugateGradientSolver::factorize(&laplacian, pinned, cg)?)
            }
        };
        log::info!(
            "poisson solver ready: {grid_dim}x{grid_dim} grid, {boundary} boundary, {} backend",
            backend.name()
        );
        Ok(Self {
            grid_dim,
            boundary,
            kind,
            backend,
        })
    }

    /// Edge length of the grid this solver was built for.
    pub fn grid_dim(&self) -> usize {
        self.grid_dim
    }

    /// Boundary condition of the assembled Laplacian.
    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    /// Backend in use.
    pub fn kind(&self) -> SolverKind {
        self.kind
    }
}

impl Solver for PoissonSolver {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn dim(&self) -> usize {
        self.grid_dim * self.grid_dim
    }

    fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>, SolverError> {
        if rhs.len() != self.dim() {
            return Err(SolverError::DimensionMismatch {
                expected: self.dim(),
                got: rhs.len(),
            });
        }
        self.backend.solve(rhs)
    }
}

impl fmt::Debug for PoissonSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoissonSolver")
            .field("grid_dim", &self.grid_dim)
            .field("boundary", &self.boundary)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Build the default solver for an `n × n` grid: Neumann boundary,
/// Cholesky backend.
pub fn setup_solver(grid_dim: usize) -> Result<PoissonSolver, SolverError> {
    PoissonSolver::with_kind(grid_dim, BoundaryCondition::Neumann, SolverKind::Cholesky)
}
