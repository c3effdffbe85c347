//! Error types for the Eddy flow solver.
//!
//! Organized by subsystem: grid addressing, the pressure solver, variant
//! parsing, and the per-step pipeline. None of these are transient; every
//! numeric stage is deterministic, so an error always points at a
//! configuration mistake or a broken invariant.

use std::error::Error;
use std::fmt;

use crate::face::Side;

/// Errors from staggered-grid addressing and field construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A face was addressed outside the ghost-addressing rule.
    FaceOutOfBounds {
        /// Requested row (may be a ghost index).
        row: isize,
        /// Requested column (may be a ghost index).
        col: isize,
        /// Requested side.
        side: Side,
        /// Edge length of the grid.
        grid_dim: usize,
    },
    /// A buffer had the wrong number of elements.
    ShapeMismatch {
        /// Which buffer was malformed.
        what: &'static str,
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        got: usize,
    },
    /// Attempted to build a grid with zero cells.
    EmptyGrid,
    /// Extrapolation was requested from a cell that is not on the edge
    /// of the grid along the extrapolated axis.
    NotABoundary {
        /// Row of the cell.
        row: isize,
        /// Column of the cell.
        col: isize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaceOutOfBounds {
                row,
                col,
                side,
                grid_dim,
            } => write!(
                f,
                "{side} face of cell ({row}, {col}) is not addressable on a {grid_dim}x{grid_dim} grid"
            ),
            Self::ShapeMismatch {
                what,
                expected,
                got,
            } => write!(f, "{what}: expected {expected} elements, got {got}"),
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::NotABoundary { row, col } => {
                write!(f, "cell ({row}, {col}) is not a boundary cell")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from Poisson matrix assembly, factorization, and solves.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverError {
    /// A row of a matrix that must have zero row sums does not.
    RowSumNonZero {
        /// Offending row.
        row: usize,
        /// Its sum.
        sum: f64,
    },
    /// The assembled matrix could not be factorized.
    FactorizationFailed {
        /// Backend-specific description.
        reason: String,
    },
    /// A right-hand side or matrix had the wrong dimension.
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// An iterative backend exhausted its iteration budget.
    DidNotConverge {
        /// Iterations performed.
        iterations: usize,
        /// Relative residual norm at exit.
        residual: f64,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowSumNonZero { row, sum } => {
                write!(f, "row {row} sums to {sum}, expected 0 (check boundary stencil)")
            }
            Self::FactorizationFailed { reason } => write!(f, "factorization failed: {reason}"),
            Self::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {expected}, got {got}")
            }
            Self::DidNotConverge {
                iterations,
                residual,
            } => write!(
                f,
                "no convergence after {iterations} iterations (residual {residual:e})"
            ),
        }
    }
}

impl Error for SolverError {}

/// An unrecognized variant name (boundary condition, solver backend).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseVariantError {
    /// What kind of variant was being parsed, e.g. `"boundary condition"`.
    pub kind: &'static str,
    /// The rejected name.
    pub name: String,
}

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.name)
    }
}

impl Error for ParseVariantError {}

/// Errors from a single advect or project stage.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// A grid access failed during the stage.
    Grid(GridError),
    /// The pressure solve failed.
    Solver(SolverError),
    /// A stage produced NaN or infinite values.
    NonFinite {
        /// Stage that produced the values (`"seed"`, `"advect"`, `"project"`).
        stage: &'static str,
    },
    /// `dt` or `rho` was not finite and positive.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Solver(e) => write!(f, "solver: {e}"),
            Self::NonFinite { stage } => write!(f, "non-finite values after {stage}"),
            Self::InvalidParameter { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Solver(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for StepError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<SolverError> for StepError {
    fn from(e: SolverError) -> Self {
        Self::Solver(e)
    }
}
