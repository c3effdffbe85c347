//! Pressure Poisson solvers for the Eddy flow solver.
//!
//! [`assemble_laplacian`] builds the 5-point Laplacian of an `n × n`
//! grid as a CSR matrix. [`PoissonSolver`] checks and prepares it once
//! with a [`Solver`] backend:
//!
//! - [`CholeskySolver`]: sparse Cholesky factorization (default).
//! - [`ConjugateGradientSolver`]: iterative, for large grids.
//!
//! Both solve the negated, pinned system, which is symmetric positive
//! definite even when the Laplacian itself is singular.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod cg;
pub mod cholesky;
pub mod laplacian;
mod reduced;
pub mod solver;

pub use boundary::BoundaryCondition;
pub use cg::{CgParams, ConjugateGradientSolver};
pub use cholesky::CholeskySolver;
pub use laplacian::{assemble_laplacian, check_row_sums};
pub use solver::{setup_solver, PoissonSolver, Solver, SolverKind};
