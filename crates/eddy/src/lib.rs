//! Eddy: a 2D incompressible flow solver on a staggered grid.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Eddy sub-crates. For most users, adding `eddy` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use eddy::prelude::*;
//!
//! // One clockwise vortex in the middle of a 10×10 box, five steps.
//! let vortices = [Vortex::new(4.5, 4.5, 0.5, true)];
//! let trajectory = run(10, &vortices, 5, 0.01, 1.0).unwrap();
//! assert_eq!(trajectory.len(), 6);
//!
//! let last = trajectory.last().unwrap();
//! assert_eq!(last.velocity.grid_dim(), 10);
//! assert!(last.pressure.is_finite());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `eddy-core` | Faces, sides, cell fields, error types |
//! | [`grid`] | `eddy-grid` | The staggered MAC grid |
//! | [`solver`] | `eddy-solver` | Laplacian assembly and Poisson solvers |
//! | [`flow`] | `eddy-flow` | Advection, projection, vortex seeding |
//! | [`engine`] | `eddy-engine` | Simulation driver, config, metrics, hashing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Face sides, cell-centered fields, and error types (`eddy-core`).
pub use eddy_core as types;

/// The staggered velocity grid (`eddy-grid`).
///
/// [`grid::StaggeredGrid`] stores horizontal velocities on vertical faces
/// and vertical velocities on horizontal faces.
pub use eddy_grid as grid;

/// Poisson pressure solvers (`eddy-solver`).
///
/// [`solver::PoissonSolver`] factorizes the Laplacian once and solves
/// repeatedly; see [`solver::BoundaryCondition`] and [`solver::SolverKind`].
pub use eddy_solver as solver;

/// Advection, projection, and initial conditions (`eddy-flow`).
pub use eddy_flow as flow;

/// Simulation driver (`eddy-engine`).
///
/// [`engine::Simulation`] for step-by-step control, [`engine::run`] for a
/// whole trajectory in one call.
pub use eddy_engine as engine;

pub use eddy_engine::run;

/// Common imports for typical Eddy usage.
///
/// ```rust
/// use eddy::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use eddy_core::{Component, ScalarField, Side, VectorField};

    // Errors
    pub use eddy_core::{GridError, SolverError, StepError};

    // Grid
    pub use eddy_grid::StaggeredGrid;

    // Solver
    pub use eddy_solver::{setup_solver, BoundaryCondition, PoissonSolver, Solver, SolverKind};

    // Flow
    pub use eddy_flow::{advect, project, seed, Vortex};

    // Engine
    pub use eddy_engine::{
        run, ConfigError, Frame, RunError, Simulation, SimulationConfig, StepMetrics, Trajectory,
    };
}
