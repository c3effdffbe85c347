//! Flow operators for the Eddy solver.
//!
//! - [`advection`]: semi-Lagrangian backtrace with bilinear sampling and
//!   linear extrapolation past the grid edge.
//! - [`projection`]: divergence, pressure solve, and gradient correction.
//! - [`vortex`]: analytic point-vortex initial conditions.
//!
//! Every operator takes its input by reference and returns a new grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod advection;
pub mod projection;
pub mod vortex;

pub use advection::{advect, extrapolate, face_or_extrapolate, sample};
pub use projection::{divergence, max_abs_divergence, max_unpinned_divergence, project};
pub use vortex::{seed, Vortex};
