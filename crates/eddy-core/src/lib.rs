//! Core types for the Eddy incompressible-flow solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: face
//! identifiers, dense cell-centered fields, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod face;
pub mod field;

pub use error::{GridError, ParseVariantError, SolverError, StepError};
pub use face::{Component, Side};
pub use field::{ScalarField, VectorField};
