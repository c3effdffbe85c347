//! Staggered (MAC) velocity grids for Eddy simulations.
//!
//! Velocity components live on cell faces rather than cell centers:
//! horizontal velocity on vertical faces, vertical velocity on horizontal
//! faces. [`StaggeredGrid`] owns that storage and provides per-side
//! accessors with one-cell ghost addressing, face coordinates, and
//! conversion to and from a cell-centered [`VectorField`](eddy_core::VectorField).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod staggered;

pub use staggered::StaggeredGrid;
