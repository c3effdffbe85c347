//! Simulation driver for the Eddy flow solver.
//!
//! Wires seeding, advection, and projection into a sequential loop:
//! [`SimulationConfig`] describes a run, [`Simulation`] steps it, and
//! [`run`] returns the whole [`Trajectory`] in one call. Per-step
//! [`StepMetrics`] and FNV-1a [`trajectory_hash`] support profiling and
//! determinism checks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod hash;
pub mod metrics;
pub mod trajectory;

pub use config::{ConfigError, SimulationConfig, SimulationConfigBuilder};
pub use driver::{run, run_with_config, RunError, Simulation, StepOutcome};
pub use hash::{frame_hash, trajectory_hash};
pub use metrics::{RunReport, StepMetrics};
pub use trajectory::{Frame, Trajectory};
