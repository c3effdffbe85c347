//! Sequential simulation driver.
//!
//! [`Simulation`] owns the current velocity field and pressure and
//! advances them one advect/project step at a time. [`run`] is the
//! one-call entry point: seed, project, step `step_count` times, and
//! return the recorded [`Trajectory`].
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`] and all mutating methods take `&mut self`;
//! steps cannot interleave. The pressure solver is held in an [`Arc`] and
//! may be shared with other simulations of the same resolution via
//! [`Simulation::with_solver`].

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use eddy_core::{ScalarField, SolverError, StepError};
use eddy_flow::{advect, max_unpinned_divergence, project, seed, Vortex};
use eddy_grid::StaggeredGrid;
use eddy_solver::{BoundaryCondition, PoissonSolver};

use crate::config::{ConfigError, SimulationConfig};
use crate::metrics::{RunReport, StepMetrics};
use crate::trajectory::{Frame, Trajectory};

const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── RunError ────────────────────────────────────────────────────

/// Errors from building or running a simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The configuration was rejected before any work was done.
    Config(ConfigError),
    /// A step failed. Step `0` is seeding plus the initial projection.
    Step {
        /// Index of the failed step.
        step: usize,
        /// What went wrong.
        source: StepError,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Step { step, source } => write!(f, "step {step}: {source}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Step { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── StepOutcome ─────────────────────────────────────────────────

/// Result of a successful [`Simulation::step()`] call.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// Number of steps completed, including this one.
    pub step: usize,
    /// Exported state after this step.
    pub frame: Frame,
    /// Timing and divergence for this step.
    pub metrics: StepMetrics,
}

// ── Simulation ──────────────────────────────────────────────────

/// A running simulation.
///
/// # Example
///
/// ```
/// use eddy_engine::{Simulation, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .grid_dim(6)
///     .vortex(2.5, 2.5, 0.5, true)
///     .step_count(3)
///     .build()
///     .unwrap();
/// let mut sim = Simulation::new(config).unwrap();
/// let outcome = sim.step().unwrap();
/// assert_eq!(outcome.step, 1);
/// let (trajectory, _report) = sim.run_to_end().unwrap();
/// assert_eq!(trajectory.len(), 3);
/// ```
pub struct Simulation {
    config: SimulationConfig,
    solver: Arc<PoissonSolver>,
    field: StaggeredGrid,
    pressure: ScalarField,
    step_index: usize,
    report: RunReport,
}

impl Simulation {
    /// Validate `config`, prepare the pressure solver, seed the vortices,
    /// and run the initial projection.
    pub fn new(config: SimulationConfig) -> Result<Self, RunError> {
        config.validate()?;
        let solver = PoissonSolver::with_options(
            config.grid_dim,
            BoundaryCondition::Neumann,
            config.solver,
            config.cg_params(),
        )
        .map_err(ConfigError::from)?;
        Self::with_solver(config, Arc::new(solver))
    }

    /// Like [`new()`](Self::new), but reuse an already prepared solver.
    ///
    /// The solver must have been built for `config.grid_dim` with a
    /// Neumann boundary; its backend takes precedence over the config's.
    pub fn with_solver(config: SimulationConfig, solver: Arc<PoissonSolver>) -> Result<Self, RunError> {
        let started = Instant::now();
        config.validate()?;
        if solver.grid_dim() != config.grid_dim {
            return Err(ConfigError::Solver(SolverError::DimensionMismatch {
                expected: config.grid_dim,
                got: solver.grid_dim(),
            })
            .into());
        }
        if solver.boundary() != BoundaryCondition::Neumann {
            return Err(ConfigError::UnsupportedBoundary {
                boundary: solver.boundary(),
            }
            .into());
        }

        let initial = |sim_err: StepError| RunError::Step {
            step: 0,
            source: sim_err,
        };
        let seeded = seed(config.grid_dim, &config.vortices)
            .map_err(StepError::from)
            .map_err(initial)?;
        if config.check_finite && !seeded.is_finite() {
            return Err(initial(StepError::NonFinite { stage: "seed" }));
        }
        let (field, pressure) =
            project(&*solver, &seeded, config.dt, config.rho).map_err(initial)?;
        if config.check_finite && !(field.is_finite() && pressure.is_finite()) {
            return Err(initial(StepError::NonFinite { stage: "project" }));
        }

        let report = RunReport {
            setup_us: started.elapsed().as_micros() as u64,
            steps: Vec::with_capacity(config.step_count),
        };
        log::debug!(
            "simulation ready: {n}x{n} grid, {} vortices, initial divergence {:e}",
            config.vortices.len(),
            max_unpinned_divergence(&field),
            n = config.grid_dim,
        );
        Ok(Self {
            config,
            solver,
            field,
            pressure,
            step_index: 0,
            report,
        })
    }

    /// Advance one step: advect, then project.
    ///
    /// On error the simulation is left at its previous state.
    pub fn step(&mut self) -> Result<StepOutcome, StepError> {
        let started = Instant::now();
        let (dt, rho) = (self.config.dt, self.config.rho);

        let advected = advect(&self.field, dt)?;
        if self.config.check_finite && !advected.is_finite() {
            return Err(StepError::NonFinite { stage: "advect" });
        }
        let advect_us = started.elapsed().as_micros() as u64;
        let max_divergence_before = max_unpinned_divergence(&advected);

        let project_started = Instant::now();
        let (field, pressure) = project(&*self.solver, &advected, dt, rho)?;
        if self.config.check_finite && !(field.is_finite() && pressure.is_finite()) {
            return Err(StepError::NonFinite { stage: "project" });
        }
        let project_us = project_started.elapsed().as_micros() as u64;
        let max_divergence_after = max_unpinned_divergence(&field);

        self.field = field;
        self.pressure = pressure;
        self.step_index += 1;

        if max_divergence_after > self.config.divergence_warn_threshold {
            log::warn!(
                "step {}: divergence {:e} exceeds {:e}",
                self.step_index,
                max_divergence_after,
                self.config.divergence_warn_threshold
            );
        }

        let metrics = StepMetrics {
            total_us: started.elapsed().as_micros() as u64,
            advect_us,
            project_us,
            max_divergence_before,
            max_divergence_after,
        };
        log::trace!(
            "step {}: advect {}us, project {}us",
            self.step_index,
            metrics.advect_us,
            metrics.project_us
        );
        self.report.steps.push(metrics.clone());
        Ok(StepOutcome {
            step: self.step_index,
            frame: self.current(),
            metrics,
        })
    }

    /// Step until `step_count` steps have run, recording every state.
    ///
    /// The returned trajectory starts with the current state, so a fresh
    /// simulation yields `step_count + 1` frames.
    pub fn run_to_end(&mut self) -> Result<(Trajectory, RunReport), RunError> {
        let remaining = self.config.step_count.saturating_sub(self.step_index);
        log::info!(
            "running {remaining} steps on a {n}x{n} grid (dt {}, rho {}, {} solver)",
            self.config.dt,
            self.config.rho,
            self.solver.kind(),
            n = self.config.grid_dim,
        );
        let mut trajectory = Trajectory::with_capacity(remaining + 1);
        trajectory.push(self.current());
        while self.step_index < self.config.step_count {
            let outcome = self.step().map_err(|source| RunError::Step {
                step: self.step_index + 1,
                source,
            })?;
            trajectory.push(outcome.frame);
        }
        log::info!(
            "run complete: {} frames, mean step {}us, worst divergence {:e}",
            trajectory.len(),
            self.report.mean_step_us(),
            self.report.worst_divergence()
        );
        Ok((trajectory, self.report.clone()))
    }

    /// Exported copy of the current state.
    pub fn current(&self) -> Frame {
        Frame::capture(&self.field, &self.pressure)
    }

    /// Number of steps completed.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// The current staggered velocity field.
    pub fn field(&self) -> &StaggeredGrid {
        &self.field
    }

    /// Pressure from the most recent projection.
    pub fn pressure(&self) -> &ScalarField {
        &self.pressure
    }

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The shared pressure solver.
    pub fn solver(&self) -> &Arc<PoissonSolver> {
        &self.solver
    }

    /// Metrics accumulated so far.
    pub fn report(&self) -> &RunReport {
        &self.report
    }
}

// ── Entry points ────────────────────────────────────────────────

/// Simulate `vortices` on a `grid_dim × grid_dim` grid for `step_count`
/// steps with the default Neumann boundary and Cholesky solver.
///
/// `trajectory[0]` is the seeded and projected initial state and
/// `trajectory[i]` the state after `i` steps.
pub fn run(
    grid_dim: usize,
    vortices: &[Vortex],
    step_count: usize,
    dt: f64,
    rho: f64,
) -> Result<Trajectory, RunError> {
    let config = SimulationConfig {
        grid_dim,
        vortices: vortices.to_vec(),
        step_count,
        dt,
        rho,
        ..Default::default()
    };
    run_with_config(config).map(|(trajectory, _)| trajectory)
}

/// Run a fully configured simulation to completion.
pub fn run_with_config(config: SimulationConfig) -> Result<(Trajectory, RunReport), RunError> {
    Simulation::new(config)?.run_to_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_solver::SolverKind;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            grid_dim: 6,
            vortices: vec![Vortex::new(2.5, 2.5, 0.5, true)],
            step_count: 4,
            dt: 0.05,
            rho: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn trajectory_has_one_frame_per_step_plus_initial() {
        let t = run(5, &[Vortex::new(2.0, 2.0, 0.3, false)], 3, 0.1, 1.0).unwrap();
        assert_eq!(t.len(), 4);
        assert!(t.iter().all(|f| f.grid_dim() == 5));
    }

    #[test]
    fn zero_steps_yields_initial_state_only() {
        let t = run(4, &[Vortex::new(1.5, 1.5, 1.0, true)], 0, 0.1, 1.0).unwrap();
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn no_vortices_stays_at_rest() {
        let t = run(4, &[], 2, 0.1, 1.0).unwrap();
        for frame in &t {
            assert!(frame.velocity.is_finite());
            assert!(frame.velocity.as_slice().iter().flatten().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let err = run(1, &[], 1, 0.1, 1.0).unwrap_err();
        assert_eq!(
            err,
            RunError::Config(ConfigError::GridTooSmall { configured: 1 })
        );
        assert!(matches!(
            run(4, &[], 1, -0.1, 1.0),
            Err(RunError::Config(ConfigError::InvalidDt { .. }))
        ));
    }

    #[test]
    fn step_advances_index_and_records_metrics() {
        let mut sim = Simulation::new(small_config()).unwrap();
        assert_eq!(sim.step_index(), 0);
        let outcome = sim.step().unwrap();
        assert_eq!(outcome.step, 1);
        assert_eq!(sim.step_index(), 1);
        assert_eq!(sim.report().steps.len(), 1);
        assert!(outcome.metrics.max_divergence_after < 1e-9);
        assert_eq!(outcome.frame, sim.current());
    }

    #[test]
    fn run_to_end_after_manual_steps_records_the_rest() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.step().unwrap();
        let (t, report) = sim.run_to_end().unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(report.steps.len(), 4);
        assert_eq!(sim.step_index(), 4);
    }

    #[test]
    fn shared_solver_must_match_grid() {
        let solver = Arc::new(
            PoissonSolver::with_kind(5, BoundaryCondition::Neumann, SolverKind::Cholesky).unwrap(),
        );
        let err = Simulation::with_solver(small_config(), solver).err().unwrap();
        assert!(matches!(
            err,
            RunError::Config(ConfigError::Solver(SolverError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn shared_solver_gives_identical_results() {
        let solver = Arc::new(
            PoissonSolver::with_kind(6, BoundaryCondition::Neumann, SolverKind::Cholesky).unwrap(),
        );
        let a = Simulation::with_solver(small_config(), Arc::clone(&solver))
            .unwrap()
            .run_to_end()
            .unwrap()
            .0;
        let b = Simulation::new(small_config()).unwrap().run_to_end().unwrap().0;
        assert_eq!(a, b);
    }

    #[test]
    fn cg_backend_runs() {
        let config = SimulationConfig {
            solver: SolverKind::ConjugateGradient,
            ..small_config()
        };
        let (t, report) = run_with_config(config).unwrap();
        assert_eq!(t.len(), 5);
        assert!(report.worst_divergence() < 1e-8);
    }

    #[test]
    fn run_error_display_names_step() {
        let e = RunError::Step {
            step: 3,
            source: StepError::NonFinite { stage: "advect" },
        };
        assert_eq!(e.to_string(), "step 3: non-finite values after advect");
        assert!(e.source().is_some());
    }

    #[test]
    fn shared_solver_must_be_neumann() {
        for boundary in [BoundaryCondition::Dirichlet, BoundaryCondition::Periodic] {
            let solver =
                Arc::new(PoissonSolver::with_kind(6, boundary, SolverKind::Cholesky).unwrap());
            let err = Simulation::with_solver(small_config(), solver).err().unwrap();
            assert_eq!(
                err,
                RunError::Config(ConfigError::UnsupportedBoundary { boundary })
            );
        }
    }

    #[test]
    fn metrics_cover_edge_cells() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let outcome = sim.step().unwrap();
        assert_eq!(
            outcome.metrics.max_divergence_after,
            max_unpinned_divergence(sim.field())
        );
        assert!(outcome.metrics.max_divergence_after < 1e-10);
    }
}
