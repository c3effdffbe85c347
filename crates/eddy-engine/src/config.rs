//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the input for constructing a
//! [`Simulation`](crate::driver::Simulation).
//! [`validate()`](SimulationConfig::validate) checks every numeric
//! invariant before any grid or solver is built.

use std::error::Error;
use std::fmt;

use eddy_core::{ParseVariantError, SolverError};
use eddy_flow::Vortex;
use eddy_solver::{BoundaryCondition, CgParams, SolverKind};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimulationConfig::validate()`] or while
/// preparing the pressure solver.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `grid_dim` is below the minimum of 2.
    GridTooSmall {
        /// The configured edge length.
        configured: usize,
    },
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
    /// `rho` is NaN, infinite, zero, or negative.
    InvalidDensity {
        /// The invalid value.
        value: f64,
    },
    /// A vortex has a non-finite centre or speed.
    InvalidVortex {
        /// Position of the vortex in the configured list.
        index: usize,
    },
    /// CG parameters are out of range.
    InvalidSolverParams {
        /// Description of which parameter was rejected.
        reason: String,
    },
    /// A solver name was not recognized.
    UnknownVariant(ParseVariantError),
    /// A shared solver was built for a boundary other than Neumann.
    UnsupportedBoundary {
        /// The solver's boundary condition.
        boundary: BoundaryCondition,
    },
    /// The pressure solver could not be prepared.
    Solver(SolverError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { configured } => {
                write!(f, "grid_dim {configured} is below minimum of 2")
            }
            Self::InvalidDt { value } => write!(f, "dt must be finite and positive, got {value}"),
            Self::InvalidDensity { value } => {
                write!(f, "rho must be finite and positive, got {value}")
            }
            Self::InvalidVortex { index } => {
                write!(f, "vortex {index} has a non-finite centre or speed")
            }
            Self::InvalidSolverParams { reason } => write!(f, "invalid solver params: {reason}"),
            Self::UnknownVariant(e) => write!(f, "{e}"),
            Self::UnsupportedBoundary { boundary } => {
                write!(f, "projection needs a neumann pressure solver, got {boundary}")
            }
            Self::Solver(e) => write!(f, "solver: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownVariant(e) => Some(e),
            Self::Solver(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseVariantError> for ConfigError {
    fn from(e: ParseVariantError) -> Self {
        Self::UnknownVariant(e)
    }
}

impl From<SolverError> for ConfigError {
    fn from(e: SolverError) -> Self {
        Self::Solver(e)
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Complete configuration for one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Edge length of the square cell grid. Minimum: 2.
    pub grid_dim: usize,
    /// Point vortices summed into the initial field.
    pub vortices: Vec<Vortex>,
    /// Number of advect/project steps after the initial projection.
    pub step_count: usize,
    /// Time step in seconds.
    pub dt: f64,
    /// Fluid density.
    pub rho: f64,
    /// Pressure solver backend. Default: Cholesky.
    pub solver: SolverKind,
    /// Relative residual target for the CG backend. Default: 1e-12.
    pub cg_tolerance: f64,
    /// CG iteration budget; `0` picks ten times the system size.
    pub cg_max_iterations: usize,
    /// Fail a step whose output contains NaN or infinity. Default: true.
    pub check_finite: bool,
    /// Log a warning when divergence after projection, outside the pinned
    /// cell, exceeds this value. Default: 1e-8.
    pub divergence_warn_threshold: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_dim: 20,
            vortices: vec![Vortex::new(9.5, 9.5, 0.5, true)],
            step_count: 100,
            dt: 0.01,
            rho: 1.0,
            solver: SolverKind::Cholesky,
            cg_tolerance: 1e-12,
            cg_max_iterations: 0,
            check_finite: true,
            divergence_warn_threshold: 1e-8,
        }
    }
}

impl SimulationConfig {
    /// Start a builder seeded with [`Default`] values.
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder {
            config: Self::default(),
            vortices_set: false,
            pending: None,
        }
    }

    /// Validate all numeric invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. The extrapolation stencil needs two samples per axis.
        if self.grid_dim < 2 {
            return Err(ConfigError::GridTooSmall {
                configured: self.grid_dim,
            });
        }
        // 2. dt and rho appear as divisors in the projection.
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        if !self.rho.is_finite() || self.rho <= 0.0 {
            return Err(ConfigError::InvalidDensity { value: self.rho });
        }
        // 3. Vortices must be finite; a centre on a face is fine.
        for (index, v) in self.vortices.iter().enumerate() {
            if !v.center.0.is_finite() || !v.center.1.is_finite() || !v.speed.is_finite() {
                return Err(ConfigError::InvalidVortex { index });
            }
        }
        // 4. Solver knobs.
        if !self.cg_tolerance.is_finite() || self.cg_tolerance <= 0.0 {
            return Err(ConfigError::InvalidSolverParams {
                reason: format!(
                    "cg_tolerance must be finite and positive, got {}",
                    self.cg_tolerance
                ),
            });
        }
        if self.divergence_warn_threshold.is_nan() || self.divergence_warn_threshold < 0.0 {
            return Err(ConfigError::InvalidSolverParams {
                reason: format!(
                    "divergence_warn_threshold must be >= 0, got {}",
                    self.divergence_warn_threshold
                ),
            });
        }
        Ok(())
    }

    /// CG stopping criteria derived from this config.
    pub fn cg_params(&self) -> CgParams {
        CgParams {
            tolerance: self.cg_tolerance,
            max_iterations: self.cg_max_iterations,
        }
    }
}

// ── SimulationConfigBuilder ───────────────────────────────────────

/// Builder for [`SimulationConfig`].
///
/// String-named variants are parsed eagerly; the first unknown name is
/// reported by [`build()`](SimulationConfigBuilder::build).
///
/// # Examples
///
/// ```
/// use eddy_engine::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .grid_dim(8)
///     .vortex(3.5, 3.5, 1.0, true)
///     .solver_name("cg")
///     .build()
///     .unwrap();
/// assert_eq!(config.grid_dim, 8);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
    vortices_set: bool,
    pending: Option<ParseVariantError>,
}

impl SimulationConfigBuilder {
    /// Set the grid edge length.
    pub fn grid_dim(mut self, n: usize) -> Self {
        self.config.grid_dim = n;
        self
    }

    /// Add one vortex. The first call replaces the default vortex.
    pub fn vortex(mut self, x: f64, y: f64, speed: f64, clockwise: bool) -> Self {
        if !self.vortices_set {
            self.config.vortices.clear();
            self.vortices_set = true;
        }
        self.config.vortices.push(Vortex::new(x, y, speed, clockwise));
        self
    }

    /// Replace all vortices at once.
    pub fn vortices(mut self, vortices: Vec<Vortex>) -> Self {
        self.config.vortices = vortices;
        self.vortices_set = true;
        self
    }

    /// Set the number of steps after the initial projection.
    pub fn step_count(mut self, steps: usize) -> Self {
        self.config.step_count = steps;
        self
    }

    /// Set the time step. Must be finite and > 0.
    pub fn dt(mut self, dt: f64) -> Self {
        self.config.dt = dt;
        self
    }

    /// Set the density. Must be finite and > 0.
    pub fn rho(mut self, rho: f64) -> Self {
        self.config.rho = rho;
        self
    }

    /// Set the solver backend.
    pub fn solver(mut self, kind: SolverKind) -> Self {
        self.config.solver = kind;
        self
    }

    /// Set the solver backend by name, e.g. `"cholesky"` or `"cg"`.
    pub fn solver_name(mut self, name: &str) -> Self {
        match name.parse() {
            Ok(kind) => self.config.solver = kind,
            Err(e) => self.remember(e),
        }
        self
    }

    /// Set the CG relative residual target.
    pub fn cg_tolerance(mut self, tol: f64) -> Self {
        self.config.cg_tolerance = tol;
        self
    }

    /// Set the CG iteration budget.
    pub fn cg_max_iterations(mut self, iterations: usize) -> Self {
        self.config.cg_max_iterations = iterations;
        self
    }

    /// Enable or disable the per-stage NaN/infinity check.
    pub fn check_finite(mut self, on: bool) -> Self {
        self.config.check_finite = on;
        self
    }

    /// Set the post-projection divergence warning threshold.
    pub fn divergence_warn_threshold(mut self, threshold: f64) -> Self {
        self.config.divergence_warn_threshold = threshold;
        self
    }

    fn remember(&mut self, e: ParseVariantError) {
        if self.pending.is_none() {
            self.pending = Some(e);
        }
    }

    /// Build and validate the config.
    ///
    /// # Errors
    ///
    /// Returns the first unknown variant name, or any
    /// [`validate()`](SimulationConfig::validate) failure.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        if let Some(e) = self.pending {
            return Err(ConfigError::UnknownVariant(e));
        }
        self.config.validate()?;
        Ok(self.config)
    }
}
