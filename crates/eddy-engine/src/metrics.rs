//! Per-step performance and accuracy metrics.
//!
//! [`StepMetrics`] captures timing and divergence for a single step;
//! [`RunReport`] accumulates them over a run.

/// Timing and divergence metrics collected during a single step.
///
/// All durations are in microseconds. Divergence figures are the largest
/// absolute cell divergence over cells that touch no grid edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent in advection, in microseconds.
    pub advect_us: u64,
    /// Time spent in projection (including the pressure solve), in microseconds.
    pub project_us: u64,
    /// Interior divergence of the advected field, before projection.
    pub max_divergence_before: f64,
    /// Interior divergence after projection.
    pub max_divergence_after: f64,
}

/// Metrics for a whole run: setup plus every step in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    /// Time spent validating, assembling and factorizing, seeding, and
    /// running the initial projection, in microseconds.
    pub setup_us: u64,
    /// Metrics of each step, in step order.
    pub steps: Vec<StepMetrics>,
}

impl RunReport {
    /// Sum of step wall-clock times, excluding setup.
    pub fn stepping_us(&self) -> u64 {
        self.steps.iter().map(|m| m.total_us).sum()
    }

    /// Mean step time, or `0` for a run with no steps.
    pub fn mean_step_us(&self) -> u64 {
        if self.steps.is_empty() {
            0
        } else {
            self.stepping_us() / self.steps.len() as u64
        }
    }

    /// Worst post-projection divergence over all steps.
    pub fn worst_divergence(&self) -> f64 {
        self.steps
            .iter()
            .fold(0.0, |m, s| m.max(s.max_divergence_after))
    }
}
