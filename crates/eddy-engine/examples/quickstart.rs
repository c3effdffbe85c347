//! Eddy Quickstart: a single vortex in a closed box.
//!
//! Demonstrates:
//!   1. Building a SimulationConfig with the builder
//!   2. Stepping a Simulation and reading per-step metrics
//!   3. Running to the end and hashing the trajectory
//!
//! Run with:
//!   RUST_LOG=info cargo run --example quickstart

use eddy_engine::{trajectory_hash, Simulation, SimulationConfig};

// ─── Parameters ─────────────────────────────────────────────────

const GRID_DIM: usize = 20;
const STEPS: usize = 50;
const DT: f64 = 0.01;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SimulationConfig::builder()
        .grid_dim(GRID_DIM)
        .vortex(9.5, 9.5, 0.5, true)
        .step_count(STEPS)
        .dt(DT)
        .rho(1.0)
        .build()?;

    let mut sim = Simulation::new(config)?;
    println!("initial pressure range: {:.4e}", sim.pressure().max_abs());

    // A few manual steps to show the per-step outcome.
    for _ in 0..3 {
        let outcome = sim.step()?;
        println!(
            "step {:>3}: {:>6}us  divergence {:.2e} -> {:.2e}",
            outcome.step,
            outcome.metrics.total_us,
            outcome.metrics.max_divergence_before,
            outcome.metrics.max_divergence_after,
        );
    }

    let (trajectory, report) = sim.run_to_end()?;
    let last = trajectory.last().ok_or("empty trajectory")?;
    let centre = last.velocity.get(GRID_DIM / 2, GRID_DIM / 2);
    println!("frames recorded:   {}", trajectory.len());
    println!("setup:             {}us", report.setup_us);
    println!("mean step:         {}us", report.mean_step_us());
    println!("worst divergence:  {:.2e}", report.worst_divergence());
    println!("centre velocity:   ({:.4}, {:.4})", centre[0], centre[1]);
    println!("trajectory hash:   {:#018x}", trajectory_hash(&trajectory));
    Ok(())
}
