//! Benchmark profiles for the Eddy flow solver.
//!
//! Provides pre-built [`SimulationConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 32x32 grid with a counter-rotating vortex pair
//! - [`stress_profile`]: 128x128 grid with a ring of vortices
//! - [`scattered_vortices`]: deterministic vortex placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use eddy_engine::SimulationConfig;
use eddy_flow::Vortex;

/// Reference benchmark profile: 32x32 grid, two vortices, 100 steps.
///
/// dt=0.01 keeps the back-traced distance well under one cell.
pub fn reference_profile() -> SimulationConfig {
    SimulationConfig {
        grid_dim: 32,
        vortices: vec![
            Vortex::new(11.5, 15.5, 0.5, true),
            Vortex::new(19.5, 15.5, 0.5, false),
        ],
        step_count: 100,
        dt: 0.01,
        ..Default::default()
    }
}

/// Stress profile: 128x128 grid with eight vortices on a ring.
pub fn stress_profile() -> SimulationConfig {
    let centre = 63.5;
    let vortices = (0..8)
        .map(|i| {
            let angle = std::f64::consts::TAU * f64::from(i) / 8.0;
            Vortex::new(
                centre + 32.0 * angle.cos(),
                centre + 32.0 * angle.sin(),
                1.0,
                i % 2 == 0,
            )
        })
        .collect();
    SimulationConfig {
        grid_dim: 128,
        vortices,
        step_count: 20,
        dt: 0.01,
        ..Default::default()
    }
}

/// Generate deterministic pseudo-random vortices.
///
/// Places `count` vortices inside an `n × n` grid using a splitmix-style
/// hash of the seed. Speeds fall in `[0.25, 1.25)`.
pub fn scattered_vortices(grid_dim: usize, count: usize, seed: u64) -> Vec<Vortex> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    };
    let extent = grid_dim.saturating_sub(1) as f64;
    (0..count)
        .map(|_| {
            let x = next() * extent;
            let y = next() * extent;
            let speed = 0.25 + next();
            Vortex::new(x, y, speed, next() < 0.5)
        })
        .collect()
}
