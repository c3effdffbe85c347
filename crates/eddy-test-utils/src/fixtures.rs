//! Reusable staggered-grid fixtures.
//!
//! - [`reference_grid`]: the 2×2 grid with `u = [[1,2,3],[4,5,6]]`,
//!   `v = [[1,2],[3,4],[5,6]]` used throughout the sampling tests.
//! - [`linear_grid`]: faces carry an affine function of position.
//! - [`random_grid`]: uniform noise from a seeded ChaCha8 stream.

use eddy_grid::StaggeredGrid;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// The 2×2 reference grid.
pub fn reference_grid() -> StaggeredGrid {
    StaggeredGrid::from_components(
        2,
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    )
    .expect("reference grid shape is fixed")
}

/// An `n × n` grid whose `u` faces hold `a + bx·x + by·y` and whose `v`
/// faces hold `c + cx·x + cy·y`, evaluated at each face's position.
pub fn linear_grid(n: usize, u: [f64; 3], v: [f64; 3]) -> StaggeredGrid {
    let mut us = Vec::with_capacity(n * (n + 1));
    for row in 0..n {
        for col in 0..=n {
            let (x, y) = (col as f64 - 0.5, row as f64);
            us.push(u[0] + u[1] * x + u[2] * y);
        }
    }
    let mut vs = Vec::with_capacity((n + 1) * n);
    for row in 0..=n {
        for col in 0..n {
            let (x, y) = (col as f64, row as f64 - 0.5);
            vs.push(v[0] + v[1] * x + v[2] * y);
        }
    }
    StaggeredGrid::from_components(n, us, vs).expect("linear grid shape is fixed")
}

/// An `n × n` grid with every face drawn uniformly from `[-1, 1)`.
///
/// The same `(n, seed)` always yields the same grid.
pub fn random_grid(n: usize, seed: u64) -> StaggeredGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let len = n * (n + 1);
    let u = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
    let v = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
    StaggeredGrid::from_components(n, u, v).expect("random grid shape is fixed")
}
