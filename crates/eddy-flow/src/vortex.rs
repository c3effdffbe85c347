//! Analytic point-vortex initial conditions.

use eddy_core::{Component, GridError, Side};
use eddy_grid::StaggeredGrid;

/// Distance below which a face is treated as sitting on a vortex centre.
pub const CORE_RADIUS: f64 = 1e-12;

/// A point vortex seeded into the initial velocity field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vortex {
    /// Centre as continuous `(x, y)`; cell `(row, col)` is centered at
    /// `(col, row)`.
    pub center: (f64, f64),
    /// Strength. Velocity at offset `r` is `(−r_y, r_x) · speed / |r|²`,
    /// so its magnitude falls off as `speed / |r|`.
    pub speed: f64,
    /// Rotation sense; `false` flips the velocity.
    pub clockwise: bool,
}

impl Vortex {
    /// A vortex at `(x, y)`.
    pub fn new(x: f64, y: f64, speed: f64, clockwise: bool) -> Self {
        Self {
            center: (x, y),
            speed,
            clockwise,
        }
    }

    /// Velocity induced at continuous position `(x, y)`.
    ///
    /// Zero within [`CORE_RADIUS`] of the centre.
    pub fn velocity_at(&self, x: f64, y: f64) -> [f64; 2] {
        let (rx, ry) = (x - self.center.0, y - self.center.1);
        let r2 = rx * rx + ry * ry;
        if r2.sqrt() < CORE_RADIUS {
            return [0.0, 0.0];
        }
        let sign = if self.clockwise { 1.0 } else { -1.0 };
        let scale = sign * self.speed / r2;
        [-ry * scale, rx * scale]
    }
}

/// Sum the velocity of every vortex onto every stored face of an
/// `n × n` grid, each face taking its own component.
///
/// # Examples
///
/// ```
/// use eddy_flow::vortex::{seed, Vortex};
///
/// let grid = seed(4, &[Vortex::new(1.5, 1.5, 1.0, true)]).unwrap();
/// assert_eq!(grid.grid_dim(), 4);
/// assert!(grid.max_abs() > 0.0);
/// ```
pub fn seed(grid_dim: usize, vortices: &[Vortex]) -> Result<StaggeredGrid, GridError> {
    let mut grid = StaggeredGrid::new(grid_dim);
    let n = grid_dim as isize;
    for row in 0..n {
        for col in 0..n {
            for side in Side::ALL {
                let stored_here = match side {
                    Side::Left | Side::Top => true,
                    Side::Right => col == n - 1,
                    Side::Bottom => row == n - 1,
                };
                if !stored_here {
                    continue;
                }
                let (x, y) = grid.coords(row, col, side);
                let component = match side.component() {
                    Component::U => 0,
                    Component::V => 1,
                };
                let value: f64 = vortices
                    .iter()
                    .map(|v| v.velocity_at(x, y)[component])
                    .sum();
                grid.set(row, col, side, value)?;
            }
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_is_tangential() {
        let v = Vortex::new(0.0, 0.0, 2.0, true);
        let [u, w] = v.velocity_at(3.0, 4.0);
        assert!((u * 3.0 + w * 4.0).abs() < 1e-15);
        assert!((u - -0.32).abs() < 1e-15);
        assert!((w - 0.24).abs() < 1e-15);
    }

    #[test]
    fn counter_clockwise_flips_sign() {
        let cw = Vortex::new(1.0, 1.0, 1.0, true).velocity_at(2.0, 3.0);
        let ccw = Vortex::new(1.0, 1.0, 1.0, false).velocity_at(2.0, 3.0);
        assert_eq!(cw, [-ccw[0], -ccw[1]]);
    }

    #[test]
    fn centre_contributes_nothing() {
        let v = Vortex::new(1.5, 2.0, 5.0, true);
        assert_eq!(v.velocity_at(1.5, 2.0), [0.0, 0.0]);
    }

    #[test]
    fn seeding_samples_face_positions() {
        let vortex = Vortex::new(1.0, 1.0, 1.0, true);
        let grid = seed(3, &[vortex]).unwrap();
        // Right face of (1, 1) sits at (1.5, 1.0): r = (0.5, 0).
        assert_eq!(grid.right(1, 1).unwrap(), vortex.velocity_at(1.5, 1.0)[0]);
        // Bottom face of (2, 0) sits at (0.0, 2.5).
        assert_eq!(grid.bottom(2, 0).unwrap(), vortex.velocity_at(0.0, 2.5)[1]);
    }

    #[test]
    fn vortices_superpose() {
        let a = Vortex::new(0.5, 0.5, 1.0, true);
        let b = Vortex::new(2.0, 1.0, 0.5, false);
        let both = seed(4, &[a, b]).unwrap();
        let sa = seed(4, &[a]).unwrap();
        let sb = seed(4, &[b]).unwrap();
        for ((x, y), z) in both.u().iter().zip(sa.u()).zip(sb.u()) {
            assert_eq!(*x, y + z);
        }
    }

    #[test]
    fn no_vortices_gives_still_field() {
        assert_eq!(seed(3, &[]).unwrap(), StaggeredGrid::new(3));
    }
}
