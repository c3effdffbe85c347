//! Semi-Lagrangian advection on the staggered grid.
//!
//! Every stored face is traced backwards through the current velocity
//! field for `dt`, and the component value at the departure point becomes
//! the face's new value. Departure points may land outside the grid; the
//! stencil then reads linearly extrapolated faces.

use eddy_core::{Component, GridError, Side};
use eddy_grid::StaggeredGrid;

/// Largest coordinate magnitude [`sample`] resolves to a stencil. Points
/// further out sample as NaN.
pub const MAX_SAMPLE_COORD: f64 = 1e15;

/// Advect `field` through itself for one time step.
///
/// Visits the `Left` and `Top` face of every cell, plus the `Right` face
/// of the last column and the `Bottom` face of the last row, so each
/// stored face is written exactly once. The input is not modified.
pub fn advect(field: &StaggeredGrid, dt: f64) -> Result<StaggeredGrid, GridError> {
    let n = field.grid_dim();
    let mut next = StaggeredGrid::new(n);
    for row in 0..n as isize {
        for col in 0..n as isize {
            let last_col = col == n as isize - 1;
            let last_row = row == n as isize - 1;
            for side in Side::ALL {
                let stored_here = match side {
                    Side::Left | Side::Top => true,
                    Side::Right => last_col,
                    Side::Bottom => last_row,
                };
                if !stored_here {
                    continue;
                }
                let (x, y) = trace_back(field, row, col, side, dt)?;
                let value = sample(field, side.component(), x, y)?;
                next.set(row, col, side, value)?;
            }
        }
    }
    Ok(next)
}

/// Departure point of the particle sitting on `side` of `(row, col)`.
fn trace_back(
    field: &StaggeredGrid,
    row: isize,
    col: isize,
    side: Side,
    dt: f64,
) -> Result<(f64, f64), GridError> {
    let (x, y) = field.coords(row, col, side);
    let own = field.get(row, col, side)?;
    let (u, v) = match side.component() {
        Component::U => (own, sample(field, Component::V, x, y)?),
        Component::V => (sample(field, Component::U, x, y)?, own),
    };
    Ok((x - dt * u, y - dt * v))
}

/// Bilinearly interpolate one velocity component at continuous `(x, y)`.
///
/// Non-finite points, and points beyond [`MAX_SAMPLE_COORD`] on either
/// axis, return `NaN` so the engine's finite check reports them.
///
/// The stencil is anchored at the cell nearest to the point
/// (`round_ties_even` on both axes). Its two faces that carry
/// `component` give the primary axis; the neighbouring cell across the
/// other axis, forward when the point lies strictly past the anchor and
/// backward otherwise, gives the secondary pair.
///
/// # Examples
///
/// ```
/// use eddy_core::Component;
/// use eddy_flow::advection::sample;
/// use eddy_grid::StaggeredGrid;
///
/// let u = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let v = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let grid = StaggeredGrid::from_components(2, u, v).unwrap();
/// assert_eq!(sample(&grid, Component::U, 0.25, 0.25).unwrap(), 2.5);
/// ```
pub fn sample(field: &StaggeredGrid, component: Component, x: f64, y: f64) -> Result<f64, GridError> {
    // Also rejects NaN: the comparison is false.
    if !(x.abs() <= MAX_SAMPLE_COORD && y.abs() <= MAX_SAMPLE_COORD) {
        return Ok(f64::NAN);
    }
    let row = y.round_ties_even() as isize;
    let col = x.round_ties_even() as isize;
    let (near, far) = component.sides();

    // Secondary cell sits across the axis the component does not run along.
    let (row2, col2) = match component {
        Component::U => (if y > row as f64 { row + 1 } else { row - 1 }, col),
        Component::V => (row, if x > col as f64 { col + 1 } else { col - 1 }),
    };

    let near1 = face_or_extrapolate(field, row, col, near)?;
    let far1 = face_or_extrapolate(field, row, col, far)?;
    let near2 = face_or_extrapolate(field, row2, col2, near)?;
    let far2 = face_or_extrapolate(field, row2, col2, far)?;

    let pos_near1 = field.coords(row, col, near);
    let pos_far1 = field.coords(row, col, far);
    let pos_near2 = field.coords(row2, col2, near);

    let (alpha, beta) = match component {
        Component::U => (
            (x - pos_near1.0) / (pos_far1.0 - pos_near1.0),
            (y - pos_near1.1) / (pos_near2.1 - pos_near1.1),
        ),
        Component::V => (
            (y - pos_near1.1) / (pos_far1.1 - pos_near1.1),
            (x - pos_near1.0) / (pos_near2.0 - pos_near1.0),
        ),
    };

    let first = near1 * (1.0 - alpha) + far1 * alpha;
    let second = near2 * (1.0 - alpha) + far2 * alpha;
    Ok(first * (1.0 - beta) + second * beta)
}

/// The stored value if the face is addressable, otherwise its
/// extrapolation.
pub fn face_or_extrapolate(field: &StaggeredGrid, row: isize, col: isize, side: Side) -> Result<f64, GridError> {
    if field.is_addressable(row, col, side) {
        field.get(row, col, side)
    } else {
        extrapolate(field, row, col, side)
    }
}

// ── Extrapolation ──────────────────────────────────────────────

/// Linearly extrapolate `side` of a cell that may lie outside the grid.
///
/// The cell is clamped to the nearest in-grid cell. When only one axis is
/// out of range, the trend of the two outermost faces along that axis is
/// continued. When both are, the horizontal and vertical estimates over
/// the combined step count are blended, each weighted by its own axis's
/// step count; linear fields are reproduced exactly.
pub fn extrapolate(field: &StaggeredGrid, row: isize, col: isize, side: Side) -> Result<f64, GridError> {
    let last = field.grid_dim() as isize - 1;
    let closest_row = row.clamp(0, last);
    let closest_col = col.clamp(0, last);
    let out_of_range = || GridError::FaceOutOfBounds {
        row,
        col,
        side,
        grid_dim: field.grid_dim(),
    };
    let h_steps = isize::try_from(col.abs_diff(closest_col)).map_err(|_| out_of_range())?;
    let v_steps = isize::try_from(row.abs_diff(closest_row)).map_err(|_| out_of_range())?;

    if row == closest_row {
        return extrapolate_horizontally(field, row, closest_col, side, h_steps);
    }
    if col == closest_col {
        return extrapolate_vertically(field, closest_row, col, side, v_steps);
    }

    let steps = h_steps.checked_add(v_steps).ok_or_else(out_of_range)?;
    let h = extrapolate_horizontally(field, closest_row, closest_col, side, steps)?;
    let v = extrapolate_vertically(field, closest_row, closest_col, side, steps)?;
    Ok((h_steps as f64 * h + v_steps as f64 * v) / steps as f64)
}

/// Continue the row trend from boundary column `edge_col` by `steps`
/// columns outward.
///
/// A `Right` face requested past the left edge is one step closer when
/// counted from the edge cell's `Left` face; likewise `Left` past the
/// right edge.
pub fn extrapolate_horizontally(
    field: &StaggeredGrid,
    row: isize,
    edge_col: isize,
    side: Side,
    steps: isize,
) -> Result<f64, GridError> {
    let last = field.grid_dim() as isize - 1;
    let (side, steps, inner_col) = if edge_col == 0 {
        match side {
            Side::Right => (Side::Left, steps - 1, 1),
            _ => (side, steps, 1),
        }
    } else if edge_col == last {
        match side {
            Side::Left => (Side::Right, steps - 1, last - 1),
            _ => (side, steps, last - 1),
        }
    } else {
        return Err(GridError::NotABoundary { row, col: edge_col });
    };
    let edge = field.get(row, edge_col, side)?;
    let inner = field.get(row, inner_col, side)?;
    Ok(edge + (edge - inner) * steps as f64)
}

/// Continue the column trend from boundary row `edge_row` by `steps`
/// rows outward.
///
/// A `Bottom` face requested past the top edge is one step closer when
/// counted from the edge cell's `Top` face; likewise `Top` past the
/// bottom edge.
pub fn extrapolate_vertically(
    field: &StaggeredGrid,
    edge_row: isize,
    col: isize,
    side: Side,
    steps: isize,
) -> Result<f64, GridError> {
    let last = field.grid_dim() as isize - 1;
    let (side, steps, inner_row) = if edge_row == 0 {
        match side {
            Side::Bottom => (Side::Top, steps - 1, 1),
            _ => (side, steps, 1),
        }
    } else if edge_row == last {
        match side {
            Side::Top => (Side::Bottom, steps - 1, last - 1),
            _ => (side, steps, last - 1),
        }
    } else {
        return Err(GridError::NotABoundary { row: edge_row, col });
    };
    let edge = field.get(edge_row, col, side)?;
    let inner = field.get(inner_row, col, side)?;
    Ok(edge + (edge - inner) * steps as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_test_utils::{random_grid, reference_grid};

    #[test]
    fn interpolate_u_on_reference_grid() {
        let s = reference_grid();
        let u = |x, y| sample(&s, Component::U, x, y).unwrap();
        assert_eq!(u(0.25, 0.25), 2.5);
        assert_eq!(u(0.75, 0.25), 3.0);
        assert_eq!(u(0.25, 0.75), 4.0);
        assert_eq!(u(0.75, 0.75), 4.5);
        assert_eq!(u(0.25, 1.25), 5.5);
        assert_eq!(u(1.75, 0.25), 4.0);
    }

    #[test]
    fn interpolate_v_on_reference_grid() {
        let s = reference_grid();
        let v = |x, y| sample(&s, Component::V, x, y).unwrap();
        assert_eq!(v(0.25, 0.25), 2.75);
        assert_eq!(v(0.75, 0.25), 3.25);
        assert_eq!(v(0.25, 0.75), 3.75);
        assert_eq!(v(0.75, 0.75), 4.25);
        assert_eq!(v(0.25, 1.75), 5.75);
        assert_eq!(v(1.25, 0.25), 3.75);
    }

    #[test]
    fn horizontal_extrapolation() {
        let s = reference_grid();
        let h = |row, col, side, steps| extrapolate_horizontally(&s, row, col, side, steps).unwrap();
        assert_eq!(h(0, 1, Side::Right, 1), 4.0);
        assert_eq!(h(0, 1, Side::Right, 2), 5.0);
        assert_eq!(h(0, 0, Side::Top, 1), 0.0);
        assert_eq!(h(0, 1, Side::Top, 1), 3.0);
        assert_eq!(h(0, 0, Side::Bottom, 1), 2.0);
        assert_eq!(h(0, 1, Side::Bottom, 1), 5.0);
        assert_eq!(h(0, 0, Side::Left, 1), 0.0);
    }

    #[test]
    fn vertical_extrapolation() {
        let s = reference_grid();
        let v = |row, col, side, steps| extrapolate_vertically(&s, row, col, side, steps).unwrap();
        assert_eq!(v(0, 0, Side::Top, 1), -1.0);
        assert_eq!(v(1, 0, Side::Bottom, 1), 7.0);
        assert_eq!(v(0, 0, Side::Right, 1), -1.0);
        assert_eq!(v(1, 0, Side::Right, 1), 8.0);
        assert_eq!(v(0, 0, Side::Left, 1), -2.0);
        assert_eq!(v(1, 0, Side::Left, 1), 7.0);
    }

    #[test]
    fn extrapolate_dispatches_by_axis() {
        let s = reference_grid();
        let e = |row, col, side| extrapolate(&s, row, col, side).unwrap();
        assert_eq!(e(0, -1, Side::Left), 0.0);
        assert_eq!(e(0, 2, Side::Right), 4.0);
        assert_eq!(e(-1, 0, Side::Top), -1.0);
        assert_eq!(e(2, 0, Side::Bottom), 7.0);
        assert_eq!(e(-1, -1, Side::Left), -3.0);
        assert_eq!(e(0, 0, Side::Left), 1.0);
    }

    #[test]
    fn interior_cell_is_not_a_boundary() {
        let s = StaggeredGrid::new(4);
        assert_eq!(
            extrapolate_horizontally(&s, 1, 2, Side::Left, 1),
            Err(GridError::NotABoundary { row: 1, col: 2 })
        );
        assert_eq!(
            extrapolate_vertically(&s, 1, 2, Side::Top, 1),
            Err(GridError::NotABoundary { row: 1, col: 2 })
        );
    }

    fn table(side: Side, rows: isize, cols: isize) -> Vec<Vec<f64>> {
        let s = reference_grid();
        (0..rows)
            .map(|i| {
                (0..cols)
                    .map(|j| extrapolate(&s, i - 2, j - 2, side).unwrap())
                    .collect()
            })
            .collect()
    }

    fn ramp(start: f64, row_step: f64, rows: usize, cols: usize) -> Vec<Vec<f64>> {
        (0..rows)
            .map(|i| {
                (0..cols)
                    .map(|j| start + row_step * i as f64 + j as f64)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn u_faces_extrapolate_onto_bigger_grid() {
        assert_eq!(table(Side::Left, 6, 7), ramp(-7.0, 3.0, 6, 7));
        assert_eq!(table(Side::Right, 6, 7), ramp(-6.0, 3.0, 6, 7));
    }

    #[test]
    fn v_faces_extrapolate_onto_bigger_grid() {
        assert_eq!(table(Side::Top, 7, 6), ramp(-5.0, 2.0, 7, 6));
        assert_eq!(table(Side::Bottom, 7, 6), ramp(-3.0, 2.0, 7, 6));
    }

    #[test]
    fn zero_dt_is_identity() {
        let s = reference_grid();
        assert_eq!(advect(&s, 0.0).unwrap(), s);
    }

    #[test]
    fn uniform_flow_is_preserved() {
        let n = 5;
        let u = vec![0.7; n * (n + 1)];
        let v = vec![-0.3; n * (n + 1)];
        let s = StaggeredGrid::from_components(n, u, v).unwrap();
        let next = advect(&s, 0.4).unwrap();
        for (a, b) in next.u().iter().zip(s.u()) {
            assert!((a - b).abs() < 1e-12);
        }
        for (a, b) in next.v().iter().zip(s.v()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn advect_does_not_modify_input() {
        let s = reference_grid();
        let before = s.clone();
        let _ = advect(&s, 0.5).unwrap();
        assert_eq!(s, before);
    }

    #[test]
    fn non_finite_position_samples_nan() {
        let s = reference_grid();
        assert!(sample(&s, Component::U, f64::INFINITY, 0.0).unwrap().is_nan());
        assert!(sample(&s, Component::V, 0.5, f64::NAN).unwrap().is_nan());
    }

    #[test]
    fn far_away_position_samples_nan() {
        let s = random_grid(4, 1);
        assert!(sample(&s, Component::U, -1e20, 1.0).unwrap().is_nan());
        assert!(sample(&s, Component::V, 1.0, 1e20).unwrap().is_nan());
        assert!(!sample(&s, Component::U, 1e3, 1.0).unwrap().is_nan());
    }

    #[test]
    fn extreme_indices_are_out_of_bounds() {
        let s = reference_grid();
        assert!(matches!(
            extrapolate(&s, 0, isize::MIN, Side::Left),
            Err(GridError::FaceOutOfBounds { .. })
        ));
        assert!(matches!(
            extrapolate(&s, isize::MAX, isize::MAX, Side::Top),
            Err(GridError::FaceOutOfBounds { .. })
        ));
    }
}
