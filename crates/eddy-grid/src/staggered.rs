//! The staggered (MAC) velocity grid.

use eddy_core::{Component, GridError, Side, VectorField};

/// Face-centered velocity storage for an `n × n` cell grid.
///
/// `u` holds `n × (n+1)` horizontal components on vertical faces and `v`
/// holds `(n+1) × n` vertical components on horizontal faces, both
/// row-major. Neighbouring cells share face storage: the `Right` face of
/// `(r, c)` is the `Left` face of `(r, c+1)`.
///
/// # Ghost addressing
///
/// Row and column indices may step one cell outside the grid, but only
/// towards the one face that is really stored there: row `-1` only with
/// [`Side::Bottom`], row `n` only with [`Side::Top`], column `-1` only
/// with [`Side::Right`], column `n` only with [`Side::Left`].
///
/// # Examples
///
/// ```
/// use eddy_core::Side;
/// use eddy_grid::StaggeredGrid;
///
/// let mut grid = StaggeredGrid::new(3);
/// grid.set_right(1, 0, 2.5).unwrap();
/// assert_eq!(grid.left(1, 1).unwrap(), 2.5);
/// // Row -1 may only address the face it shares with row 0.
/// assert_eq!(grid.get(-1, 2, Side::Bottom), grid.top(0, 2));
/// assert!(grid.get(-1, 2, Side::Top).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StaggeredGrid {
    grid_dim: usize,
    u: Vec<f64>,
    v: Vec<f64>,
}

impl StaggeredGrid {
    /// A zero velocity field on `grid_dim × grid_dim` cells.
    pub fn new(grid_dim: usize) -> Self {
        Self {
            grid_dim,
            u: vec![0.0; grid_dim * (grid_dim + 1)],
            v: vec![0.0; (grid_dim + 1) * grid_dim],
        }
    }

    /// Build a grid from row-major component buffers.
    ///
    /// `u` must have `n × (n+1)` elements and `v` must have `(n+1) × n`.
    pub fn from_components(grid_dim: usize, u: Vec<f64>, v: Vec<f64>) -> Result<Self, GridError> {
        if grid_dim == 0 {
            return Err(GridError::EmptyGrid);
        }
        let expected = grid_dim * (grid_dim + 1);
        if u.len() != expected {
            return Err(GridError::ShapeMismatch {
                what: "u component",
                expected,
                got: u.len(),
            });
        }
        if v.len() != expected {
            return Err(GridError::ShapeMismatch {
                what: "v component",
                expected,
                got: v.len(),
            });
        }
        Ok(Self { grid_dim, u, v })
    }

    /// Edge length in cells.
    pub fn grid_dim(&self) -> usize {
        self.grid_dim
    }

    /// Row-major `n × (n+1)` horizontal components.
    pub fn u(&self) -> &[f64] {
        &self.u
    }

    /// Row-major `(n+1) × n` vertical components.
    pub fn v(&self) -> &[f64] {
        &self.v
    }

    /// Whether `(row, col, side)` names a stored face under the ghost rule.
    pub fn is_addressable(&self, row: isize, col: isize, side: Side) -> bool {
        let n = self.grid_dim as isize;
        if row < -1 || row > n || col < -1 || col > n {
            return false;
        }
        if row == -1 && side != Side::Bottom {
            return false;
        }
        if row == n && side != Side::Top {
            return false;
        }
        if col == -1 && side != Side::Right {
            return false;
        }
        if col == n && side != Side::Left {
            return false;
        }
        true
    }

    /// Check `(row, col, side)` against the ghost rule.
    pub fn check_face(&self, row: isize, col: isize, side: Side) -> Result<(), GridError> {
        if self.is_addressable(row, col, side) {
            Ok(())
        } else {
            Err(GridError::FaceOutOfBounds {
                row,
                col,
                side,
                grid_dim: self.grid_dim,
            })
        }
    }

    /// Flat index into `u` or `v` for an addressable face.
    #[inline]
    fn slot(&self, row: isize, col: isize, side: Side) -> (Component, usize) {
        let n = self.grid_dim;
        match side {
            Side::Top => (Component::V, row as usize * n + col as usize),
            Side::Bottom => (Component::V, (row + 1) as usize * n + col as usize),
            Side::Left => (Component::U, row as usize * (n + 1) + col as usize),
            Side::Right => (Component::U, row as usize * (n + 1) + (col + 1) as usize),
        }
    }

    /// Value on `side` of cell `(row, col)`.
    pub fn get(&self, row: isize, col: isize, side: Side) -> Result<f64, GridError> {
        self.check_face(row, col, side)?;
        Ok(match self.slot(row, col, side) {
            (Component::U, i) => self.u[i],
            (Component::V, i) => self.v[i],
        })
    }

    /// Overwrite the value on `side` of cell `(row, col)`.
    pub fn set(&mut self, row: isize, col: isize, side: Side, value: f64) -> Result<(), GridError> {
        self.check_face(row, col, side)?;
        match self.slot(row, col, side) {
            (Component::U, i) => self.u[i] = value,
            (Component::V, i) => self.v[i] = value,
        }
        Ok(())
    }

    /// Vertical velocity on the top face of `(row, col)`.
    pub fn top(&self, row: isize, col: isize) -> Result<f64, GridError> {
        self.get(row, col, Side::Top)
    }

    /// Horizontal velocity on the right face of `(row, col)`.
    pub fn right(&self, row: isize, col: isize) -> Result<f64, GridError> {
        self.get(row, col, Side::Right)
    }

    /// Vertical velocity on the bottom face of `(row, col)`.
    pub fn bottom(&self, row: isize, col: isize) -> Result<f64, GridError> {
        self.get(row, col, Side::Bottom)
    }

    /// Horizontal velocity on the left face of `(row, col)`.
    pub fn left(&self, row: isize, col: isize) -> Result<f64, GridError> {
        self.get(row, col, Side::Left)
    }

    /// Set the top face of `(row, col)`.
    pub fn set_top(&mut self, row: isize, col: isize, value: f64) -> Result<(), GridError> {
        self.set(row, col, Side::Top, value)
    }

    /// Set the right face of `(row, col)`.
    pub fn set_right(&mut self, row: isize, col: isize, value: f64) -> Result<(), GridError> {
        self.set(row, col, Side::Right, value)
    }

    /// Set the bottom face of `(row, col)`.
    pub fn set_bottom(&mut self, row: isize, col: isize, value: f64) -> Result<(), GridError> {
        self.set(row, col, Side::Bottom, value)
    }

    /// Set the left face of `(row, col)`.
    pub fn set_left(&mut self, row: isize, col: isize, value: f64) -> Result<(), GridError> {
        self.set(row, col, Side::Left, value)
    }

    /// All four faces of an in-grid cell as `[top, right, bottom, left]`.
    pub fn cell_faces(&self, row: usize, col: usize) -> Result<[f64; 4], GridError> {
        let (r, c) = (row as isize, col as isize);
        Ok([
            self.top(r, c)?,
            self.right(r, c)?,
            self.bottom(r, c)?,
            self.left(r, c)?,
        ])
    }

    /// Continuous `(x, y)` position of a face center.
    ///
    /// Cell `(row, col)` is centered at `(col, row)`. No bounds check:
    /// ghost and far-outside positions are valid continuous coordinates.
    pub fn coords(&self, row: isize, col: isize, side: Side) -> (f64, f64) {
        let (x, y) = (col as f64, row as f64);
        match side {
            Side::Top => (x, y - 0.5),
            Side::Right => (x + 0.5, y),
            Side::Bottom => (x, y + 0.5),
            Side::Left => (x - 0.5, y),
        }
    }

    /// Average opposing faces into a cell-centered `[u, v]` field.
    pub fn to_regular_grid(&self) -> VectorField {
        let n = self.grid_dim;
        VectorField::from_fn(n, |row, col| {
            let u_left = self.u[row * (n + 1) + col];
            let u_right = self.u[row * (n + 1) + col + 1];
            let v_top = self.v[row * n + col];
            let v_bottom = self.v[(row + 1) * n + col];
            [(u_left + u_right) / 2.0, (v_top + v_bottom) / 2.0]
        })
    }

    /// Average adjacent cell values onto their shared interior face.
    ///
    /// Faces on the grid edge have only one neighbouring cell and are left
    /// at zero.
    pub fn from_regular_grid(field: &VectorField) -> Result<Self, GridError> {
        let n = field.grid_dim();
        if n == 0 {
            return Err(GridError::EmptyGrid);
        }
        let mut grid = Self::new(n);
        for row in 0..n {
            for col in 0..n {
                let here = field.get(row, col);
                if col + 1 < n {
                    grid.u[row * (n + 1) + col + 1] = (here[0] + field.get(row, col + 1)[0]) / 2.0;
                }
                if row + 1 < n {
                    grid.v[(row + 1) * n + col] = (here[1] + field.get(row + 1, col)[1]) / 2.0;
                }
            }
        }
        Ok(grid)
    }

    /// Net outflow of cell `(row, col)`: `(right − left) + (bottom − top)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below `grid_dim`.
    #[inline]
    pub fn divergence_at(&self, row: usize, col: usize) -> f64 {
        let n = self.grid_dim;
        let du = self.u[row * (n + 1) + col + 1] - self.u[row * (n + 1) + col];
        let dv = self.v[(row + 1) * n + col] - self.v[row * n + col];
        du + dv
    }

    /// Largest absolute face value.
    pub fn max_abs(&self) -> f64 {
        self.u
            .iter()
            .chain(&self.v)
            .fold(0.0, |m, v| m.max(v.abs()))
    }

    /// `true` when no face value is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.u.iter().chain(&self.v).all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular_2x2() -> VectorField {
        VectorField::from_vec(2, vec![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]]).unwrap()
    }

    #[test]
    fn from_regular_grid_averages_interior_faces() {
        let s = StaggeredGrid::from_regular_grid(&regular_2x2()).unwrap();
        assert_eq!(s.cell_faces(0, 0).unwrap(), [0.0, 1.5, 2.0, 0.0]);
        assert_eq!(s.cell_faces(0, 1).unwrap(), [0.0, 0.0, 3.0, 1.5]);
        assert_eq!(s.cell_faces(1, 0).unwrap(), [2.0, 3.5, 0.0, 0.0]);
        assert_eq!(s.cell_faces(1, 1).unwrap(), [3.0, 0.0, 0.0, 3.5]);
    }

    #[test]
    fn to_regular_grid_averages_opposing_faces() {
        let s = StaggeredGrid::from_regular_grid(&regular_2x2()).unwrap();
        let r = s.to_regular_grid();
        assert_eq!(r.get(0, 0), [0.75, 1.0]);
        assert_eq!(r.get(0, 1), [0.75, 1.5]);
        assert_eq!(r.get(1, 0), [1.75, 1.0]);
        assert_eq!(r.get(1, 1), [1.75, 1.5]);
    }

    #[test]
    fn ghost_rule_rejects_wrong_sides() {
        let s = StaggeredGrid::new(1);
        assert!(!s.is_addressable(-2, 0, Side::Bottom));
        assert!(!s.is_addressable(0, -2, Side::Right));
        assert!(!s.is_addressable(2, 0, Side::Top));
        assert!(!s.is_addressable(0, 2, Side::Left));
        assert!(!s.is_addressable(-1, 0, Side::Top));
        assert!(!s.is_addressable(0, -1, Side::Left));
        assert!(!s.is_addressable(1, 0, Side::Bottom));
        assert!(!s.is_addressable(0, 1, Side::Right));
        assert!(!s.is_addressable(1, 1, Side::Top));
    }

    #[test]
    fn ghost_rule_accepts_real_faces() {
        let s = StaggeredGrid::new(1);
        for side in Side::ALL {
            assert!(s.is_addressable(0, 0, side));
        }
        assert!(s.is_addressable(1, 0, Side::Top));
        assert!(s.is_addressable(0, 1, Side::Left));
        assert!(s.is_addressable(0, -1, Side::Right));
        assert!(s.is_addressable(-1, 0, Side::Bottom));
    }

    #[test]
    fn out_of_rule_access_is_an_error() {
        let mut s = StaggeredGrid::new(2);
        assert_eq!(
            s.top(-1, 0),
            Err(GridError::FaceOutOfBounds {
                row: -1,
                col: 0,
                side: Side::Top,
                grid_dim: 2
            })
        );
        assert!(s.set_left(0, 2, 1.0).is_ok());
        assert!(s.set_right(0, 2, 1.0).is_err());
    }

    #[test]
    fn adjacent_cells_alias_storage() {
        let mut s = StaggeredGrid::new(3);
        s.set_bottom(0, 1, 7.0).unwrap();
        assert_eq!(s.top(1, 1).unwrap(), 7.0);
        s.set_left(2, 2, -3.0).unwrap();
        assert_eq!(s.right(2, 1).unwrap(), -3.0);
        // Ghost addresses reach the same storage.
        assert_eq!(s.get(3, 1, Side::Top), s.bottom(2, 1));
        assert_eq!(s.get(1, -1, Side::Right), s.left(1, 0));
    }

    #[test]
    fn face_coordinates() {
        let s = StaggeredGrid::new(4);
        assert_eq!(s.coords(2, 1, Side::Top), (1.0, 1.5));
        assert_eq!(s.coords(2, 1, Side::Right), (1.5, 2.0));
        assert_eq!(s.coords(2, 1, Side::Bottom), (1.0, 2.5));
        assert_eq!(s.coords(2, 1, Side::Left), (0.5, 2.0));
        assert_eq!(s.coords(-1, -1, Side::Left), (-1.5, -1.0));
    }

    #[test]
    fn from_components_validates_shapes() {
        assert_eq!(
            StaggeredGrid::from_components(0, vec![], vec![]),
            Err(GridError::EmptyGrid)
        );
        let err = StaggeredGrid::from_components(2, vec![0.0; 6], vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                what: "v component",
                expected: 6,
                got: 5
            }
        );
        let s = StaggeredGrid::from_components(
            2,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap();
        assert_eq!(s.right(1, 1).unwrap(), 6.0);
        assert_eq!(s.bottom(1, 1).unwrap(), 6.0);
        assert_eq!(s.max_abs(), 6.0);
    }

    #[test]
    fn non_finite_detection() {
        let mut s = StaggeredGrid::new(2);
        assert!(s.is_finite());
        s.set_top(1, 1, f64::INFINITY).unwrap();
        assert!(!s.is_finite());
    }

    #[test]
    fn divergence_is_net_outflow() {
        let u = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let grid = StaggeredGrid::from_components(2, u, v).unwrap();
        // (right - left) + (bottom - top) = (2 - 1) + (3 - 1)
        assert_eq!(grid.divergence_at(0, 0), 3.0);
        assert_eq!(grid.divergence_at(1, 1), (6.0 - 5.0) + (6.0 - 4.0));
    }
}
