//! Dense cell-centered fields.
//!
//! Both types store `grid_dim × grid_dim` cells in row-major order. They
//! are the exported form of a simulation frame: pressure is natively
//! cell-centered, velocity is averaged from faces on export.

use crate::error::GridError;

/// A dense `n × n` scalar field, one value per cell center.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    grid_dim: usize,
    data: Vec<f64>,
}

impl ScalarField {
    /// A zero-filled field of `grid_dim × grid_dim` cells.
    pub fn zeros(grid_dim: usize) -> Self {
        Self {
            grid_dim,
            data: vec![0.0; grid_dim * grid_dim],
        }
    }

    /// Wrap a row-major buffer of exactly `grid_dim²` values.
    pub fn from_vec(grid_dim: usize, data: Vec<f64>) -> Result<Self, GridError> {
        if data.len() != grid_dim * grid_dim {
            return Err(GridError::ShapeMismatch {
                what: "scalar field",
                expected: grid_dim * grid_dim,
                got: data.len(),
            });
        }
        Ok(Self { grid_dim, data })
    }

    /// Edge length of the field.
    pub fn grid_dim(&self) -> usize {
        self.grid_dim
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below `grid_dim`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.grid_dim + col]
    }

    /// Overwrite the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below `grid_dim`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.grid_dim + col] = value;
    }

    /// Row-major view of all values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume the field, returning the row-major buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Largest absolute value, or `0.0` for an empty field.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |m, v| m.max(v.abs()))
    }

    /// `true` when no value is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

/// A dense `n × n` field of 2-component `[u, v]` vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorField {
    grid_dim: usize,
    data: Vec<[f64; 2]>,
}

impl VectorField {
    /// A zero-filled field of `grid_dim × grid_dim` cells.
    pub fn zeros(grid_dim: usize) -> Self {
        Self {
            grid_dim,
            data: vec![[0.0; 2]; grid_dim * grid_dim],
        }
    }

    /// Wrap a row-major buffer of exactly `grid_dim²` vectors.
    pub fn from_vec(grid_dim: usize, data: Vec<[f64; 2]>) -> Result<Self, GridError> {
        if data.len() != grid_dim * grid_dim {
            return Err(GridError::ShapeMismatch {
                what: "vector field",
                expected: grid_dim * grid_dim,
                got: data.len(),
            });
        }
        Ok(Self { grid_dim, data })
    }

    /// Build a field by evaluating `f(row, col)` for every cell.
    pub fn from_fn(grid_dim: usize, mut f: impl FnMut(usize, usize) -> [f64; 2]) -> Self {
        let mut data = Vec::with_capacity(grid_dim * grid_dim);
        for row in 0..grid_dim {
            for col in 0..grid_dim {
                data.push(f(row, col));
            }
        }
        Self { grid_dim, data }
    }

    /// Edge length of the field.
    pub fn grid_dim(&self) -> usize {
        self.grid_dim
    }

    /// Vector at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below `grid_dim`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> [f64; 2] {
        self.data[row * self.grid_dim + col]
    }

    /// Overwrite the vector at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below `grid_dim`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: [f64; 2]) {
        self.data[row * self.grid_dim + col] = value;
    }

    /// Row-major view of all vectors.
    pub fn as_slice(&self) -> &[[f64; 2]] {
        &self.data
    }

    /// `true` when no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|v| v.is_finite())
    }
}
