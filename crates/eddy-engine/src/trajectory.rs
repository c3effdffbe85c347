//! Recorded simulation output.

use std::ops::Index;

use eddy_core::{ScalarField, VectorField};
use eddy_grid::StaggeredGrid;

/// One exported state: cell-centered velocity and pressure.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Velocity averaged from faces to cell centers.
    pub velocity: VectorField,
    /// Pressure from the projection that produced this state. Only
    /// spatial differences are meaningful.
    pub pressure: ScalarField,
}

impl Frame {
    /// Export a staggered field and its pressure.
    pub fn capture(field: &StaggeredGrid, pressure: &ScalarField) -> Self {
        Self {
            velocity: field.to_regular_grid(),
            pressure: pressure.clone(),
        }
    }

    /// Edge length of the frame's grid.
    pub fn grid_dim(&self) -> usize {
        self.velocity.grid_dim()
    }
}

/// Ordered frames of a run. Frame `0` is the seeded and projected
/// initial state; frame `i` is the state after `i` steps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    frames: Vec<Frame>,
}

impl Trajectory {
    /// An empty trajectory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty trajectory with room for `capacity` frames.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if no frame has been recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame `i`, if recorded.
    pub fn get(&self, i: usize) -> Option<&Frame> {
        self.frames.get(i)
    }

    /// The most recent frame.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Iterate frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Consume the trajectory, returning its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl Index<usize> for Trajectory {
    type Output = Frame;

    fn index(&self, i: usize) -> &Frame {
        &self.frames[i]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
