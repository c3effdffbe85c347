//! Hashing utilities for trajectory comparison.
//!
//! Uses FNV-1a over the bit patterns of every value, so two frames hash
//! equal only if they are bit-identical. Not cryptographically secure;
//! used for fast determinism checks.

use crate::trajectory::{Frame, Trajectory};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Feed a u64 (as 8 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

fn fold_frame(mut hash: u64, frame: &Frame) -> u64 {
    hash = fnv1a_u64(hash, frame.grid_dim() as u64);
    for [u, v] in frame.velocity.as_slice() {
        hash = fnv1a_u64(hash, u.to_bits());
        hash = fnv1a_u64(hash, v.to_bits());
    }
    for p in frame.pressure.as_slice() {
        hash = fnv1a_u64(hash, p.to_bits());
    }
    hash
}

/// Hash one frame's velocity and pressure.
pub fn frame_hash(frame: &Frame) -> u64 {
    fold_frame(FNV_OFFSET, frame)
}

/// Hash a whole trajectory. The frame index is folded in at each frame
/// boundary so frame order matters.
///
/// Returns `FNV_OFFSET` for an empty trajectory.
pub fn trajectory_hash(trajectory: &Trajectory) -> u64 {
    let mut hash = FNV_OFFSET;
    for (i, frame) in trajectory.iter().enumerate() {
        hash = fnv1a_u64(hash, i as u64);
        hash = fold_frame(hash, frame);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_core::ScalarField;
    use eddy_grid::StaggeredGrid;

    fn frame(p00: f64) -> Frame {
        let mut p = ScalarField::zeros(2);
        p.set(0, 0, p00);
        Frame::capture(&StaggeredGrid::new(2), &p)
    }

    #[test]
    fn empty_trajectory_hashes_to_offset() {
        assert_eq!(trajectory_hash(&Trajectory::new()), FNV_OFFSET);
    }

    #[test]
    fn equal_frames_hash_equal() {
        assert_eq!(frame_hash(&frame(1.5)), frame_hash(&frame(1.5)));
        assert_ne!(frame_hash(&frame(1.5)), frame_hash(&frame(2.5)));
    }

    #[test]
    fn signed_zero_is_distinguished() {
        assert_ne!(frame_hash(&frame(0.0)), frame_hash(&frame(-0.0)));
    }

    #[test]
    fn frame_order_matters() {
        let mut ab = Trajectory::new();
        ab.push(frame(1.0));
        ab.push(frame(2.0));
        let mut ba = Trajectory::new();
        ba.push(frame(2.0));
        ba.push(frame(1.0));
        assert_ne!(trajectory_hash(&ab), trajectory_hash(&ba));
    }
}
