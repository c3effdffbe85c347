//! Test utilities for Eddy development.
//!
//! Grid fixtures live in [`fixtures`]; the free functions here are
//! tolerance-aware assertions shared by unit and integration tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{linear_grid, random_grid, reference_grid};

/// Assert `|got - want| <= tol`, with a message naming both values.
#[track_caller]
pub fn assert_close(got: f64, want: f64, tol: f64) {
    assert!(
        (got - want).abs() <= tol,
        "expected {want}, got {got} (|diff| = {:e} > {tol:e})",
        (got - want).abs()
    );
}

/// Element-wise [`assert_close`] over two equally long slices.
#[track_caller]
pub fn assert_all_close(got: &[f64], want: &[f64], tol: f64) {
    assert_eq!(got.len(), want.len(), "length mismatch");
    for (i, (g, w)) in got.iter().zip(want).enumerate() {
        assert!(
            (g - w).abs() <= tol,
            "index {i}: expected {w}, got {g} (|diff| = {:e} > {tol:e})",
            (g - w).abs()
        );
    }
}
