//! Test utilities for gridseek development.
//!
//! Provides the named [`Preset`] scenarios, seeded random grid
//! generators, and [`brute_force_anchors`], an engine-independent oracle
//! for checking match sets.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{brute_force_anchors, plant, random_grid, Preset};

use gridseek_core::Grid;

/// Parse a whitespace-separated grid literal. Panics on malformed input.
pub fn grid(text: &str) -> Grid {
    match text.parse() {
        Ok(g) => g,
        Err(e) => panic!("bad grid literal {text:?}: {e}"),
    }
}

/// The 5x5 matrix and 2x2 pattern used throughout the test suites.
/// Matches at (0, 1), (1, 3) and (3, 1).
pub fn known_scenario() -> (Grid, Grid) {
    (
        grid("1 2 3 4 5\n6 7 8 2 3\n9 1 2 7 8\n3 2 3 1 2\n5 7 8 4 5"),
        grid("2 3\n7 8"),
    )
}
