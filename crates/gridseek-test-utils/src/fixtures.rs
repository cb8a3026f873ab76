//! Named scenarios and seeded grid generators.
//!
//! Random content comes from a [`ChaCha8Rng`] seeded per call, so the
//! same seed always yields the same grid on every platform.

use std::ops::RangeInclusive;

use gridseek_core::{Grid, Position};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Seed used by the random presets.
pub const PRESET_SEED: u64 = 0x6772_6964;

/// Built-in matrix/pattern scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Hand-written 5x5 matrix, 2x2 pattern, three matches.
    Simple5x5,
    /// 12x12 matrix of values 1..=9, pattern `5 5 / 5 5`.
    RandomInt12x12,
    /// 8x8 binary matrix, pattern `1 1 / 1 1`.
    Binary8x8,
    /// 2x3 matrix with a pattern value absent from it.
    NotFound,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Preset; 4] = [
        Preset::Simple5x5,
        Preset::RandomInt12x12,
        Preset::Binary8x8,
        Preset::NotFound,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Simple5x5 => "5x5 Simple",
            Self::RandomInt12x12 => "12x12 Random Int",
            Self::Binary8x8 => "8x8 Binary (0/1)",
            Self::NotFound => "Pattern Not Found",
        }
    }

    /// Look a preset up by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Build `(matrix, pattern)` using [`PRESET_SEED`].
    pub fn build(self) -> (Grid, Grid) {
        self.build_seeded(PRESET_SEED)
    }

    /// Build `(matrix, pattern)`; `seed` only affects the random presets.
    pub fn build_seeded(self, seed: u64) -> (Grid, Grid) {
        match self {
            Self::Simple5x5 => crate::known_scenario(),
            Self::RandomInt12x12 => (
                random_grid(seed, 12, 12, 1..=9),
                crate::grid("5 5\n5 5"),
            ),
            Self::Binary8x8 => (random_grid(seed, 8, 8, 0..=1), crate::grid("1 1\n1 1")),
            Self::NotFound => (crate::grid("1 2 3\n4 5 6"), crate::grid("9 9")),
        }
    }
}

/// A `height` x `width` grid of values drawn uniformly from `values`.
pub fn random_grid(seed: u64, height: usize, width: usize, values: RangeInclusive<i64>) -> Grid {
    assert!(height > 0 && width > 0, "random_grid needs non-zero dimensions");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows = (0..height)
        .map(|_| {
            (0..width)
                .map(|_| rng.random_range(values.clone()))
                .collect()
        })
        .collect();
    match Grid::new(rows) {
        Ok(g) => g,
        Err(e) => panic!("random_grid produced an invalid grid: {e}"),
    }
}

/// Copy of `matrix` with `pattern` written over it at `at`.
pub fn plant(matrix: &Grid, pattern: &Grid, at: Position) -> Grid {
    assert!(
        at.row + pattern.height() <= matrix.height() && at.col + pattern.width() <= matrix.width(),
        "pattern does not fit at {at}"
    );
    let rows = (0..matrix.height())
        .map(|r| {
            (0..matrix.width())
                .map(|c| {
                    let inside = (at.row..at.row + pattern.height()).contains(&r)
                        && (at.col..at.col + pattern.width()).contains(&c);
                    if inside {
                        pattern.get(r - at.row, c - at.col)
                    } else {
                        matrix.get(r, c)
                    }
                })
                .collect()
        })
        .collect();
    match Grid::new(rows) {
        Ok(g) => g,
        Err(e) => panic!("plant produced an invalid grid: {e}"),
    }
}

/// Every anchor where `pattern` occurs in `matrix`, row-major. Shares no
/// code with the engines.
pub fn brute_force_anchors(matrix: &Grid, pattern: &Grid) -> Vec<Position> {
    let (mh, mw) = matrix.dims();
    let (ph, pw) = pattern.dims();
    if ph > mh || pw > mw {
        return Vec::new();
    }
    let mut out = Vec::new();
    for i in 0..=mh - ph {
        for j in 0..=mw - pw {
            let hit = (0..ph).all(|r| matrix.row(i + r)[j..j + pw] == *pattern.row(r));
            if hit {
                out.push(Position::new(i, j));
            }
        }
    }
    out
}
