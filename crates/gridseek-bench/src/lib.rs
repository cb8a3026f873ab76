//! Benchmark profiles for the gridseek engines.
//!
//! Each profile returns a deterministic `(matrix, pattern)` pair:
//!
//! - [`reference_profile`]: 100x100 decimal matrix, 4x4 pattern planted 8 times
//! - [`binary_profile`]: 200x200 binary matrix, 3x3 pattern (many partial hits)
//! - [`stress_profile`]: 316x316 (~100K cells) decimal matrix, 5x5 pattern

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gridseek_core::{Grid, Position};
use gridseek_test_utils::{plant, random_grid};

/// 100x100 matrix of values 0..=9 with a 4x4 pattern planted at eight
/// seed-derived positions.
pub fn reference_profile(seed: u64) -> (Grid, Grid) {
    planted(seed, 100, 4, 8, 0..=9)
}

/// 200x200 binary matrix and a 3x3 binary pattern. Small alphabets defeat
/// skip heuristics and stress verification.
pub fn binary_profile(seed: u64) -> (Grid, Grid) {
    (
        random_grid(seed, 200, 200, 0..=1),
        random_grid(seed ^ 0xb1, 3, 3, 0..=1),
    )
}

/// 316x316 matrix (~100K cells) with a 5x5 pattern planted 16 times.
pub fn stress_profile(seed: u64) -> (Grid, Grid) {
    planted(seed, 316, 5, 16, 0..=9)
}

fn planted(
    seed: u64,
    side: usize,
    pattern_side: usize,
    copies: u64,
    values: std::ops::RangeInclusive<i64>,
) -> (Grid, Grid) {
    let pattern = random_grid(seed.wrapping_add(1), pattern_side, pattern_side, values.clone());
    let mut matrix = random_grid(seed, side, side, values);
    let span = (side - pattern_side + 1) as u64;
    for k in 0..copies {
        // deterministic scatter; overlaps are allowed
        let h = seed ^ k.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        let at = Position::new((h % span) as usize, ((h >> 32) % span) as usize);
        matrix = plant(&matrix, &pattern, at);
    }
    (matrix, pattern)
}
