//! Rabin-Karp-style matcher using a rolling additive checksum.
//!
//! The checksum is the plain sum of a block's cells. Many different blocks
//! share a sum, so a sum hit only nominates an anchor; the block is always
//! verified cell by cell before a match is reported.
//!
//! # Rolling
//!
//! For each band of `h` matrix rows the engine keeps one running sum per
//! matrix column. Moving the band down one row subtracts the departing
//! row and adds the arriving one (`2W` updates); sliding the window right
//! subtracts one column sum and adds another (2 updates). Every value
//! added to or removed from a running sum is charged one comparison.

use gridseek_core::{
    CellMark, CellMarks, EngineKind, MatchEngine, MatchInput, Position, StepOutcome,
    TraceRecorder,
};

use crate::verify::verify_block;

/// Sum-hash pre-filter with mandatory verification.
#[derive(Clone, Copy, Debug, Default)]
pub struct RabinKarp;

impl MatchEngine for RabinKarp {
    fn kind(&self) -> EngineKind {
        EngineKind::RabinKarp
    }

    fn scan(&self, input: &MatchInput<'_>, recorder: &mut TraceRecorder) {
        let matrix = input.matrix();
        let pattern = input.pattern();
        let (h, w) = pattern.dims();
        let target = pattern.sum();

        let mut strips = ColumnStrips::new(matrix.width());
        recorder.reserve(input.anchor_count());

        for i in 0..input.anchor_rows() {
            if recorder.should_stop() {
                return;
            }
            let cost = if i == 0 {
                strips.fill(input, h)
            } else {
                strips.slide_down(input, i - 1, h)
            };
            recorder.charge(cost);

            let mut window = 0i64;
            for j in 0..input.anchor_cols() {
                if j == 0 {
                    window = strips.sum_range(0, w);
                    recorder.charge(w as u64);
                } else {
                    window = window
                        .wrapping_sub(strips.get(j - 1))
                        .wrapping_add(strips.get(j + w - 1));
                    recorder.charge(2);
                }

                let anchor = Position::new(i, j);
                let mut marks = CellMarks::new();
                let ok = if window == target {
                    verify_block(input, anchor, 0, recorder, &mut marks)
                } else {
                    marks.push(CellMark::new(i, j, false));
                    false
                };
                let outcome = if ok {
                    StepOutcome::Match
                } else {
                    StepOutcome::Mismatch
                };
                recorder.record(Some(anchor), outcome, marks);
            }
        }
    }
}

/// Per-column sums over the current band of matrix rows.
struct ColumnStrips {
    sums: Vec<i64>,
}

impl ColumnStrips {
    fn new(width: usize) -> Self {
        Self {
            sums: vec![0; width],
        }
    }

    /// Sum rows `0..h` into each column. Returns the number of cells read.
    fn fill(&mut self, input: &MatchInput<'_>, h: usize) -> u64 {
        let matrix = input.matrix();
        self.sums.iter_mut().for_each(|s| *s = 0);
        for r in 0..h {
            for (s, &v) in self.sums.iter_mut().zip(matrix.row(r)) {
                *s = s.wrapping_add(v);
            }
        }
        (h * matrix.width()) as u64
    }

    /// Move the band from starting at `top` to starting at `top + 1`.
    fn slide_down(&mut self, input: &MatchInput<'_>, top: usize, h: usize) -> u64 {
        let matrix = input.matrix();
        let leaving = matrix.row(top);
        let arriving = matrix.row(top + h);
        for ((s, &out), &inc) in self.sums.iter_mut().zip(leaving).zip(arriving) {
            *s = s.wrapping_sub(out).wrapping_add(inc);
        }
        (2 * matrix.width()) as u64
    }

    fn get(&self, col: usize) -> i64 {
        self.sums[col]
    }

    fn sum_range(&self, start: usize, len: usize) -> i64 {
        self.sums[start..start + len]
            .iter()
            .fold(0i64, |acc, &v| acc.wrapping_add(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridseek_core::Grid;

    #[test]
    fn collision_is_rejected_by_verification() {
        // [1, 3] and [2, 2] share a sum.
        let m = Grid::from_rows(&[&[1, 3, 2, 2]]).unwrap();
        let p = Grid::from_rows(&[&[2, 2]]).unwrap();
        let result = RabinKarp.run(&m, &p).unwrap();
        assert_eq!(result.trace.matching_anchors(), vec![Position::new(0, 2)]);
        // anchor (0,0) collided and was verified: its marks hold the failing cell
        let first = &result.trace.steps()[0];
        assert_eq!(first.outcome, StepOutcome::Mismatch);
        assert_eq!(first.cells[0], CellMark::new(0, 0, false));
    }

    #[test]
    fn sum_miss_skips_verification() {
        let m = Grid::from_rows(&[&[1, 1, 1]]).unwrap();
        let p = Grid::from_rows(&[&[5]]).unwrap();
        let result = RabinKarp.run(&m, &p).unwrap();
        // fill: 1x3 reads; windows: 1 + 2 + 2
        assert_eq!(result.total_comparisons, 3 + 1 + 2 + 2);
        assert_eq!(result.total_matches, 0);
        assert!(result.trace.iter().all(|s| s.cells.len() == 1));
    }

    #[test]
    fn rolling_sums_match_recomputation() {
        let m: Grid = "1 2 3 4 5\n6 7 8 2 3\n9 1 2 7 8\n3 2 3 1 2\n5 7 8 4 5"
            .parse()
            .unwrap();
        let p: Grid = "2 3\n7 8".parse().unwrap();
        let input = MatchInput::new(&m, &p).unwrap();
        let mut strips = ColumnStrips::new(m.width());
        strips.fill(&input, 2);
        for top in 0..input.anchor_rows() {
            if top > 0 {
                strips.slide_down(&input, top - 1, 2);
            }
            for c in 0..m.width() {
                assert_eq!(strips.get(c), m.get(top, c) + m.get(top + 1, c));
            }
        }
    }

    #[test]
    fn finds_known_anchors() {
        let m: Grid = "1 2 3 4 5\n6 7 8 2 3\n9 1 2 7 8\n3 2 3 1 2\n5 7 8 4 5"
            .parse()
            .unwrap();
        let p: Grid = "2 3\n7 8".parse().unwrap();
        let result = RabinKarp.run(&m, &p).unwrap();
        assert_eq!(
            result.trace.matching_anchors(),
            vec![
                Position::new(0, 1),
                Position::new(1, 3),
                Position::new(3, 1)
            ]
        );
    }
}
