//! Brute-force matcher and reference oracle.

use gridseek_core::{
    CellMarks, EngineKind, MatchEngine, MatchInput, Position, StepOutcome, TraceRecorder,
};

use crate::verify::verify_block;

/// Compares every pattern cell at every anchor in row-major order,
/// stopping each anchor at its first mismatch.
///
/// One step per anchor, carrying every examined cell. Its match set is
/// the reference every other engine must reproduce. O(H·W·h·w) worst case.
#[derive(Clone, Copy, Debug, Default)]
pub struct Naive;

impl MatchEngine for Naive {
    fn kind(&self) -> EngineKind {
        EngineKind::Naive
    }

    fn scan(&self, input: &MatchInput<'_>, recorder: &mut TraceRecorder) {
        recorder.reserve(input.anchor_count());
        for i in 0..input.anchor_rows() {
            if recorder.should_stop() {
                return;
            }
            for j in 0..input.anchor_cols() {
                let anchor = Position::new(i, j);
                let mut marks = CellMarks::new();
                let ok = verify_block(input, anchor, 0, recorder, &mut marks);
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

#[cfg(test)]
mod tests {
    use super::*;
    use gridseek_core::{CellMark, Grid};

    #[test]
    fn marks_include_failing_cell() {
        let m = Grid::from_rows(&[&[1, 2], &[3, 4]]).unwrap();
        let p = Grid::from_rows(&[&[1, 9]]).unwrap();
        let result = Naive.run(&m, &p).unwrap();
        let first = &result.trace.steps()[0];
        assert_eq!(
            first.cells.as_slice(),
            &[CellMark::new(0, 0, true), CellMark::new(0, 1, false)]
        );
        assert_eq!(first.comparisons_so_far, 2);
    }

    #[test]
    fn full_match_marks_every_cell() {
        let m = Grid::from_rows(&[&[1, 2], &[3, 4]]).unwrap();
        let result = Naive.run(&m, &m).unwrap();
        assert_eq!(result.total_matches, 1);
        assert_eq!(result.total_comparisons, 4);
        assert_eq!(result.trace.steps()[0].cells.len(), 4);
        assert!(result.trace.steps()[0].cells.iter().all(|c| c.matched));
    }

    #[test]
    fn one_step_per_anchor_in_row_major_order() {
        let m = Grid::new(vec![vec![0; 4]; 3]).unwrap();
        let p = Grid::new(vec![vec![1; 2]; 2]).unwrap();
        let result = Naive.run(&m, &p).unwrap();
        let anchors: Vec<_> = result.trace.iter().filter_map(|s| s.anchor).collect();
        assert_eq!(anchors.len(), 6);
        assert_eq!(anchors[0], Position::new(0, 0));
        assert_eq!(anchors[3], Position::new(1, 0));
        assert_eq!(result.total_comparisons, 6);
    }
}
