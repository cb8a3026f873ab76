//! Boyer-Moore-derived matcher using the bad-character rule on the first
//! pattern row.

use indexmap::IndexMap;

use gridseek_core::{
    CellMark, CellMarks, EngineKind, MatchEngine, MatchInput, Position, StepOutcome,
    TraceRecorder,
};

use crate::verify::{first_row_marks, verify_block};

/// Row-anchored bad-character matcher.
///
/// For each anchor row, compares the first pattern row right to left. A
/// mismatch at offset `k` against value `v` skips
/// `max(1, k - last(v))` columns, where `last(v)` is the rightmost
/// position of `v` in the first pattern row (or -1 if absent). A full
/// first-row hit verifies the remaining rows and then advances one column.
///
/// One step is emitted per examined anchor: [`StepOutcome::Shift`] for a
/// first-row rejection, `Match`/`Mismatch` for a verified candidate.
/// Skipped anchors emit nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoyerMoore;

impl MatchEngine for BoyerMoore {
    fn kind(&self) -> EngineKind {
        EngineKind::BoyerMoore
    }

    fn scan(&self, input: &MatchInput<'_>, recorder: &mut TraceRecorder) {
        let matrix = input.matrix();
        let first = input.pattern().row(0);
        let width = first.len();
        let table = BadCharTable::new(first);
        let last_col = input.anchor_cols() - 1;

        for i in 0..input.anchor_rows() {
            if recorder.should_stop() {
                return;
            }
            let text = matrix.row(i);
            let mut j = 0usize;
            while j <= last_col {
                let anchor = Position::new(i, j);
                match compare_suffix(text, first, j, recorder) {
                    RowCheck::Mismatch { offset, value } => {
                        let by = table.shift(offset, value);
                        let mut marks: CellMarks = ((offset + 1)..width)
                            .map(|k| CellMark::new(i, j + k, true))
                            .collect();
                        marks.push(CellMark::new(i, j + offset, false));
                        recorder.record(Some(anchor), StepOutcome::Shift { by }, marks);
                        j += by;
                    }
                    RowCheck::Hit => {
                        let mut marks = first_row_marks(anchor, width);
                        let ok = verify_block(input, anchor, 1, recorder, &mut marks);
                        let outcome = if ok {
                            StepOutcome::Match
                        } else {
                            StepOutcome::Mismatch
                        };
                        recorder.record(Some(anchor), outcome, marks);
                        j += 1;
                    }
                }
            }
        }
    }
}

enum RowCheck {
    Hit,
    Mismatch { offset: usize, value: i64 },
}

/// Compare `pat` against `text[j..]` right to left, charging each cell.
fn compare_suffix(text: &[i64], pat: &[i64], j: usize, recorder: &mut TraceRecorder) -> RowCheck {
    for k in (0..pat.len()).rev() {
        let value = text[j + k];
        if !recorder.compare(pat[k], value) {
            return RowCheck::Mismatch { offset: k, value };
        }
    }
    RowCheck::Hit
}

/// Rightmost occurrence of each value in a pattern row.
#[derive(Debug)]
pub(crate) struct BadCharTable {
    last: IndexMap<i64, usize>,
}

impl BadCharTable {
    pub(crate) fn new(row: &[i64]) -> Self {
        let mut last = IndexMap::with_capacity(row.len());
        for (k, &v) in row.iter().enumerate() {
            // later inserts overwrite, leaving the rightmost index
            last.insert(v, k);
        }
        Self { last }
    }

    /// Rightmost index of `value`, or `None` if it does not occur.
    pub(crate) fn last_occurrence(&self, value: i64) -> Option<usize> {
        self.last.get(&value).copied()
    }

    /// Forward shift after a mismatch at `offset` against `value`. Never zero.
    pub(crate) fn shift(&self, offset: usize, value: i64) -> usize {
        match self.last_occurrence(value) {
            Some(last) if last < offset => offset - last,
            Some(_) => 1,
            None => offset + 1,
        }
    }
}
