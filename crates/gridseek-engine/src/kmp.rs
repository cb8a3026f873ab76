//! KMP-derived matcher: 1D row filter plus 2D verification.
//!
//! The failure function is built for the first pattern row only. Each
//! matrix row that can start a match is scanned once with KMP to find the
//! columns where that first row occurs; only those candidate anchors have
//! their remaining rows verified. The text pointer never moves backwards
//! within a row.

use gridseek_core::{
    CellMark, CellMarks, EngineKind, MatchEngine, MatchInput, Position, StepOutcome,
    TraceRecorder,
};

use crate::verify::{first_row_marks, verify_block};

/// Row-filter matcher keyed on the first pattern row.
///
/// Emits one step per anchor so its trace lines up with the naive and
/// Rabin-Karp traces. Anchors the filter rejects carry a single
/// non-matching mark at the anchor cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct Kmp;

impl MatchEngine for Kmp {
    fn kind(&self) -> EngineKind {
        EngineKind::Kmp
    }

    fn scan(&self, input: &MatchInput<'_>, recorder: &mut TraceRecorder) {
        let matrix = input.matrix();
        let first = input.pattern().row(0);
        let width = first.len();

        let failure = failure_table(first, recorder);
        recorder.reserve(input.anchor_count());

        let mut candidate = vec![false; input.anchor_cols()];
        for i in 0..input.anchor_rows() {
            if recorder.should_stop() {
                return;
            }
            candidate.iter_mut().for_each(|c| *c = false);
            for start in find_in_row(matrix.row(i), first, &failure, recorder) {
                candidate[start] = true;
            }

            for (j, &is_candidate) in candidate.iter().enumerate() {
                let anchor = Position::new(i, j);
                let (ok, marks) = if is_candidate {
                    let mut marks = first_row_marks(anchor, width);
                    let ok = verify_block(input, anchor, 1, recorder, &mut marks);
                    (ok, marks)
                } else {
                    let mut marks = CellMarks::new();
                    marks.push(CellMark::new(i, j, false));
                    (false, marks)
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

/// Longest proper prefix of `pat[..=q]` that is also its suffix, for each `q`.
///
/// Every element comparison is charged, including those that end in a
/// fallback along the table.
pub(crate) fn failure_table(pat: &[i64], recorder: &mut TraceRecorder) -> Vec<usize> {
    let mut table = vec![0usize; pat.len()];
    let mut k = 0usize;
    for q in 1..pat.len() {
        loop {
            if recorder.compare(pat[q], pat[k]) {
                k += 1;
                break;
            }
            if k == 0 {
                break;
            }
            k = table[k - 1];
        }
        table[q] = k;
    }
    table
}

/// Start columns of every occurrence of `pat` in `text`, overlaps included.
pub(crate) fn find_in_row(
    text: &[i64],
    pat: &[i64],
    failure: &[usize],
    recorder: &mut TraceRecorder,
) -> Vec<usize> {
    let mut hits = Vec::new();
    let mut k = 0usize;
    for (t, &sym) in text.iter().enumerate() {
        loop {
            if recorder.compare(sym, pat[k]) {
                k += 1;
                break;
            }
            if k == 0 {
                break;
            }
            k = failure[k - 1];
        }
        if k == pat.len() {
            hits.push(t + 1 - k);
            k = failure[k - 1];
        }
    }
    hits
}
