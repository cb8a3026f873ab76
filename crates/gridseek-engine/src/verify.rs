//! Cell-by-cell block verification shared by the engines.

use gridseek_core::{CellMark, CellMarks, MatchInput, Position, TraceRecorder};

/// Compare pattern rows `from_row..h` against the matrix block anchored
/// at `anchor`, short-circuiting on the first mismatch.
///
/// Each examined cell is charged one comparison and pushed to `marks`,
/// including the failing cell.
pub(crate) fn verify_block(
    input: &MatchInput<'_>,
    anchor: Position,
    from_row: usize,
    recorder: &mut TraceRecorder,
    marks: &mut CellMarks,
) -> bool {
    let matrix = input.matrix();
    let pattern = input.pattern();
    for pi in from_row..pattern.height() {
        let m_row = &matrix.row(anchor.row + pi)[anchor.col..anchor.col + pattern.width()];
        for (pj, (&mv, &pv)) in m_row.iter().zip(pattern.row(pi)).enumerate() {
            let ok = recorder.compare(mv, pv);
            marks.push(CellMark::new(anchor.row + pi, anchor.col + pj, ok));
            if !ok {
                return false;
            }
        }
    }
    true
}

/// Marks for a first pattern row already known to match at `anchor`.
pub(crate) fn first_row_marks(anchor: Position, width: usize) -> CellMarks {
    (0..width)
        .map(|pj| CellMark::new(anchor.row, anchor.col + pj, true))
        .collect()
}
