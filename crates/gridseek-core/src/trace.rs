//! The step trace model and the per-run recorder that builds it.
//!
//! Every engine emits the same [`Step`] schema: an optional anchor, an
//! [`StepOutcome`], the cells touched, and running counters. A
//! [`TraceRecorder`] owns the counters during a run and is consumed into
//! a read-only [`StepTrace`] when the run ends.

use std::time::Instant;

use smallvec::SmallVec;

use crate::grid::Position;
use crate::run::{RunLimits, RunStatus};

/// One matrix cell examined during a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellMark {
    /// Matrix row.
    pub row: usize,
    /// Matrix column.
    pub col: usize,
    /// Whether the cell agreed with the corresponding pattern cell.
    pub matched: bool,
}

impl CellMark {
    /// Construct a cell mark.
    pub const fn new(row: usize, col: usize, matched: bool) -> Self {
        Self { row, col, matched }
    }
}

/// Ordered cells touched by a step.
///
/// Most engines mark one cell per step, so four inline slots avoid a heap
/// allocation for all but the naive engine's longer comparisons.
pub type CellMarks = SmallVec<[CellMark; 4]>;

/// What a step concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The pattern occurs at the step's anchor.
    Match,
    /// The anchor was examined and rejected.
    Mismatch,
    /// Boyer-Moore rejected the anchor and jumps `by` columns forward.
    Shift {
        /// Column distance to the next examined anchor. Always at least 1.
        by: usize,
    },
    /// An automaton finished scanning a matrix row.
    Transition,
}

/// One unit of observable algorithm progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Anchor this step concerns, or `None` for row-level automaton steps.
    pub anchor: Option<Position>,
    /// What the step concluded.
    pub outcome: StepOutcome,
    /// Matrix cells touched, in the order they were examined.
    pub cells: CellMarks,
    /// Total comparisons charged up to and including this step.
    pub comparisons_so_far: u64,
    /// Total full matches found up to and including this step.
    pub matches_so_far: u64,
}

impl Step {
    /// `true` if this step reports a full match.
    pub fn is_match(&self) -> bool {
        self.outcome == StepOutcome::Match
    }
}

/// Ordered, read-only sequence of steps produced by one engine run.
///
/// Only a [`TraceRecorder`] can build one, so a trace is never mutated
/// after the run that produced it returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepTrace {
    steps: Vec<Step>,
}

impl StepTrace {
    /// All steps in emission order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if no step was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The terminal step.
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Iterate over steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Anchors of every matching step, in emission order.
    pub fn matching_anchors(&self) -> Vec<Position> {
        self.steps
            .iter()
            .filter(|s| s.is_match())
            .filter_map(|s| s.anchor)
            .collect()
    }

    /// Number of steps that carry an anchor.
    pub fn anchored_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.anchor.is_some()).count()
    }

    /// Comparisons reported by the terminal step (0 for an empty trace).
    pub fn final_comparisons(&self) -> u64 {
        self.last().map_or(0, |s| s.comparisons_so_far)
    }

    /// Matches reported by the terminal step (0 for an empty trace).
    pub fn final_matches(&self) -> u64 {
        self.last().map_or(0, |s| s.matches_so_far)
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Append-only builder for a [`StepTrace`] with running counters.
///
/// Engines charge comparisons as they happen and call
/// [`record`](Self::record) once per observable unit of progress; the
/// recorder stamps each step with the counters at that instant. Charges
/// made after the final `record` would leave the terminal step behind the
/// run totals, so engines charge before they record.
///
/// # Examples
///
/// ```
/// use gridseek_core::{CellMark, Position, StepOutcome, TraceRecorder};
///
/// let mut rec = TraceRecorder::new();
/// let hit = rec.compare(7, 7);
/// rec.record(
///     Some(Position::new(0, 0)),
///     StepOutcome::Match,
///     [CellMark::new(0, 0, hit)].into_iter().collect(),
/// );
/// let trace = rec.finish();
/// assert_eq!(trace.len(), 1);
/// assert_eq!(trace.final_comparisons(), 1);
/// assert_eq!(trace.final_matches(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TraceRecorder {
    steps: Vec<Step>,
    comparisons: u64,
    matches: u64,
    limits: RunLimits,
    stopped: bool,
}

impl TraceRecorder {
    /// A recorder with no cancellation or deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that honours the given limits at
    /// [`should_stop`](Self::should_stop) checkpoints.
    pub fn with_limits(limits: RunLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Pre-size the step buffer.
    pub fn reserve(&mut self, additional: usize) {
        self.steps.reserve(additional);
    }

    /// Charge `n` comparisons without recording a step.
    #[inline]
    pub fn charge(&mut self, n: u64) {
        self.comparisons += n;
    }

    /// Compare two values, charging one comparison.
    #[inline]
    pub fn compare(&mut self, a: i64, b: i64) -> bool {
        self.comparisons += 1;
        a == b
    }

    /// Append a step stamped with the current counters.
    ///
    /// A [`StepOutcome::Match`] increments the match counter first, so the
    /// matching step itself reports the new total.
    pub fn record(&mut self, anchor: Option<Position>, outcome: StepOutcome, cells: CellMarks) {
        if outcome == StepOutcome::Match {
            self.matches += 1;
        }
        self.steps.push(Step {
            anchor,
            outcome,
            cells,
            comparisons_so_far: self.comparisons,
            matches_so_far: self.matches,
        });
    }

    /// Comparisons charged so far.
    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    /// Matches recorded so far.
    pub fn matches(&self) -> u64 {
        self.matches
    }

    /// Steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if no step has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Cooperative cancellation checkpoint.
    ///
    /// Engines call this between rows or anchors. Once it returns `true`
    /// it keeps returning `true`, and the run is reported as
    /// [`RunStatus::Cancelled`].
    pub fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let cancelled = self
            .limits
            .cancel
            .as_ref()
            .is_some_and(|token| token.is_cancelled());
        let expired = self
            .limits
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline);
        let exhausted = self
            .limits
            .max_steps
            .is_some_and(|max| self.steps.len() >= max);
        self.stopped = cancelled || expired || exhausted;
        self.stopped
    }

    /// Whether the run completed or was abandoned at a checkpoint.
    pub fn status(&self) -> RunStatus {
        if self.stopped {
            RunStatus::Cancelled
        } else {
            RunStatus::Completed
        }
    }

    /// Freeze the recorded steps into a trace.
    pub fn finish(self) -> StepTrace {
        StepTrace { steps: self.steps }
    }
}
