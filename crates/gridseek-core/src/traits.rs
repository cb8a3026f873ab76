//! The engine contract shared by all five matchers.

use std::time::Instant;

use crate::error::GridError;
use crate::grid::{Grid, MatchInput};
use crate::id::EngineKind;
use crate::run::{RunLimits, RunResult};
use crate::trace::TraceRecorder;

/// A 2D pattern matcher that records its search as a step trace.
///
/// # Contract
///
/// - [`scan`](Self::scan) is deterministic: the same input yields an
///   identical trace.
/// - `scan` is total over a validated [`MatchInput`]; an out-of-range
///   index during a scan is a bug, not a reportable error.
/// - Every comparison is charged to the recorder before the step that
///   reports it is recorded, so the terminal step carries the run totals.
/// - Engines are stateless (`&self`) and shareable across threads.
///
/// # Examples
///
/// ```
/// use gridseek_core::{
///     CellMark, EngineKind, Grid, MatchEngine, MatchInput, Position, StepOutcome,
///     TraceRecorder,
/// };
///
/// /// Reports a match wherever the top-left pattern cell agrees.
/// struct CornerOnly;
///
/// impl MatchEngine for CornerOnly {
///     fn kind(&self) -> EngineKind { EngineKind::Naive }
///
///     fn scan(&self, input: &MatchInput<'_>, rec: &mut TraceRecorder) {
///         let corner = input.pattern().get(0, 0);
///         for i in 0..input.anchor_rows() {
///             for j in 0..input.anchor_cols() {
///                 let ok = rec.compare(input.matrix().get(i, j), corner);
///                 let outcome = if ok { StepOutcome::Match } else { StepOutcome::Mismatch };
///                 rec.record(
///                     Some(Position::new(i, j)),
///                     outcome,
///                     [CellMark::new(i, j, ok)].into_iter().collect(),
///                 );
///             }
///         }
///     }
/// }
///
/// let m: Grid = "1 2\n1 4".parse().unwrap();
/// let p: Grid = "1".parse().unwrap();
/// let result = CornerOnly.run(&m, &p).unwrap();
/// assert_eq!(result.total_matches, 2);
/// assert_eq!(result.trace.len(), 4);
/// ```
pub trait MatchEngine: Send + Sync {
    /// Which engine this is.
    fn kind(&self) -> EngineKind;

    /// Scan a validated input, recording every step.
    fn scan(&self, input: &MatchInput<'_>, recorder: &mut TraceRecorder);

    /// Validate, scan, and summarise a run with no limits.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidDimensions`] if the pattern does not fit in
    /// the matrix. Grid-level failures are caught when the grids are
    /// built.
    fn run(&self, matrix: &Grid, pattern: &Grid) -> Result<RunResult, GridError> {
        self.run_with_limits(matrix, pattern, RunLimits::default())
    }

    /// Validate, scan under `limits`, and summarise a run.
    fn run_with_limits(
        &self,
        matrix: &Grid,
        pattern: &Grid,
        limits: RunLimits,
    ) -> Result<RunResult, GridError> {
        let input = MatchInput::new(matrix, pattern)?;
        let engine = self.kind();
        tracing::debug!(
            engine = engine.name(),
            matrix = ?matrix.dims(),
            pattern = ?pattern.dims(),
            "starting run"
        );

        let start = Instant::now();
        let mut recorder = TraceRecorder::with_limits(limits);
        self.scan(&input, &mut recorder);
        let elapsed = start.elapsed();

        let status = recorder.status();
        let total_matches = recorder.matches();
        let total_comparisons = recorder.comparisons();
        let trace = recorder.finish();
        tracing::debug!(
            engine = engine.name(),
            steps = trace.len(),
            total_matches,
            total_comparisons,
            elapsed_us = elapsed.as_micros() as u64,
            ?status,
            "run finished"
        );

        Ok(RunResult {
            engine,
            trace,
            total_matches,
            total_comparisons,
            elapsed,
            status,
        })
    }
}
