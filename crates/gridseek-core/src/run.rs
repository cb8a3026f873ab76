//! Run summaries and cooperative run limits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::id::EngineKind;
use crate::trace::StepTrace;

/// Shared flag for abandoning runs between rows or anchors.
///
/// Cloning yields a handle to the same flag, so one token can stop every
/// engine in a race.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Optional bounds on a single engine run.
///
/// The default has no limits. A run that completes is unaffected by them;
/// a run that hits one stops at its next checkpoint.
#[derive(Clone, Debug, Default)]
pub struct RunLimits {
    /// Stop when this token is cancelled.
    pub cancel: Option<CancelToken>,
    /// Stop at the first checkpoint after this instant.
    pub deadline: Option<Instant>,
    /// Stop at the first checkpoint once this many steps are recorded.
    pub max_steps: Option<usize>,
}

impl RunLimits {
    /// Limits with only a cancellation token.
    pub fn with_cancel(token: CancelToken) -> Self {
        Self {
            cancel: Some(token),
            ..Self::default()
        }
    }

    /// Limits with only a deadline `budget` from now.
    pub fn with_budget(budget: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + budget),
            ..Self::default()
        }
    }

    /// Limits with only a step budget.
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps: Some(max_steps),
            ..Self::default()
        }
    }
}

/// Whether a run scanned every anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// The engine finished its scan.
    Completed,
    /// The engine stopped at a checkpoint; the trace is a consistent prefix.
    Cancelled,
}

/// Summary of one engine run over one matrix/pattern pair.
#[derive(Clone, Debug)]
pub struct RunResult {
    /// Which engine produced this result.
    pub engine: EngineKind,
    /// The frozen step trace.
    pub trace: StepTrace,
    /// Number of full matches found.
    pub total_matches: u64,
    /// Number of comparisons charged, including preprocessing.
    pub total_comparisons: u64,
    /// Wall-clock time spent in the engine.
    pub elapsed: Duration,
    /// Completed or cancelled.
    pub status: RunStatus,
}

impl RunResult {
    /// Display name of the producing engine.
    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// `true` if the run scanned every anchor.
    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Elapsed time in fractional milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}
