//! Step-by-step playback over finished runs.
//!
//! A [`TraceCursor`] walks one trace. Its position counts the steps
//! played so far, from 0 (nothing shown) to `len` (the terminal step
//! shown). [`RacePlayback`] drives one cursor per engine off a shared
//! tick, so step `t` of every engine is shown at the same time.

use std::time::Duration;

use gridseek_core::{EngineKind, RunResult, Step, StepTrace};

// ── TraceCursor ────────────────────────────────────────────────────

/// Playback position over one run.
#[derive(Clone, Debug)]
pub struct TraceCursor<'a> {
    trace: &'a StepTrace,
    elapsed: Duration,
    played: usize,
}

impl<'a> TraceCursor<'a> {
    /// Cursor at the start of `result`'s trace.
    pub fn new(result: &'a RunResult) -> Self {
        Self::over(&result.trace, result.elapsed)
    }

    /// Cursor over a bare trace that took `elapsed` to produce.
    pub fn over(trace: &'a StepTrace, elapsed: Duration) -> Self {
        Self {
            trace,
            elapsed,
            played: 0,
        }
    }

    /// Number of steps played so far.
    pub fn position(&self) -> usize {
        self.played
    }

    /// Length of the underlying trace.
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// `true` if the underlying trace has no steps.
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// The most recently played step.
    pub fn current(&self) -> Option<&'a Step> {
        self.played.checked_sub(1).and_then(|i| self.trace.get(i))
    }

    /// Play the next step. Returns `None` at the end.
    pub fn forward(&mut self) -> Option<&'a Step> {
        if self.played >= self.trace.len() {
            return None;
        }
        self.played += 1;
        self.current()
    }

    /// Un-play the current step. Returns the step now current, or `None`
    /// at the start.
    pub fn back(&mut self) -> Option<&'a Step> {
        self.played = self.played.saturating_sub(1);
        self.current()
    }

    /// Jump so that `played` steps have been shown, clamped to the trace.
    pub fn seek(&mut self, played: usize) -> Option<&'a Step> {
        self.played = played.min(self.trace.len());
        self.current()
    }

    /// Back to the start.
    pub fn reset(&mut self) {
        self.played = 0;
    }

    /// `true` once the terminal step has been played.
    pub fn is_finished(&self) -> bool {
        self.played == self.trace.len()
    }

    /// Fraction of the trace played, in `[0, 1]`. An empty trace is
    /// complete.
    pub fn progress(&self) -> f64 {
        if self.trace.is_empty() {
            1.0
        } else {
            self.played as f64 / self.trace.len() as f64
        }
    }

    /// Run time apportioned to the steps played so far:
    /// `elapsed * position / len`.
    pub fn interpolated_elapsed(&self) -> Duration {
        if self.trace.is_empty() {
            return self.elapsed;
        }
        let nanos = self.elapsed.as_nanos() * self.played as u128 / self.trace.len() as u128;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Comparisons as of the current step.
    pub fn comparisons(&self) -> u64 {
        self.current().map_or(0, |s| s.comparisons_so_far)
    }

    /// Matches as of the current step.
    pub fn matches(&self) -> u64 {
        self.current().map_or(0, |s| s.matches_so_far)
    }
}

impl<'a> Iterator for TraceCursor<'a> {
    type Item = &'a Step;

    fn next(&mut self) -> Option<Self::Item> {
        self.forward()
    }
}

// ── RacePlayback ───────────────────────────────────────────────────

/// What one engine's lane shows at the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LaneState<'a> {
    /// Nothing played yet.
    Idle,
    /// The step played at this tick.
    Stepping(&'a Step),
    /// The engine ran out of steps; carries its terminal step, if any.
    Finished(Option<&'a Step>),
}

/// Lockstep playback over several runs.
///
/// Every [`tick`](Self::tick) plays step `t` of each engine that still has
/// one. Engines with shorter traces finish early and hold their terminal
/// step while the others continue.
#[derive(Clone, Debug)]
pub struct RacePlayback<'a> {
    lanes: Vec<(EngineKind, TraceCursor<'a>)>,
    tick: usize,
}

impl<'a> RacePlayback<'a> {
    /// Playback over `results`, in the given order.
    pub fn new(results: &'a [RunResult]) -> Self {
        Self {
            lanes: results
                .iter()
                .map(|r| (r.engine, TraceCursor::new(r)))
                .collect(),
            tick: 0,
        }
    }

    /// Number of ticks played.
    pub fn tick_index(&self) -> usize {
        self.tick
    }

    /// Ticks needed to show every engine to its end.
    pub fn len(&self) -> usize {
        self.lanes.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// `true` if there are no lanes or every trace is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` while any engine still has steps to play.
    pub fn is_active(&self) -> bool {
        self.lanes.iter().any(|(_, c)| !c.is_finished())
    }

    /// Play one step on every unfinished lane. Returns `false`, without
    /// advancing, once every lane has finished.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.tick += 1;
        for (_, cursor) in &mut self.lanes {
            cursor.forward();
        }
        true
    }

    /// Step every lane back one tick.
    pub fn back(&mut self) {
        self.seek(self.tick.saturating_sub(1));
    }

    /// Jump to tick `t`, clamped to [`len`](Self::len).
    pub fn seek(&mut self, t: usize) {
        self.tick = t.min(self.len());
        for (_, cursor) in &mut self.lanes {
            cursor.seek(self.tick);
        }
    }

    /// State of one lane at the current tick.
    pub fn lane(&self, engine: EngineKind) -> Option<LaneState<'a>> {
        self.lanes
            .iter()
            .find(|(k, _)| *k == engine)
            .map(|(_, c)| self.state_of(c))
    }

    /// State of every lane at the current tick, in configured order.
    pub fn lanes(&self) -> impl Iterator<Item = (EngineKind, LaneState<'a>)> + '_ {
        self.lanes.iter().map(|(k, c)| (*k, self.state_of(c)))
    }

    /// Steps played at exactly this tick, as `(engine, step)`.
    pub fn stepped(&self) -> impl Iterator<Item = (EngineKind, &'a Step)> + '_ {
        self.lanes().filter_map(|(k, s)| match s {
            LaneState::Stepping(step) => Some((k, step)),
            _ => None,
        })
    }

    fn state_of(&self, cursor: &TraceCursor<'a>) -> LaneState<'a> {
        if self.tick > cursor.len() || (cursor.is_finished() && self.tick == 0) {
            LaneState::Finished(cursor.current())
        } else if self.tick == 0 {
            LaneState::Idle
        } else {
            cursor.current().map_or(LaneState::Idle, LaneState::Stepping)
        }
    }
}
