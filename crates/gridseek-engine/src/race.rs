//! Race orchestrator: run several engines over one input and compare them.
//!
//! Inputs are validated once, before any engine starts, so a race either
//! fails with no partial results or yields one [`RunResult`] per selected
//! engine. In [`RaceMode::Parallel`] each engine runs on its own scoped
//! thread and reports back over a channel; completion order does not
//! matter because results are re-ordered to match the configuration.
//!
//! Every completed run must report the same set of matching anchors.

use std::error::Error;
use std::fmt;
use std::io;
use std::time::Instant;

use crossbeam_channel::unbounded;

use gridseek_core::{
    CancelToken, EngineKind, Grid, GridError, MatchInput, Position, RunLimits, RunResult,
};

use crate::config::{ConfigError, RaceConfig, RaceMode};
use crate::dispatch::run_with_limits;

// ── Error type ──────────────────────────────────────────────────

/// Error from a race, raised before or after the engines run.
#[derive(Debug, PartialEq)]
pub enum RaceError {
    /// The matrix/pattern pair failed validation.
    Grid(GridError),
    /// The race configuration is invalid.
    Config(ConfigError),
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Engine whose thread failed to start.
        engine: EngineKind,
        /// OS error text.
        reason: String,
    },
    /// An engine panicked. Engines are total on validated input, so this
    /// is always a bug.
    WorkerPanicked {
        /// The engine that panicked.
        engine: EngineKind,
    },
    /// Completed engines reported different match sets and
    /// `require_agreement` was set.
    Disagreement {
        /// Match count per completed engine.
        counts: Vec<(EngineKind, u64)>,
    },
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "invalid input: {e}"),
            Self::Config(e) => write!(f, "invalid race config: {e}"),
            Self::ThreadSpawnFailed { engine, reason } => {
                write!(f, "could not spawn thread for {engine}: {reason}")
            }
            Self::WorkerPanicked { engine } => write!(f, "engine {engine} panicked"),
            Self::Disagreement { counts } => {
                write!(f, "engines disagree on matches:")?;
                for (engine, n) in counts {
                    write!(f, " {}={n}", engine.short_name())?;
                }
                Ok(())
            }
        }
    }
}

impl Error for RaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for RaceError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ConfigError> for RaceError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── RaceReport ──────────────────────────────────────────────────

/// Results of one race, in configuration order.
#[derive(Clone, Debug)]
pub struct RaceReport {
    results: Vec<RunResult>,
    agreed: bool,
}

impl RaceReport {
    /// Per-engine results in the order the engines were configured.
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    /// Result for `engine`, if it took part.
    pub fn get(&self, engine: EngineKind) -> Option<&RunResult> {
        self.results.iter().find(|r| r.engine == engine)
    }

    /// `true` if every completed engine found the same anchors.
    pub fn agreed(&self) -> bool {
        self.agreed
    }

    /// `true` if no engine was cut short by cancellation or the budget.
    pub fn all_complete(&self) -> bool {
        self.results.iter().all(RunResult::is_complete)
    }

    /// `(engine, total_matches)` for every engine.
    pub fn match_counts(&self) -> Vec<(EngineKind, u64)> {
        self.results
            .iter()
            .map(|r| (r.engine, r.total_matches))
            .collect()
    }

    /// `(engine, total_comparisons)` for every engine.
    pub fn comparison_counts(&self) -> Vec<(EngineKind, u64)> {
        self.results
            .iter()
            .map(|r| (r.engine, r.total_comparisons))
            .collect()
    }

    /// Sorted matching anchors of the first completed run.
    pub fn anchors(&self) -> Vec<Position> {
        self.results
            .iter()
            .find(|r| r.is_complete())
            .map(sorted_anchors)
            .unwrap_or_default()
    }

    /// Length of the longest trace; the number of playback frames needed
    /// to show every engine to its end.
    pub fn longest_trace(&self) -> usize {
        self.results.iter().map(|r| r.trace.len()).max().unwrap_or(0)
    }

    /// Take ownership of the results.
    pub fn into_results(self) -> Vec<RunResult> {
        self.results
    }
}

fn sorted_anchors(result: &RunResult) -> Vec<Position> {
    let mut anchors = result.trace.matching_anchors();
    anchors.sort_unstable();
    anchors
}

// ── Entry points ────────────────────────────────────────────────

/// Run the configured engines over `matrix` and `pattern`.
///
/// # Errors
///
/// [`RaceError::Config`] or [`RaceError::Grid`] before any engine runs;
/// [`RaceError::Disagreement`] if `require_agreement` is set and the
/// completed engines disagree.
///
/// # Examples
///
/// ```
/// use gridseek_core::{Grid, Position};
/// use gridseek_engine::{race, RaceConfig};
///
/// let m: Grid = "1 2 1\n3 4 3".parse().unwrap();
/// let p: Grid = "1\n3".parse().unwrap();
/// let report = race(&m, &p, &RaceConfig::default()).unwrap();
/// assert!(report.agreed());
/// assert_eq!(report.results().len(), 5);
/// assert_eq!(report.anchors(), vec![Position::new(0, 0), Position::new(0, 2)]);
/// ```
pub fn race(matrix: &Grid, pattern: &Grid, config: &RaceConfig) -> Result<RaceReport, RaceError> {
    race_with_cancel(matrix, pattern, config, CancelToken::new())
}

/// [`race`] with an external cancellation token shared by every engine.
pub fn race_with_cancel(
    matrix: &Grid,
    pattern: &Grid,
    config: &RaceConfig,
    cancel: CancelToken,
) -> Result<RaceReport, RaceError> {
    config.validate()?;
    MatchInput::new(matrix, pattern)?;

    let limits = RunLimits {
        cancel: Some(cancel),
        deadline: config.time_budget.map(|b| Instant::now() + b),
        ..RunLimits::default()
    };
    tracing::info!(
        mode = ?config.mode,
        engines = config.engines.len(),
        matrix = ?matrix.dims(),
        pattern = ?pattern.dims(),
        "race starting"
    );

    let results = match config.mode {
        RaceMode::Sequential => config
            .engines
            .iter()
            .map(|&kind| run_with_limits(kind, matrix, pattern, limits.clone()))
            .collect::<Result<Vec<_>, _>>()?,
        RaceMode::Parallel => run_parallel(matrix, pattern, &config.engines, &limits)?,
    };

    for r in &results {
        tracing::info!(
            engine = r.engine.short_name(),
            matches = r.total_matches,
            comparisons = r.total_comparisons,
            steps = r.trace.len(),
            elapsed_us = r.elapsed.as_micros() as u64,
            status = ?r.status,
            "engine finished"
        );
    }

    let agreed = check_agreement(&results);
    if !agreed {
        let counts: Vec<_> = results
            .iter()
            .filter(|r| r.is_complete())
            .map(|r| (r.engine, r.total_matches))
            .collect();
        tracing::warn!(?counts, "engines disagree on match set");
        if config.require_agreement {
            return Err(RaceError::Disagreement { counts });
        }
    }

    Ok(RaceReport { results, agreed })
}

/// `true` if every completed run found the same anchors.
fn check_agreement(results: &[RunResult]) -> bool {
    let mut completed = results.iter().filter(|r| r.is_complete());
    let Some(first) = completed.next() else {
        return true;
    };
    let reference = sorted_anchors(first);
    completed.all(|r| sorted_anchors(r) == reference)
}

fn run_parallel(
    matrix: &Grid,
    pattern: &Grid,
    engines: &[EngineKind],
    limits: &RunLimits,
) -> Result<Vec<RunResult>, RaceError> {
    let (tx, rx) = unbounded::<(usize, Result<RunResult, GridError>)>();

    let failure = std::thread::scope(|s| {
        let mut handles = Vec::with_capacity(engines.len());
        let mut failure = None;
        for (idx, &kind) in engines.iter().enumerate() {
            let tx = tx.clone();
            let run_limits = limits.clone();
            let spawned = std::thread::Builder::new()
                .name(format!("gridseek-{}", kind.short_name().to_ascii_lowercase()))
                .spawn_scoped(s, move || {
                    let result = run_with_limits(kind, matrix, pattern, run_limits);
                    // the receiver outlives the scope, so send cannot fail
                    let _ = tx.send((idx, result));
                });
            match spawned {
                Ok(handle) => handles.push((kind, handle)),
                Err(e) => {
                    failure = Some(abort_on_spawn_failure(limits, kind, &e));
                    break;
                }
            }
        }
        for (kind, handle) in handles {
            if handle.join().is_err() && failure.is_none() {
                failure = Some(RaceError::WorkerPanicked { engine: kind });
            }
        }
        failure
    });
    drop(tx);
    if let Some(e) = failure {
        return Err(e);
    }

    let mut slots: Vec<Option<RunResult>> = vec![None; engines.len()];
    for (idx, result) in rx.try_iter() {
        slots[idx] = Some(result?);
    }
    slots
        .into_iter()
        .zip(engines)
        .map(|(slot, &engine)| slot.ok_or(RaceError::WorkerPanicked { engine }))
        .collect()
}

/// Stop the engines already running on `limits` and describe the failure.
/// Started threads still have to be joined by the caller.
fn abort_on_spawn_failure(limits: &RunLimits, engine: EngineKind, err: &io::Error) -> RaceError {
    if let Some(token) = &limits.cancel {
        token.cancel();
    }
    tracing::warn!(engine = engine.short_name(), error = %err, "worker spawn failed");
    RaceError::ThreadSpawnFailed {
        engine,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scenario() -> (Grid, Grid) {
        let m: Grid = "1 2 3 4 5\n6 7 8 2 3\n9 1 2 7 8\n3 2 3 1 2\n5 7 8 4 5"
            .parse()
            .unwrap();
        let p: Grid = "2 3\n7 8".parse().unwrap();
        (m, p)
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let (m, p) = scenario();
        let par = race(&m, &p, &RaceConfig::default()).unwrap();
        let seq = race(&m, &p, &RaceConfig::sequential()).unwrap();
        assert!(par.agreed() && seq.agreed());
        assert_eq!(par.match_counts(), seq.match_counts());
        assert_eq!(par.comparison_counts(), seq.comparison_counts());
        for (a, b) in par.results().iter().zip(seq.results()) {
            assert_eq!(a.trace, b.trace);
        }
    }

    #[test]
    fn results_follow_configured_order() {
        let (m, p) = scenario();
        let cfg = RaceConfig {
            engines: vec![EngineKind::AhoCorasick, EngineKind::Naive],
            ..RaceConfig::default()
        };
        let report = race(&m, &p, &cfg).unwrap();
        let order: Vec<_> = report.results().iter().map(|r| r.engine).collect();
        assert_eq!(order, vec![EngineKind::AhoCorasick, EngineKind::Naive]);
        assert!(report.get(EngineKind::Kmp).is_none());
    }

    #[test]
    fn invalid_input_fails_before_running() {
        let m = Grid::from_rows(&[&[1]]).unwrap();
        let p = Grid::from_rows(&[&[1, 2]]).unwrap();
        let err = race(&m, &p, &RaceConfig::default()).unwrap_err();
        assert!(matches!(err, RaceError::Grid(GridError::InvalidDimensions { .. })));
    }

    #[test]
    fn invalid_config_fails_before_running() {
        let (m, p) = scenario();
        let cfg = RaceConfig {
            engines: vec![],
            ..RaceConfig::default()
        };
        assert_eq!(
            race(&m, &p, &cfg).unwrap_err(),
            RaceError::Config(ConfigError::NoEngines)
        );
    }

    #[test]
    fn cancelled_race_reports_incomplete_runs() {
        let (m, p) = scenario();
        let token = CancelToken::new();
        token.cancel();
        let report = race_with_cancel(&m, &p, &RaceConfig::sequential(), token).unwrap();
        assert!(!report.all_complete());
        // no completed run, so nothing to disagree about
        assert!(report.agreed());
        assert!(report.anchors().is_empty());
    }

    #[test]
    fn generous_budget_completes() {
        let (m, p) = scenario();
        let cfg = RaceConfig {
            time_budget: Some(Duration::from_secs(60)),
            ..RaceConfig::default()
        };
        let report = race(&m, &p, &cfg).unwrap();
        assert!(report.all_complete());
        assert_eq!(report.anchors().len(), 3);
    }

    #[test]
    fn spawn_failure_cancels_shared_token() {
        let token = CancelToken::new();
        let limits = RunLimits::with_cancel(token.clone());
        let err = io::Error::new(io::ErrorKind::WouldBlock, "no threads left");
        let e = abort_on_spawn_failure(&limits, EngineKind::Kmp, &err);
        assert!(token.is_cancelled());
        assert_eq!(
            e,
            RaceError::ThreadSpawnFailed {
                engine: EngineKind::Kmp,
                reason: "no threads left".to_string(),
            }
        );
        assert!(e.to_string().contains("KMP"));
    }

    #[test]
    fn disagreement_display_lists_counts() {
        let e = RaceError::Disagreement {
            counts: vec![(EngineKind::Naive, 2), (EngineKind::BoyerMoore, 1)],
        };
        assert_eq!(e.to_string(), "engines disagree on matches: NAIVE=2 BM=1");
    }
}
