//! gridseek: instrumented 2D pattern matching.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all gridseek sub-crates. Five engines search a matrix for every
//! occurrence of a smaller pattern, and each records a step-by-step trace
//! of the comparisons it made so runs can be replayed and compared.
//!
//! # Quick start
//!
//! ```rust
//! use gridseek::prelude::*;
//!
//! let matrix: Grid = "1 2 3 4 5\n6 7 8 2 3\n9 1 2 7 8\n3 2 3 1 2\n5 7 8 4 5"
//!     .parse()
//!     .unwrap();
//! let pattern: Grid = "2 3\n7 8".parse().unwrap();
//!
//! // One engine.
//! let result = run(EngineKind::Kmp, &matrix, &pattern).unwrap();
//! assert_eq!(
//!     result.trace.matching_anchors(),
//!     vec![Position::new(0, 1), Position::new(1, 3), Position::new(3, 1)]
//! );
//!
//! // All five, on scoped threads, checked for agreement.
//! let report = race(&matrix, &pattern, &RaceConfig::default()).unwrap();
//! assert!(report.agreed());
//!
//! // Replay them side by side.
//! let mut playback = RacePlayback::new(report.results());
//! while playback.tick() {}
//! assert!(!playback.is_active());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridseek-core` | Grids, positions, traces, run results, the engine trait |
//! | [`engine`] | `gridseek-engine` | The five engines and the race orchestrator |
//! | [`replay`] | `gridseek-replay` | Playback cursors, trace hashing and comparison, log export |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`gridseek-core`).
///
/// Contains [`types::Grid`], the trace model ([`types::Step`],
/// [`types::StepTrace`], [`types::TraceRecorder`]) and the
/// [`types::MatchEngine`] trait.
pub use gridseek_core as types;

/// Matching engines and the race orchestrator (`gridseek-engine`).
pub use gridseek_engine as engine;

/// Post-run playback and analysis (`gridseek-replay`).
///
/// Step through one run with [`replay::TraceCursor`] or several in
/// lockstep with [`replay::RacePlayback`].
pub use gridseek_replay as replay;

/// Common imports for typical gridseek usage.
///
/// ```rust
/// use gridseek::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gridseek_core::{
        CancelToken, CellMark, EngineKind, Grid, MatchEngine, Position, RunLimits, RunResult,
        RunStatus, Step, StepOutcome, StepTrace,
    };

    // Errors
    pub use gridseek_core::GridError;
    pub use gridseek_engine::{ConfigError, RaceError};
    pub use gridseek_replay::ReplayError;

    // Engines and race
    pub use gridseek_engine::{
        race, race_with_cancel, run, run_with_limits, RaceConfig, RaceMode, RaceReport,
    };

    // Playback
    pub use gridseek_replay::{write_match_log, write_race_log, RacePlayback, TraceCursor};
}
