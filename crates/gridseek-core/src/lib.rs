//! Core types and traits for the gridseek 2D pattern matching engine.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! fundamental abstractions shared by every engine and by playback:
//! grids and anchors, the step trace model, run summaries, error types,
//! and the [`MatchEngine`] contract.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod id;
pub mod run;
pub mod trace;
pub mod traits;

pub use error::GridError;
pub use grid::{Grid, MatchInput, Position};
pub use id::{EngineKind, ParseEngineError};
pub use run::{CancelToken, RunLimits, RunResult, RunStatus};
pub use trace::{CellMark, CellMarks, Step, StepOutcome, StepTrace, TraceRecorder};
pub use traits::MatchEngine;
