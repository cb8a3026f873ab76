//! Playback and post-run analysis of gridseek step traces.
//!
//! Traces are produced in full by the engines before anything is shown;
//! this crate walks them afterwards.
//!
//! # Architecture
//!
//! - [`TraceCursor`] steps through one run forward, back, or to an index
//! - [`RacePlayback`] advances several runs in lockstep by step index
//! - [`trace_hash`] and [`compare_traces`] check that two runs are identical
//! - [`compare_match_sets`] reports anchors found by one run but not another
//! - [`write_match_log`] and [`write_race_log`] export the match log to any
//!   `Write` sink; [`parse_summary`] reads its summary block back

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod hash;
pub mod log;
pub mod playback;

pub use compare::{compare_match_sets, compare_traces, DivergenceReport, MatchSetDiff};
pub use error::ReplayError;
pub use hash::{result_hash, trace_hash};
pub use log::{parse_summary, write_match_log, write_race_log, SummaryLine, SUMMARY_HEADER};
pub use playback::{LaneState, RacePlayback, TraceCursor};
