//! Instrumented 2D pattern matching engines.
//!
//! Five engines implement [`MatchEngine`] over the same input and emit the
//! same [`StepTrace`](gridseek_core::StepTrace) schema:
//!
//! - [`Naive`]: compare every pattern cell at every anchor (the oracle)
//! - [`RabinKarp`]: rolling additive checksum pre-filter, then verify
//! - [`Kmp`]: KMP row filter on the first pattern row, then verify
//! - [`BoyerMoore`]: bad-character skips on the first pattern row, then verify
//! - [`AhoCorasick`]: one automaton pass per matrix row, then vertical alignment
//!
//! [`engine_for`] maps an [`EngineKind`] to its engine; [`race`] runs a
//! selection of engines over one input, sequentially or on scoped threads,
//! and checks that they agree.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aho_corasick;
pub mod boyer_moore;
pub mod config;
pub mod dispatch;
pub mod kmp;
pub mod naive;
pub mod rabin_karp;
pub mod race;
pub(crate) mod verify;

pub use aho_corasick::AhoCorasick;
pub use boyer_moore::BoyerMoore;
pub use config::{ConfigError, RaceConfig, RaceMode};
pub use dispatch::{engine_for, run, run_with_limits};
pub use gridseek_core::{EngineKind, MatchEngine};
pub use kmp::Kmp;
pub use naive::Naive;
pub use rabin_karp::RabinKarp;
pub use race::{race, race_with_cancel, RaceError, RaceReport};
