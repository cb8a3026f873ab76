//! FNV-1a hashing of step traces.
//!
//! Engines are deterministic, so two runs of the same engine over the same
//! input must hash equal. Wall-clock time is never hashed.

use gridseek_core::{EngineKind, RunResult, Step, StepOutcome, StepTrace};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

fn outcome_tag(outcome: StepOutcome) -> (u8, u64) {
    match outcome {
        StepOutcome::Match => (0, 0),
        StepOutcome::Mismatch => (1, 0),
        StepOutcome::Shift { by } => (2, by as u64),
        StepOutcome::Transition => (3, 0),
    }
}

fn engine_tag(engine: EngineKind) -> u8 {
    match engine {
        EngineKind::Naive => 0,
        EngineKind::RabinKarp => 1,
        EngineKind::Kmp => 2,
        EngineKind::BoyerMoore => 3,
        EngineKind::AhoCorasick => 4,
    }
}

/// Fold one step into a hash state.
pub(crate) fn step_hash(mut hash: u64, step: &Step) -> u64 {
    match step.anchor {
        Some(p) => {
            hash = fnv1a_byte(hash, 1);
            hash = fnv1a_u64(hash, p.row as u64);
            hash = fnv1a_u64(hash, p.col as u64);
        }
        None => hash = fnv1a_byte(hash, 0),
    }
    let (tag, by) = outcome_tag(step.outcome);
    hash = fnv1a_byte(hash, tag);
    hash = fnv1a_u64(hash, by);
    hash = fnv1a_u64(hash, step.cells.len() as u64);
    for cell in &step.cells {
        hash = fnv1a_u64(hash, cell.row as u64);
        hash = fnv1a_u64(hash, cell.col as u64);
        hash = fnv1a_byte(hash, cell.matched as u8);
    }
    hash = fnv1a_u64(hash, step.comparisons_so_far);
    fnv1a_u64(hash, step.matches_so_far)
}

/// Hash every step of `trace`, in order.
///
/// The step count is folded in first, so a trace and its prefix never
/// share a hash by construction. An empty trace hashes to a fixed
/// non-zero value.
pub fn trace_hash(trace: &StepTrace) -> u64 {
    let hash = fnv1a_u64(FNV_OFFSET, trace.len() as u64);
    trace.iter().fold(hash, step_hash)
}

/// Hash a run: engine identity, totals, completion status and trace.
pub fn result_hash(result: &RunResult) -> u64 {
    let mut hash = fnv1a_byte(FNV_OFFSET, engine_tag(result.engine));
    hash = fnv1a_u64(hash, result.total_matches);
    hash = fnv1a_u64(hash, result.total_comparisons);
    hash = fnv1a_byte(hash, result.is_complete() as u8);
    fnv1a_u64(hash, trace_hash(&result.trace))
}
