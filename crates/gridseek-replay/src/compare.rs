//! Trace comparison: hash-first step equality and match-set differences.

use std::collections::BTreeSet;

use gridseek_core::{Position, Step, StepTrace};

use crate::error::ReplayError;
use crate::hash::trace_hash;

/// First point at which two equal-length traces differ.
#[derive(Clone, Debug, PartialEq)]
pub struct DivergenceReport {
    /// Index of the first differing step.
    pub first_index: usize,
    /// Total number of differing steps.
    pub divergent_steps: usize,
    /// The recorded step at `first_index`.
    pub recorded: Step,
    /// The replayed step at `first_index`.
    pub replayed: Step,
}

/// Compare a replayed trace against a recorded one.
///
/// Fast path: if the hashes agree, returns `Ok(None)`. Otherwise the
/// traces are walked step by step to locate the divergence.
///
/// # Errors
///
/// [`ReplayError::LengthMismatch`] if the traces have different lengths,
/// since steps cannot then be paired.
pub fn compare_traces(
    recorded: &StepTrace,
    replayed: &StepTrace,
) -> Result<Option<DivergenceReport>, ReplayError> {
    if trace_hash(recorded) == trace_hash(replayed) && recorded == replayed {
        return Ok(None);
    }
    if recorded.len() != replayed.len() {
        return Err(ReplayError::LengthMismatch {
            recorded: recorded.len(),
            replayed: replayed.len(),
        });
    }

    let mut diverged = recorded
        .iter()
        .zip(replayed.iter())
        .enumerate()
        .filter(|(_, (a, b))| a != b);
    let Some((first_index, (rec, rep))) = diverged.next() else {
        return Ok(None);
    };
    let report = DivergenceReport {
        first_index,
        divergent_steps: 1 + diverged.count(),
        recorded: rec.clone(),
        replayed: rep.clone(),
    };
    tracing::debug!(
        first_index,
        divergent_steps = report.divergent_steps,
        "traces diverge"
    );
    Ok(Some(report))
}

/// Anchors reported by only one side of a comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSetDiff {
    /// Matched on the left only, sorted.
    pub only_left: Vec<Position>,
    /// Matched on the right only, sorted.
    pub only_right: Vec<Position>,
}

impl MatchSetDiff {
    /// `true` if both sides matched the same anchors.
    pub fn is_empty(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty()
    }
}

/// Set difference of the matching anchors of two traces, ignoring order.
pub fn compare_match_sets(left: &StepTrace, right: &StepTrace) -> MatchSetDiff {
    let l: BTreeSet<Position> = left.matching_anchors().into_iter().collect();
    let r: BTreeSet<Position> = right.matching_anchors().into_iter().collect();
    MatchSetDiff {
        only_left: l.difference(&r).copied().collect(),
        only_right: r.difference(&l).copied().collect(),
    }
}
