//! Aho-Corasick-derived matcher: multi-row automaton plus vertical alignment.
//!
//! Every pattern row is one word of a dictionary. The automaton is a trie
//! over integer symbols with breadth-first failure links, stored as a node
//! arena addressed by index. Each matrix row is scanned through it once,
//! and every report of pattern row `r` ending at column `c` is recorded as
//! "row `r` starts at `c - w + 1`" for that matrix row.
//!
//! A 2D match at `(i, j)` requires that matrix row `i + r` recorded
//! pattern row `r` specifically at column `j`, for every `r`. Hits are
//! therefore keyed by pattern-row id, not just by column: two identical
//! pattern rows share a trie node, and that node reports both ids.

use std::collections::VecDeque;

use indexmap::IndexMap;
use smallvec::SmallVec;

use gridseek_core::{
    CellMark, CellMarks, EngineKind, Grid, MatchEngine, MatchInput, Position, StepOutcome,
    TraceRecorder,
};

/// Index of a node in the automaton arena.
type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
struct Node {
    goto: IndexMap<i64, NodeId>,
    fail: NodeId,
    /// Pattern-row ids recognised on reaching this node, own ids first.
    out: SmallVec<[usize; 2]>,
}

/// Trie with failure links and aggregated output sets.
#[derive(Debug)]
pub(crate) struct Automaton {
    nodes: Vec<Node>,
}

impl Automaton {
    /// Build the automaton over every row of `pattern`.
    ///
    /// Returns the automaton and its construction cost: one unit per
    /// transition lookup while inserting rows and while resolving
    /// failure links.
    pub(crate) fn build(pattern: &Grid) -> (Self, u64) {
        let mut nodes = vec![Node::default()];
        let mut cost = 0u64;

        for (row_id, row) in pattern.rows().enumerate() {
            let mut state = ROOT;
            for &sym in row {
                cost += 1;
                state = match nodes[state].goto.get(&sym) {
                    Some(&next) => next,
                    None => {
                        let next = nodes.len();
                        nodes.push(Node::default());
                        nodes[state].goto.insert(sym, next);
                        next
                    }
                };
            }
            nodes[state].out.push(row_id);
        }

        let mut queue: VecDeque<NodeId> = nodes[ROOT].goto.values().copied().collect();
        while let Some(parent) = queue.pop_front() {
            let edges: Vec<(i64, NodeId)> =
                nodes[parent].goto.iter().map(|(&s, &n)| (s, n)).collect();
            for (sym, child) in edges {
                queue.push_back(child);
                let mut f = nodes[parent].fail;
                let fail = loop {
                    cost += 1;
                    if let Some(&next) = nodes[f].goto.get(&sym) {
                        break next;
                    }
                    if f == ROOT {
                        break ROOT;
                    }
                    f = nodes[f].fail;
                };
                nodes[child].fail = fail;
                let inherited = nodes[fail].out.clone();
                nodes[child].out.extend(inherited);
            }
        }

        (Self { nodes }, cost)
    }

    /// Follow one symbol from `state`, falling back along failure links.
    ///
    /// Returns the new state and the number of transition lookups made.
    fn step(&self, mut state: NodeId, sym: i64) -> (NodeId, u64) {
        let mut cost = 0u64;
        loop {
            cost += 1;
            if let Some(&next) = self.nodes[state].goto.get(&sym) {
                return (next, cost);
            }
            if state == ROOT {
                return (ROOT, cost);
            }
            state = self.nodes[state].fail;
        }
    }

    fn outputs(&self, state: NodeId) -> &[usize] {
        &self.nodes[state].out
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Pattern-row ids recorded as starting at each column of one matrix row.
type RowHits = Vec<SmallVec<[usize; 2]>>;

/// Multi-row automaton matcher.
///
/// Emits one [`StepOutcome::Transition`] step (no anchor) per scanned
/// matrix row, marking the columns where some pattern row starts, then
/// one step per anchor for the alignment check. Each alignment check is
/// charged one comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct AhoCorasick;

impl MatchEngine for AhoCorasick {
    fn kind(&self) -> EngineKind {
        EngineKind::AhoCorasick
    }

    fn scan(&self, input: &MatchInput<'_>, recorder: &mut TraceRecorder) {
        let matrix = input.matrix();
        let (h, w) = input.pattern().dims();

        let (automaton, build_cost) = Automaton::build(input.pattern());
        recorder.charge(build_cost);
        tracing::trace!(nodes = automaton.len(), build_cost, "automaton built");
        recorder.reserve(matrix.height() + input.anchor_count());

        let mut hits: Vec<RowHits> = Vec::with_capacity(matrix.height());
        for i in 0..matrix.height() {
            if recorder.should_stop() {
                return;
            }
            let (row_hits, cost) = scan_row(&automaton, matrix.row(i), w, input.anchor_cols());
            recorder.charge(cost);
            let marks: CellMarks = row_hits
                .iter()
                .enumerate()
                .filter(|(_, ids)| !ids.is_empty())
                .map(|(col, _)| CellMark::new(i, col, true))
                .collect();
            recorder.record(None, StepOutcome::Transition, marks);
            hits.push(row_hits);
        }

        for i in 0..input.anchor_rows() {
            if recorder.should_stop() {
                return;
            }
            for j in 0..input.anchor_cols() {
                let mut marks = CellMarks::new();
                let mut ok = true;
                for r in 0..h {
                    recorder.charge(1);
                    let aligned = hits[i + r][j].contains(&r);
                    marks.push(CellMark::new(i + r, j, aligned));
                    if !aligned {
                        ok = false;
                        break;
                    }
                }
                let outcome = if ok {
                    StepOutcome::Match
                } else {
                    StepOutcome::Mismatch
                };
                recorder.record(Some(Position::new(i, j)), outcome, marks);
            }
        }
    }
}

/// Run one matrix row through the automaton.
///
/// Returns, per start column, the ids of pattern rows that occur there,
/// plus the scan cost.
fn scan_row(automaton: &Automaton, text: &[i64], width: usize, cols: usize) -> (RowHits, u64) {
    let mut row_hits: RowHits = vec![SmallVec::new(); cols];
    let mut state = ROOT;
    let mut cost = 0u64;
    for (col, &sym) in text.iter().enumerate() {
        let (next, step_cost) = automaton.step(state, sym);
        state = next;
        cost += step_cost;
        // every dictionary word has length `width`, so col + 1 >= width here
        for &row_id in automaton.outputs(state) {
            row_hits[col + 1 - width].push(row_id);
        }
    }
    (row_hits, cost)
}
