//! Structural properties every engine's trace must satisfy.

use gridseek_core::{EngineKind, Grid, MatchInput, Position, StepOutcome};
use gridseek_engine::run;
use gridseek_test_utils::{grid, known_scenario, random_grid, Preset};
use proptest::prelude::*;

fn check_counters(kind: EngineKind, m: &Grid, p: &Grid) {
    let result = run(kind, m, p).unwrap();
    let mut prev = (0u64, 0u64);
    for step in &result.trace {
        assert!(step.comparisons_so_far >= prev.0, "{kind}: comparisons went down");
        assert!(step.matches_so_far >= prev.1, "{kind}: matches went down");
        let bump = u64::from(step.is_match());
        assert_eq!(step.matches_so_far, prev.1 + bump, "{kind}: match counter drift");
        prev = (step.comparisons_so_far, step.matches_so_far);
    }
    assert_eq!(result.trace.final_comparisons(), result.total_comparisons, "{kind}");
    assert_eq!(result.trace.final_matches(), result.total_matches, "{kind}");
}

#[test]
fn counters_monotone_on_presets() {
    for preset in Preset::ALL {
        let (m, p) = preset.build();
        for kind in EngineKind::ALL {
            check_counters(kind, &m, &p);
        }
    }
}

#[test]
fn exhaustive_engines_visit_every_anchor_once() {
    let (m, p) = known_scenario();
    let input = MatchInput::new(&m, &p).unwrap();
    for kind in EngineKind::ALL.into_iter().filter(|k| k.emits_every_anchor()) {
        let result = run(kind, &m, &p).unwrap();
        let mut anchors: Vec<Position> = result.trace.iter().filter_map(|s| s.anchor).collect();
        assert_eq!(anchors.len(), input.anchor_count(), "{kind}");
        // row-major, no repeats
        let copy = anchors.clone();
        anchors.sort_unstable();
        anchors.dedup();
        assert_eq!(anchors, copy, "{kind}");
    }
}

#[test]
fn boyer_moore_skips_anchors() {
    let m = grid("1 2 3 4 5 6 7 8 9");
    let p = grid("7 8 9");
    let result = run(EngineKind::BoyerMoore, &m, &p).unwrap();
    assert!(result.trace.anchored_steps() < 7);
    assert_eq!(result.trace.matching_anchors(), vec![Position::new(0, 6)]);
}

#[test]
fn marks_stay_inside_the_matrix() {
    let m = random_grid(42, 9, 11, 0..=1);
    let p = grid("1 0\n0 1");
    for kind in EngineKind::ALL {
        let result = run(kind, &m, &p).unwrap();
        for step in &result.trace {
            for cell in &step.cells {
                assert!(cell.row < m.height() && cell.col < m.width(), "{kind}");
            }
        }
    }
}

#[test]
fn match_steps_mark_the_whole_block() {
    let (m, p) = known_scenario();
    for kind in EngineKind::ALL.into_iter().filter(|&k| k != EngineKind::AhoCorasick) {
        let result = run(kind, &m, &p).unwrap();
        for step in result.trace.iter().filter(|s| s.outcome == StepOutcome::Match) {
            assert_eq!(step.cells.len(), p.area(), "{kind}");
            assert!(step.cells.iter().all(|c| c.matched), "{kind}");
        }
    }
}

#[test]
fn width_one_boyer_moore_stress() {
    let m = random_grid(5, 40, 40, 0..=1);
    let p = grid("1\n1\n0");
    let result = run(EngineKind::BoyerMoore, &m, &p).unwrap();
    let naive = run(EngineKind::Naive, &m, &p).unwrap();
    assert_eq!(result.total_matches, naive.total_matches);
}

proptest! {
    #[test]
    fn counters_monotone_on_random_input(
        seed in any::<u64>(),
        (mh, mw) in (1usize..=6, 1usize..=6),
        hi in 0i64..=3,
    ) {
        let m = random_grid(seed, mh, mw, 0..=hi);
        let p = random_grid(seed ^ 0x5eed, mh.div_ceil(2), mw.div_ceil(2), 0..=hi);
        let anchors = MatchInput::new(&m, &p).unwrap().anchor_count();
        for kind in EngineKind::ALL {
            check_counters(kind, &m, &p);
            let visited = run(kind, &m, &p).unwrap().trace.anchored_steps();
            if kind.emits_every_anchor() {
                prop_assert_eq!(visited, anchors, "{} skipped or repeated an anchor", kind);
            } else {
                prop_assert!(visited <= anchors, "{} visited {} of {} anchors", kind, visited, anchors);
            }
        }
    }
}
