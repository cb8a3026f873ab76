//! Runs stopped partway through a scan leave a consistent prefix.

use gridseek_core::{EngineKind, Grid, RunLimits, RunResult, RunStatus};
use gridseek_engine::{run, run_with_limits};
use gridseek_test_utils::{random_grid, Preset};
use proptest::prelude::*;

fn assert_prefix(kind: EngineKind, full: &RunResult, cut: &RunResult) {
    assert_eq!(cut.status, RunStatus::Cancelled, "{kind}");
    assert!(!cut.is_complete(), "{kind}");
    assert!(!cut.trace.is_empty(), "{kind}: stopped before the first step");
    assert!(cut.trace.len() < full.trace.len(), "{kind}: not a strict prefix");
    assert_eq!(
        cut.trace.steps(),
        &full.trace.steps()[..cut.trace.len()],
        "{kind}: diverged from the completed trace"
    );
    for pair in cut.trace.steps().windows(2) {
        assert!(pair[1].comparisons_so_far >= pair[0].comparisons_so_far, "{kind}");
        assert!(pair[1].matches_so_far >= pair[0].matches_so_far, "{kind}");
    }
    assert!(cut.total_comparisons >= cut.trace.final_comparisons(), "{kind}");
    assert_eq!(cut.total_matches, cut.trace.final_matches(), "{kind}");
}

#[test]
fn step_budget_stops_every_engine_mid_scan() {
    let (m, p) = Preset::RandomInt12x12.build();
    for kind in EngineKind::ALL {
        let full = run(kind, &m, &p).unwrap();
        let budget = full.trace.len() / 2;
        let cut = run_with_limits(kind, &m, &p, RunLimits::with_max_steps(budget)).unwrap();
        assert!(cut.trace.len() >= budget, "{kind}");
        assert_prefix(kind, &full, &cut);
    }
}

#[test]
fn stop_lands_on_a_row_checkpoint() {
    let (m, p) = Preset::Simple5x5.build();
    // four anchors per row; a budget of 5 is only seen at the start of row 2
    let full = run(EngineKind::Naive, &m, &p).unwrap();
    let cut = run_with_limits(EngineKind::Naive, &m, &p, RunLimits::with_max_steps(5)).unwrap();
    assert_eq!(cut.trace.len(), 8);
    assert_prefix(EngineKind::Naive, &full, &cut);
}

#[test]
fn budget_above_trace_length_completes() {
    let (m, p) = Preset::Binary8x8.build();
    for kind in EngineKind::ALL {
        let full = run(kind, &m, &p).unwrap();
        let capped = run_with_limits(kind, &m, &p, RunLimits::with_max_steps(usize::MAX)).unwrap();
        assert!(capped.is_complete(), "{kind}");
        assert_eq!(capped.trace, full.trace, "{kind}");
    }
}

fn tall_case() -> impl Strategy<Value = (Grid, Grid)> {
    (any::<u64>(), 4usize..=9, 3usize..=9, 1usize..=2, 1usize..=3).prop_map(
        |(seed, mh, mw, ph, pw)| {
            (
                random_grid(seed, mh, mw, 0..=2),
                random_grid(seed ^ 0xc0ff, ph, pw, 0..=2),
            )
        },
    )
}

proptest! {
    #[test]
    fn any_mid_scan_budget_yields_a_prefix((m, p) in tall_case(), frac in 0.05f64..0.33) {
        for kind in EngineKind::ALL {
            let full = run(kind, &m, &p).unwrap();
            // at least 3 anchor rows, so a budget under a third of the trace
            // is reached at a checkpoint before the final row
            let budget = ((full.trace.len() as f64 * frac) as usize).max(1);
            let cut = run_with_limits(kind, &m, &p, RunLimits::with_max_steps(budget)).unwrap();
            assert_prefix(kind, &full, &cut);
        }
    }
}
