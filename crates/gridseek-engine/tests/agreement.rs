//! Cross-engine agreement against an independent brute-force oracle.

use gridseek_core::{EngineKind, Grid};
use gridseek_engine::{race, run, RaceConfig};
use gridseek_test_utils::{brute_force_anchors, grid, known_scenario, plant, random_grid, Preset};
use proptest::prelude::*;

fn sorted(mut v: Vec<gridseek_core::Position>) -> Vec<gridseek_core::Position> {
    v.sort_unstable();
    v
}

#[test]
fn every_preset_agrees_with_oracle() {
    for preset in Preset::ALL {
        let (m, p) = preset.build();
        let expected = brute_force_anchors(&m, &p);
        for kind in EngineKind::ALL {
            let result = run(kind, &m, &p).unwrap();
            assert_eq!(
                sorted(result.trace.matching_anchors()),
                expected,
                "{kind} on {}",
                preset.name()
            );
            assert_eq!(result.total_matches, expected.len() as u64);
        }
    }
}

#[test]
fn known_scenario_in_race() {
    let (m, p) = known_scenario();
    let report = race(&m, &p, &RaceConfig::default()).unwrap();
    assert!(report.agreed());
    for r in report.results() {
        assert_eq!(r.total_matches, 3, "{}", r.engine);
    }
}

#[test]
fn full_grid_pattern_matches_at_origin() {
    let m = grid("4 1 4\n2 2 2");
    for kind in EngineKind::ALL {
        let result = run(kind, &m, &m).unwrap();
        assert_eq!(result.total_matches, 1, "{kind}");
        assert_eq!(
            result.trace.matching_anchors(),
            vec![gridseek_core::Position::new(0, 0)]
        );
    }
}

#[test]
fn absent_value_finds_nothing() {
    let m = grid("1 2\n3 4");
    let p = grid("9");
    for kind in EngineKind::ALL {
        let result = run(kind, &m, &p).unwrap();
        assert_eq!(result.total_matches, 0, "{kind}");
        assert!(result.trace.matching_anchors().is_empty());
    }
}

#[test]
fn overlapping_matches_all_reported() {
    let m = random_grid(3, 6, 6, 7..=7);
    let p = grid("7 7 7\n7 7 7");
    for kind in EngineKind::ALL {
        assert_eq!(run(kind, &m, &p).unwrap().total_matches, 5 * 4, "{kind}");
    }
}

#[test]
fn repeated_pattern_rows() {
    // identical pattern rows share an automaton node
    let p = grid("1 2\n1 2\n3 3");
    let base = random_grid(11, 7, 7, 1..=3);
    let m = plant(&plant(&base, &p, (0, 0).into()), &p, (4, 5).into());
    let expected = brute_force_anchors(&m, &p);
    assert!(expected.len() >= 2);
    for kind in EngineKind::ALL {
        assert_eq!(sorted(run(kind, &m, &p).unwrap().trace.matching_anchors()), expected, "{kind}");
    }
}

fn small_case() -> impl Strategy<Value = (Grid, Grid)> {
    (1usize..=7, 1usize..=7, 0i64..=2, any::<u64>()).prop_flat_map(|(mh, mw, hi, seed)| {
        (1usize..=mh, 1usize..=mw, Just(seed)).prop_map(move |(ph, pw, seed)| {
            let m = random_grid(seed, mh, mw, 0..=hi);
            let p = random_grid(seed.wrapping_add(1), ph, pw, 0..=hi);
            (m, p)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn engines_match_oracle((m, p) in small_case()) {
        let expected = brute_force_anchors(&m, &p);
        for kind in EngineKind::ALL {
            let result = run(kind, &m, &p).unwrap();
            prop_assert_eq!(sorted(result.trace.matching_anchors()), expected.clone(), "{}", kind);
            prop_assert_eq!(result.total_matches, expected.len() as u64);
        }
    }

    #[test]
    fn planted_pattern_is_found((m, p) in small_case(), r in any::<prop::sample::Index>(), c in any::<prop::sample::Index>()) {
        let at = gridseek_core::Position::new(
            r.index(m.height() - p.height() + 1),
            c.index(m.width() - p.width() + 1),
        );
        let m = plant(&m, &p, at);
        for kind in EngineKind::ALL {
            let anchors = run(kind, &m, &p).unwrap().trace.matching_anchors();
            prop_assert!(anchors.contains(&at), "{} missed {}", kind, at);
        }
    }
}
