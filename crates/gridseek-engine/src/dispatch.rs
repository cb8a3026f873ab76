//! Engine selection by [`EngineKind`].

use gridseek_core::{EngineKind, Grid, GridError, MatchEngine, RunLimits, RunResult};

use crate::aho_corasick::AhoCorasick;
use crate::boyer_moore::BoyerMoore;
use crate::kmp::Kmp;
use crate::naive::Naive;
use crate::rabin_karp::RabinKarp;

/// The engine implementing `kind`.
///
/// # Examples
///
/// ```
/// use gridseek_engine::{engine_for, EngineKind};
///
/// for kind in EngineKind::ALL {
///     assert_eq!(engine_for(kind).kind(), kind);
/// }
/// ```
pub fn engine_for(kind: EngineKind) -> &'static dyn MatchEngine {
    match kind {
        EngineKind::Naive => &Naive,
        EngineKind::RabinKarp => &RabinKarp,
        EngineKind::Kmp => &Kmp,
        EngineKind::BoyerMoore => &BoyerMoore,
        EngineKind::AhoCorasick => &AhoCorasick,
    }
}

/// Run one engine over `matrix` and `pattern` to completion.
///
/// # Errors
///
/// [`GridError::InvalidDimensions`] if the pattern does not fit.
///
/// # Examples
///
/// ```
/// use gridseek_core::{Grid, Position};
/// use gridseek_engine::{run, EngineKind};
///
/// let m: Grid = "1 2\n3 4".parse().unwrap();
/// let p: Grid = "4".parse().unwrap();
/// let result = run(EngineKind::Kmp, &m, &p).unwrap();
/// assert_eq!(result.trace.matching_anchors(), vec![Position::new(1, 1)]);
/// ```
pub fn run(kind: EngineKind, matrix: &Grid, pattern: &Grid) -> Result<RunResult, GridError> {
    engine_for(kind).run(matrix, pattern)
}

/// Run one engine under cancellation and deadline limits.
pub fn run_with_limits(
    kind: EngineKind,
    matrix: &Grid,
    pattern: &Grid,
    limits: RunLimits,
) -> Result<RunResult, GridError> {
    engine_for(kind).run_with_limits(matrix, pattern, limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridseek_core::{CancelToken, RunStatus};

    #[test]
    fn oversize_pattern_fails_for_every_engine() {
        let m = Grid::from_rows(&[&[1, 2], &[3, 4]]).unwrap();
        let p = Grid::from_rows(&[&[1, 2, 3]]).unwrap();
        for kind in EngineKind::ALL {
            assert!(matches!(
                run(kind, &m, &p),
                Err(GridError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn pre_cancelled_run_is_marked() {
        let m = Grid::new(vec![vec![1; 8]; 8]).unwrap();
        let p = Grid::from_rows(&[&[1]]).unwrap();
        let token = CancelToken::new();
        token.cancel();
        for kind in EngineKind::ALL {
            let result =
                run_with_limits(kind, &m, &p, RunLimits::with_cancel(token.clone())).unwrap();
            assert_eq!(result.status, RunStatus::Cancelled, "{kind}");
            assert!(result.trace.is_empty(), "{kind}");
            assert!(!result.is_complete());
        }
    }

    #[test]
    fn result_carries_engine_identity() {
        let m = Grid::from_rows(&[&[1, 2], &[3, 4]]).unwrap();
        let p = Grid::from_rows(&[&[9]]).unwrap();
        let result = run(EngineKind::AhoCorasick, &m, &p).unwrap();
        assert_eq!(result.engine, EngineKind::AhoCorasick);
        assert_eq!(result.engine_name(), "Aho-Corasick");
        assert_eq!(result.total_matches, 0);
    }
}
