//! The closed set of matching engines.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Identifies one of the five matching engines.
///
/// The set is closed: adding an engine means adding a variant here, and
/// every `match` over `EngineKind` in the workspace fails to compile until
/// it is handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EngineKind {
    /// Brute-force comparison at every anchor. The reference oracle.
    Naive,
    /// Additive sub-block checksum pre-filter with mandatory verification.
    RabinKarp,
    /// KMP row filter on the first pattern row, then 2D verification.
    Kmp,
    /// Bad-character skips on the first pattern row, then 2D verification.
    BoyerMoore,
    /// Multi-row automaton scan plus vertical alignment of row hits.
    AhoCorasick,
}

impl EngineKind {
    /// Every engine, in canonical race order.
    pub const ALL: [EngineKind; 5] = [
        EngineKind::Naive,
        EngineKind::RabinKarp,
        EngineKind::Kmp,
        EngineKind::BoyerMoore,
        EngineKind::AhoCorasick,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Naive => "Naive",
            Self::RabinKarp => "Rabin-Karp",
            Self::Kmp => "KMP",
            Self::BoyerMoore => "Boyer-Moore",
            Self::AhoCorasick => "Aho-Corasick",
        }
    }

    /// Short upper-case tag used in match logs.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Naive => "NAIVE",
            Self::RabinKarp => "RK",
            Self::Kmp => "KMP",
            Self::BoyerMoore => "BM",
            Self::AhoCorasick => "AHO",
        }
    }

    /// Whether the engine emits exactly one anchored step per valid anchor.
    ///
    /// Boyer-Moore skips anchors, so its anchored step count is bounded
    /// above by the anchor count instead.
    pub fn emits_every_anchor(self) -> bool {
        !matches!(self, Self::BoyerMoore)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown engine name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEngineError {
    /// The input that did not name an engine.
    pub input: String,
}

impl fmt::Display for ParseEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown engine '{}' (expected naive, rk, kmp, bm, or aho)",
            self.input
        )
    }
}

impl Error for ParseEngineError {}

/// Accepts short tags (`rk`, `bm`, `aho`) and full names
/// (`rabin-karp`, `boyer-moore`, `aho-corasick`), case-insensitively.
impl FromStr for EngineKind {
    type Err = ParseEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(Self::Naive),
            "rk" | "rabin-karp" | "rabinkarp" => Ok(Self::RabinKarp),
            "kmp" => Ok(Self::Kmp),
            "bm" | "boyer-moore" | "boyermoore" => Ok(Self::BoyerMoore),
            "aho" | "aho-corasick" | "ahocorasick" => Ok(Self::AhoCorasick),
            _ => Err(ParseEngineError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_short_and_long_names() {
        assert_eq!("rk".parse::<EngineKind>().unwrap(), EngineKind::RabinKarp);
        assert_eq!("BM".parse::<EngineKind>().unwrap(), EngineKind::BoyerMoore);
        assert_eq!(
            "Aho-Corasick".parse::<EngineKind>().unwrap(),
            EngineKind::AhoCorasick
        );
        assert_eq!(" kmp ".parse::<EngineKind>().unwrap(), EngineKind::Kmp);
    }

    #[test]
    fn parse_unknown_name() {
        let err = "zalgo".parse::<EngineKind>().unwrap_err();
        assert_eq!(err.input, "zalgo");
        assert!(err.to_string().contains("zalgo"));
    }

    #[test]
    fn names_parse_back() {
        for kind in EngineKind::ALL {
            assert_eq!(kind.name().parse::<EngineKind>().unwrap(), kind);
            assert_eq!(kind.short_name().parse::<EngineKind>().unwrap(), kind);
        }
    }

    #[test]
    fn only_boyer_moore_skips_anchors() {
        let skipping: Vec<_> = EngineKind::ALL
            .into_iter()
            .filter(|k| !k.emits_every_anchor())
            .collect();
        assert_eq!(skipping, vec![EngineKind::BoyerMoore]);
    }
}
