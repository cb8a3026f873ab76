//! Race configuration and validation.
//!
//! [`RaceConfig`] selects which engines run, whether they run on scoped
//! threads, and how long they may take. [`validate()`](RaceConfig::validate)
//! runs before any engine starts.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use gridseek_core::EngineKind;

// ── RaceMode ───────────────────────────────────────────────────────

/// How the race schedules its engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RaceMode {
    /// One engine after another on the calling thread.
    Sequential,
    /// One scoped thread per engine.
    #[default]
    Parallel,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`RaceConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The engine list is empty.
    NoEngines,
    /// An engine appears more than once.
    DuplicateEngine {
        /// The repeated engine.
        engine: EngineKind,
    },
    /// `time_budget` is zero, which would cancel every run immediately.
    ZeroTimeBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEngines => write!(f, "race needs at least one engine"),
            Self::DuplicateEngine { engine } => {
                write!(f, "engine {engine} selected more than once")
            }
            Self::ZeroTimeBudget => write!(f, "time_budget must be non-zero"),
        }
    }
}

impl Error for ConfigError {}

// ── RaceConfig ─────────────────────────────────────────────────────

/// Configuration for [`race`](crate::race::race).
#[derive(Clone, Debug)]
pub struct RaceConfig {
    /// Scheduling mode. Default: [`RaceMode::Parallel`].
    pub mode: RaceMode,
    /// Engines to run, in report order. Default: all five, canonical order.
    pub engines: Vec<EngineKind>,
    /// Wall-clock budget shared by every engine. Runs still going when it
    /// expires stop at their next checkpoint. Default: `None`.
    pub time_budget: Option<Duration>,
    /// Treat disagreeing match sets as an error rather than a flag on the
    /// report. Default: `true`.
    pub require_agreement: bool,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            mode: RaceMode::default(),
            engines: EngineKind::ALL.to_vec(),
            time_budget: None,
            require_agreement: true,
        }
    }
}

impl RaceConfig {
    /// A sequential race over all engines.
    pub fn sequential() -> Self {
        Self {
            mode: RaceMode::Sequential,
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engines.is_empty() {
            return Err(ConfigError::NoEngines);
        }
        for (idx, engine) in self.engines.iter().enumerate() {
            if self.engines[..idx].contains(engine) {
                return Err(ConfigError::DuplicateEngine { engine: *engine });
            }
        }
        if self.time_budget.is_some_and(|b| b.is_zero()) {
            return Err(ConfigError::ZeroTimeBudget);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_parallel_all_engines() {
        let cfg = RaceConfig::default();
        assert_eq!(cfg.mode, RaceMode::Parallel);
        assert_eq!(cfg.engines, EngineKind::ALL.to_vec());
        assert!(cfg.require_agreement);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_engines_rejected() {
        let cfg = RaceConfig {
            engines: vec![],
            ..RaceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoEngines));
    }

    #[test]
    fn duplicate_engine_rejected() {
        let cfg = RaceConfig {
            engines: vec![EngineKind::Kmp, EngineKind::Naive, EngineKind::Kmp],
            ..RaceConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::DuplicateEngine {
                engine: EngineKind::Kmp
            })
        );
    }

    #[test]
    fn zero_budget_rejected() {
        let cfg = RaceConfig {
            time_budget: Some(Duration::ZERO),
            ..RaceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTimeBudget));
        assert!(cfg.validate().unwrap_err().to_string().contains("non-zero"));
    }
}
