//! Error types for playback analysis and log export.

use std::fmt;
use std::io;

/// Errors from log I/O and trace comparison.
#[derive(Debug)]
pub enum ReplayError {
    /// An I/O error occurred while writing or reading a log.
    Io(io::Error),
    /// A summary line names an engine this build does not know.
    UnknownEngine {
        /// The name as it appeared in the log.
        name: String,
    },
    /// A summary line could not be parsed.
    MalformedLog {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// Two traces being compared step by step have different lengths.
    LengthMismatch {
        /// Steps in the recorded trace.
        recorded: usize,
        /// Steps in the replayed trace.
        replayed: usize,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnknownEngine { name } => write!(f, "unknown engine '{name}'"),
            Self::MalformedLog { line, text } => {
                write!(f, "malformed log line {line}: {text:?}")
            }
            Self::LengthMismatch { recorded, replayed } => write!(
                f,
                "trace length mismatch: recorded {recorded} steps, replayed {replayed}"
            ),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
