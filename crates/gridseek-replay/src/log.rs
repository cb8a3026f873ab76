//! Plain-text match log export.
//!
//! ```text
//! MATCH: (0, 1)          single run: one line per matching step
//! KMP: (0, 1)            race: engine-prefixed, in lockstep tick order
//! FINAL SUMMARY
//! [KMP] Matches:3 Comps:41
//! ```

use std::io::{BufRead, Write};

use gridseek_core::{EngineKind, RunResult};

use crate::error::ReplayError;
use crate::playback::RacePlayback;

/// Line that opens the summary block.
pub const SUMMARY_HEADER: &str = "FINAL SUMMARY";

/// One `[NAME] Matches:N Comps:N` line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummaryLine {
    /// Engine named on the line.
    pub engine: EngineKind,
    /// Reported matches.
    pub matches: u64,
    /// Reported comparisons.
    pub comparisons: u64,
}

impl SummaryLine {
    fn of(result: &RunResult) -> Self {
        Self {
            engine: result.engine,
            matches: result.total_matches,
            comparisons: result.total_comparisons,
        }
    }
}

fn write_summary<W: Write>(out: &mut W, results: &[RunResult]) -> Result<(), ReplayError> {
    writeln!(out, "{SUMMARY_HEADER}")?;
    for line in results.iter().map(SummaryLine::of) {
        writeln!(
            out,
            "[{}] Matches:{} Comps:{}",
            line.engine.short_name(),
            line.matches,
            line.comparisons
        )?;
    }
    Ok(())
}

/// Write the match log of a single run.
pub fn write_match_log<W: Write>(out: &mut W, result: &RunResult) -> Result<(), ReplayError> {
    for step in result.trace.iter().filter(|s| s.is_match()) {
        if let Some(anchor) = step.anchor {
            writeln!(out, "MATCH: {anchor}")?;
        }
    }
    write_summary(out, std::slice::from_ref(result))?;
    out.flush()?;
    Ok(())
}

/// Write the match log of a race. Matches appear in the order lockstep
/// playback reveals them; within a tick, in `results` order.
pub fn write_race_log<W: Write>(out: &mut W, results: &[RunResult]) -> Result<(), ReplayError> {
    let mut playback = RacePlayback::new(results);
    let mut lines = 0usize;
    while playback.tick() {
        for (engine, step) in playback.stepped() {
            if let (true, Some(anchor)) = (step.is_match(), step.anchor) {
                writeln!(out, "{}: {anchor}", engine.short_name())?;
                lines += 1;
            }
        }
    }
    write_summary(out, results)?;
    out.flush()?;
    tracing::debug!(engines = results.len(), match_lines = lines, "race log written");
    Ok(())
}

/// Read the summary block back from an exported log.
///
/// Lines before [`SUMMARY_HEADER`] are skipped; blank lines after it are
/// ignored. A log without a summary yields an empty list.
///
/// # Errors
///
/// [`ReplayError::UnknownEngine`] for an unrecognised engine name,
/// [`ReplayError::MalformedLog`] for any other unparseable summary line.
pub fn parse_summary<R: BufRead>(reader: R) -> Result<Vec<SummaryLine>, ReplayError> {
    let mut in_summary = false;
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if !in_summary {
            in_summary = text == SUMMARY_HEADER;
            continue;
        }
        if text.is_empty() {
            continue;
        }
        out.push(parse_summary_line(text).map_err(|e| match e {
            LineError::UnknownEngine(name) => ReplayError::UnknownEngine { name },
            LineError::Malformed => ReplayError::MalformedLog {
                line: idx + 1,
                text: text.to_string(),
            },
        })?);
    }
    Ok(out)
}

enum LineError {
    UnknownEngine(String),
    Malformed,
}

fn parse_summary_line(text: &str) -> Result<SummaryLine, LineError> {
    let (name, rest) = text
        .strip_prefix('[')
        .and_then(|t| t.split_once(']'))
        .ok_or(LineError::Malformed)?;
    let engine: EngineKind = name
        .parse()
        .map_err(|_| LineError::UnknownEngine(name.to_string()))?;

    let mut fields = rest.split_whitespace();
    let mut field = |key: &str| -> Result<u64, LineError> {
        fields
            .next()
            .and_then(|f| f.strip_prefix(key))
            .and_then(|n| n.parse().ok())
            .ok_or(LineError::Malformed)
    };
    let matches = field("Matches:")?;
    let comparisons = field("Comps:")?;
    if fields.next().is_some() {
        return Err(LineError::Malformed);
    }
    Ok(SummaryLine {
        engine,
        matches,
        comparisons,
    })
}
