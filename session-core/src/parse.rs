//! Scoresheet parsing
//!
//! Result submissions arrive as plain text, one line per player:
//!
//! ```text
//! /resultsubmit
//! @alice 12
//! bob -8
//! charlie -4
//! david 0
//! ```
//!
//! Parsing only splits names from deltas; matching usernames against the
//! player directory is the caller's concern.

use crate::types::ParsedLine;
use crate::{Error, Result};

/// Parse a single `name delta` score line
///
/// Accepts an optional leading `@` on the name and an optional explicit `+`
/// on the delta. The delta must be a whole number.
pub fn parse_score_line(line: &str) -> Result<ParsedLine> {
    let mut tokens = line.split_whitespace();

    let (name, delta) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), Some(delta), None) => (name, delta),
        _ => return Err(Error::InvalidScoreLine(line.trim().to_string())),
    };

    let username = name.strip_prefix('@').unwrap_or(name);
    if username.is_empty() {
        return Err(Error::InvalidScoreLine(line.trim().to_string()));
    }

    let delta: i64 = delta
        .parse()
        .map_err(|_| Error::InvalidScoreLine(line.trim().to_string()))?;

    Ok(ParsedLine {
        username: username.to_string(),
        delta,
    })
}

/// Parse a whole scoresheet submission
///
/// Lenient: the command line (leading `/`), blank lines, and malformed lines
/// are skipped. Submission flows re-prompt with a usage template when
/// nothing parses.
pub fn parse_scoresheet(text: &str) -> Vec<ParsedLine> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('/'))
        .filter_map(|line| parse_score_line(line).ok())
        .collect()
}
