// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locate strings: compact textual cursor specifications.
//!
//! Grammar: `path:line`, `path:line-line`, `path:line:col`, each optionally
//! suffixed with a `@name` symbol anchor. Line and column numbers are
//! 1-based.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("Invalid locate string: {0}")]
    Syntax(String),

    #[error("Line numbers must be positive integers")]
    NonPositive,

    #[error("Start line ({start}) cannot be greater than end line ({end})")]
    RangeOrder { start: u32, end: u32 },
}

/// The cursor portion of a locate string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineScope {
    /// A whole line: `path:12`.
    Line(u32),
    /// An inclusive line range: `path:12-20`.
    Range(u32, u32),
    /// A line and column: `path:12:4`.
    Position { line: u32, col: u32 },
}

/// A parsed locate string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locate {
    pub file_path: PathBuf,
    pub scope: LineScope,
    /// Optional symbol-name anchor (`@name` suffix).
    pub anchor: Option<String>,
}

impl Locate {
    /// Parse a locate string. Path existence is not checked here; callers
    /// validate and absolutize the path separately.
    pub fn parse(input: &str) -> Result<Self, LocateError> {
        let (spec, anchor) = split_anchor(input);

        let (head, last) = spec
            .rsplit_once(':')
            .ok_or_else(|| LocateError::Syntax(format!("missing ':line' in '{input}'")))?;
        if head.is_empty() {
            return Err(LocateError::Syntax(format!("missing path in '{input}'")));
        }

        // `path:line:col` when the segment before the last colon is numeric.
        if let Some((path, line)) = head.rsplit_once(':') {
            if let (Ok(line), Ok(col)) = (line.parse::<u32>(), last.parse::<u32>()) {
                if path.is_empty() {
                    return Err(LocateError::Syntax(format!("missing path in '{input}'")));
                }
                return Ok(Self {
                    file_path: PathBuf::from(path),
                    scope: validated(LineScope::Position { line, col })?,
                    anchor,
                });
            }
        }

        let scope = if let Some((start, end)) = last.split_once('-') {
            let start = parse_line(start, input)?;
            let end = parse_line(end, input)?;
            LineScope::Range(start, end)
        } else {
            LineScope::Line(parse_line(last, input)?)
        };

        Ok(Self { file_path: PathBuf::from(head), scope: validated(scope)?, anchor })
    }
}

impl std::fmt::Display for Locate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_path.display())?;
        match self.scope {
            LineScope::Line(line) => write!(f, ":{line}")?,
            LineScope::Range(start, end) => write!(f, ":{start}-{end}")?,
            LineScope::Position { line, col } => write!(f, ":{line}:{col}")?,
        }
        if let Some(anchor) = &self.anchor {
            write!(f, "@{anchor}")?;
        }
        Ok(())
    }
}

/// Split a trailing `@name` anchor off the spec. Only a suffix after the last
/// colon counts, so `@` inside the path is left alone.
fn split_anchor(input: &str) -> (&str, Option<String>) {
    match input.rsplit_once('@') {
        Some((spec, anchor))
            if !anchor.is_empty() && !anchor.contains([':', '/']) && spec.contains(':') =>
        {
            (spec, Some(anchor.to_string()))
        }
        _ => (input, None),
    }
}

fn parse_line(s: &str, input: &str) -> Result<u32, LocateError> {
    s.parse::<u32>()
        .map_err(|_| LocateError::Syntax(format!("'{s}' is not a line number in '{input}'")))
}

fn validated(scope: LineScope) -> Result<LineScope, LocateError> {
    match scope {
        LineScope::Line(line) if line == 0 => Err(LocateError::NonPositive),
        LineScope::Position { line, col } if line == 0 || col == 0 => Err(LocateError::NonPositive),
        LineScope::Range(start, end) if start == 0 || end == 0 => Err(LocateError::NonPositive),
        LineScope::Range(start, end) if start > end => Err(LocateError::RangeOrder { start, end }),
        _ => Ok(scope),
    }
}

#[cfg(test)]
#[path = "locate_tests.rs"]
mod tests;
