// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule file parsing.
//!
//! A rule file holds one rule per line:
//!
//! ```text
//! "pattern" , "replacement"   trailing text is ignored
//! ```
//!
//! Leading whitespace and whitespace around the comma are optional. Lines
//! that do not have this shape (comments, blank lines, missing comma) are not
//! rules and are skipped silently. A line that starts a quoted literal but
//! holds a bad escape or never closes it is an error.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::escape::{EscapeError, decode_literal};
use crate::trie::{Registration, Trie};

/// One substitution rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: Vec<u8>,
    pub replacement: Vec<u8>,
}

/// A rule together with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine {
    pub line: usize,
    pub rule: Rule,
}

/// What to do with a line whose literal cannot be decoded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop loading and fail the whole rule file.
    #[default]
    Abort,
    /// Warn and skip the line, keep loading.
    Skip,
}

/// Parse one line of a rule file.
///
/// Returns `Ok(None)` when the line is not a rule.
pub fn parse_rule_line(line: &[u8]) -> std::result::Result<Option<Rule>, EscapeError> {
    let rest = skip_space(line);
    let Some((pattern, used)) = decode_literal(rest)? else {
        return Ok(None);
    };

    let rest = skip_space(&rest[used..]);
    let Some(rest) = rest.strip_prefix(b",") else {
        return Ok(None);
    };

    let rest = skip_space(rest);
    let Some((replacement, _)) = decode_literal(rest)? else {
        return Ok(None);
    };

    Ok(Some(Rule {
        pattern,
        replacement,
    }))
}

/// Parse every rule in `content`, in file order.
///
/// With [`MalformedPolicy::Abort`] the first undecodable literal fails the
/// whole parse. `path` is only used for error messages.
pub fn parse_rules(
    content: &[u8],
    path: &Path,
    policy: MalformedPolicy,
) -> Result<Vec<RuleLine>> {
    let mut rules = Vec::new();

    for (index, line) in lines(content).enumerate() {
        let line_no = index + 1;
        match parse_rule_line(line) {
            Ok(Some(rule)) => rules.push(RuleLine {
                line: line_no,
                rule,
            }),
            Ok(None) => {
                tracing::trace!(line = line_no, "not a rule, skipping");
            }
            Err(source) => match policy {
                MalformedPolicy::Abort => {
                    return Err(Error::Rule {
                        path: path.to_path_buf(),
                        line: line_no,
                        source,
                    });
                }
                MalformedPolicy::Skip => {
                    tracing::warn!(
                        path = %path.display(),
                        line = line_no,
                        error = %source,
                        "skipping malformed rule"
                    );
                }
            },
        }
    }

    Ok(rules)
}

/// Read and parse a rule file.
pub fn load_rules(path: &Path, policy: MalformedPolicy) -> Result<Vec<RuleLine>> {
    let content = std::fs::read(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loading rules");

    parse_rules(&content, path, policy)
}

/// Register rules into a fresh trie, in order.
pub fn compile(rules: &[RuleLine]) -> Trie {
    let mut trie = Trie::new();
    for RuleLine { line, rule } in rules {
        match trie.register(&rule.pattern, &rule.replacement) {
            Registration::Added(_) => {}
            Registration::Existing(state) => {
                tracing::debug!(
                    line,
                    %state,
                    pattern = %String::from_utf8_lossy(&rule.pattern),
                    "pattern already registered, keeping first"
                );
            }
            Registration::Empty => {
                tracing::debug!(line, "empty pattern ignored");
            }
        }
    }
    tracing::debug!(
        rules = rules.len(),
        patterns = trie.pattern_count(),
        states = trie.len(),
        max_depth = trie.max_depth(),
        "compiled rule table"
    );
    trie
}

/// Split on `\n`, keeping any `\r`. A trailing newline does not start an
/// extra line.
fn lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = Some(content).filter(|c| !c.is_empty());
    std::iter::from_fn(move || {
        let current = rest?;
        match memchr::memchr(b'\n', current) {
            Some(i) => {
                let next = &current[i + 1..];
                rest = Some(next).filter(|n| !n.is_empty());
                Some(&current[..i])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

fn skip_space(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !is_space(*b))
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// C `isspace` in the "C" locale.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
