// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose output logger for diagnostic information.
//!
//! Writes `[verbose]` prefixed lines to stderr, enabled with `--verbose`.

use std::path::Path;

use crate::editor::Target;

/// Verbose output logger. Writes to stderr with a `[verbose]` prefix.
/// All output is conditional on verbose mode being enabled.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a verbose line to stderr.
    pub fn log(&self, msg: &str) {
        if self.enabled {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Report which rule file was loaded and how many patterns it holds.
    pub fn rules_loaded(&self, path: &Path, patterns: usize) {
        if self.enabled {
            self.log(&format!(
                "loaded {} pattern(s) from {}",
                patterns,
                path.display()
            ));
        }
    }

    /// Announce a target before it is translated.
    pub fn target(&self, target: &Target) {
        if self.enabled {
            self.log(&describe(target));
        }
    }
}

/// One-line description of what a target does.
pub fn describe(target: &Target) -> String {
    match target {
        Target::Copy { src, dst } => format!(
            "translate from `{}` to `{}`",
            src.display(),
            dst.display()
        ),
        Target::InPlace(src) => format!("translate and replace locally `{}`", src.display()),
        Target::Stdio => "translate stdin to stdout".to_string(),
    }
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;
