// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery and rule file resolution.
//!
//! Config: walks from the current directory up to the git root looking for
//! bsed.toml.
//!
//! Rules: the rule argument is a path (absolute, or starting with `.`) or a
//! bare name looked up in the rule directory. Either way the rule suffix is
//! appended when the path as given is not a file.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, Result};

/// Directory next to the executable searched for rule names by default.
pub const DEFAULT_RULE_DIR: &str = "rule";

/// Find bsed.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "BSED_CONFIG")
/// 2. Discovery from current directory up to git root
/// 3. None (use defaults)
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            if path.exists() {
                Ok(Some(path.to_path_buf()))
            } else {
                Err(Error::Config {
                    message: format!("config file not found: {}", path.display()),
                    path: Some(path.to_path_buf()),
                })
            }
        }
        None => Ok(find_config(cwd)),
    }
}

/// The `rule` directory beside the running executable.
pub fn default_rule_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(DEFAULT_RULE_DIR))
}

/// Turn the rule argument into the path of a readable rule file.
///
/// - absolute paths are used as given;
/// - paths starting with `.` are relative to `cwd`;
/// - anything else is a name inside `rule_dir`.
///
/// If that path is not a file and does not already end in `suffix`, the
/// suffix is appended and the lookup retried.
pub fn resolve_rule_path(
    rule: &Path,
    cwd: &Path,
    rule_dir: &Path,
    suffix: &str,
) -> Result<PathBuf> {
    let base = if rule.is_absolute() {
        rule.to_path_buf()
    } else if rule.as_os_str().as_encoded_bytes().starts_with(b".") {
        cwd.join(rule)
    } else {
        rule_dir.join(rule)
    };

    if base.is_file() {
        return Ok(base);
    }

    let has_suffix = base
        .file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(suffix.as_bytes()));
    if !has_suffix && !suffix.is_empty() {
        let mut with_suffix = base.clone().into_os_string();
        with_suffix.push(suffix);
        let with_suffix = PathBuf::from(with_suffix);
        if with_suffix.is_file() {
            return Ok(with_suffix);
        }
        tracing::debug!(path = %with_suffix.display(), "rule file not found");
        return Err(Error::RuleNotFound { path: with_suffix });
    }

    Err(Error::RuleNotFound { path: base })
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
