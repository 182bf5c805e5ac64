// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Translate command implementation.

use std::path::{Path, PathBuf};

use bsed::cli::Cli;
use bsed::config::{self, Config};
use bsed::discovery;
use bsed::editor::{Editor, Target};
use bsed::error::{Error, ExitCode};
use bsed::rules::MalformedPolicy;
use bsed::verbose::VerboseLogger;

/// Load the rule file, then translate every target in argument order.
///
/// The first failing target stops the run; earlier targets keep their output.
pub fn run(cli: &Cli, rule: &Path) -> anyhow::Result<ExitCode> {
    let verbose = VerboseLogger::new(cli.verbose);

    if cli.in_place && cli.files.is_empty() {
        return Err(Error::Argument("--in-place requires at least one FILE".to_string()).into());
    }

    let cwd = std::env::current_dir()?;

    let config = match discovery::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            verbose.log(&format!("config: {}", path.display()));
            config::load_with_warnings(&path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let suffix = cli.suffix.as_deref().unwrap_or(&config.output.suffix);
    if !cli.in_place && !cli.files.is_empty() && suffix.is_empty() {
        return Err(Error::Argument(
            "empty output suffix would overwrite the input; use --in-place".to_string(),
        )
        .into());
    }

    let rule_dir = rule_dir(cli, &config)?;
    let rule_path =
        discovery::resolve_rule_path(rule, &cwd, &rule_dir, &config.rules.suffix)?;

    let policy = if cli.skip_malformed {
        MalformedPolicy::Skip
    } else {
        config.rules.on_malformed
    };
    let editor = Editor::load(&rule_path, policy, config.output.buffer)?;
    verbose.rules_loaded(&rule_path, editor.trie().pattern_count());

    for target in targets(cli, suffix) {
        verbose.target(&target);
        editor.translate(&target)?;
    }

    Ok(ExitCode::Success)
}

/// Rule directory: flag or env, then config, then beside the executable.
fn rule_dir(cli: &Cli, config: &Config) -> Result<PathBuf, Error> {
    if let Some(dir) = cli.rule_dir.as_ref().or(config.rules.dir.as_ref()) {
        return Ok(dir.clone());
    }
    discovery::default_rule_dir()
        .ok_or_else(|| Error::Internal("cannot locate the executable directory".to_string()))
}

fn targets(cli: &Cli, suffix: &str) -> Vec<Target> {
    if cli.files.is_empty() {
        return vec![Target::Stdio];
    }
    cli.files
        .iter()
        .map(|file| {
            if cli.in_place {
                Target::InPlace(file.clone())
            } else {
                Target::copy_with_suffix(file, suffix)
            }
        })
        .collect()
}
