// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::Parser;

/// Rule-driven streaming byte substitution for files and pipes
#[derive(Parser)]
#[command(name = "bsed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Rule file: a path, or a name looked up in the rule directory
    #[arg(value_name = "RULE")]
    pub rule: Option<PathBuf>,

    /// Files to translate (stdin to stdout when none are given)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Replace each file with its translation
    #[arg(short = 'r', long = "in-place")]
    pub in_place: bool,

    /// Suffix for translated copies (default: .ts)
    #[arg(short, long, value_name = "SUFFIX", conflicts_with = "in_place")]
    pub suffix: Option<String>,

    /// Use specific config file
    #[arg(short = 'C', long = "config", env = "BSED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory searched for rule names
    #[arg(long, value_name = "DIR", env = "BSED_RULE_DIR")]
    pub rule_dir: Option<PathBuf>,

    /// Skip rule lines with malformed literals instead of failing
    #[arg(long)]
    pub skip_malformed: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
