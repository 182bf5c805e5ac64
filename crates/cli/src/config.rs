//! Configuration parsing and validation.
//!
//! Handles bsed.toml parsing with version validation and unknown key warnings.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::matcher::BufferKind;
use crate::rules::MalformedPolicy;

/// Config file name looked up by discovery.
pub const CONFIG_FILE_NAME: &str = "bsed.toml";

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Rule file lookup and loading.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Translation output.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[rules]` section.
#[derive(Debug, Deserialize)]
pub struct RulesConfig {
    /// Directory searched for rule names. Relative to the config file.
    pub dir: Option<PathBuf>,

    /// Suffix appended when a rule name has none (default: `.rule`).
    #[serde(default = "RulesConfig::default_suffix")]
    pub suffix: String,

    /// Handling of undecodable literals: abort or skip.
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            suffix: Self::default_suffix(),
            on_malformed: MalformedPolicy::default(),
        }
    }
}

impl RulesConfig {
    pub(crate) fn default_suffix() -> String {
        ".rule".to_string()
    }
}

/// `[output]` section.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Suffix for translated copies (default: `.ts`).
    #[serde(default = "OutputConfig::default_suffix")]
    pub suffix: String,

    /// Pending buffer implementation: ring or queue.
    #[serde(default)]
    pub buffer: BufferKind,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: Self::default_suffix(),
            buffer: BufferKind::default(),
        }
    }
}

impl OutputConfig {
    pub(crate) fn default_suffix() -> String {
        ".ts".to_string()
    }
}

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known keys per section; `""` is the top level.
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("", &["version", "rules", "output"]),
    ("rules", &["dir", "suffix", "on_malformed"]),
    ("output", &["suffix", "buffer"]),
];

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config = parse(&content, path)?;
    resolve_relative_dir(&mut config, path);
    Ok(config)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config = parse_with_warnings(&content, path)?;
    resolve_relative_dir(&mut config, path);
    Ok(config)
}

/// Parse config from string content (strict mode).
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    // First check version
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade bsed to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let config = parse(content, path)?;

    for key in unknown_keys(content) {
        warn_unknown_key(path, &key);
    }

    Ok(config)
}

/// Dotted names of keys bsed does not recognize.
///
/// Unparseable content yields no keys; [`parse`] reports that error.
pub fn unknown_keys(content: &str) -> Vec<String> {
    let Ok(table) = content.parse::<toml::Table>() else {
        return Vec::new();
    };

    let mut unknown = Vec::new();
    collect_unknown("", &table, &mut unknown);
    for (section, _) in KNOWN_KEYS.iter().filter(|(s, _)| !s.is_empty()) {
        if let Some(toml::Value::Table(inner)) = table.get(*section) {
            collect_unknown(section, inner, &mut unknown);
        }
    }
    unknown
}

fn collect_unknown(section: &str, table: &toml::Table, unknown: &mut Vec<String>) {
    let known = KNOWN_KEYS
        .iter()
        .find(|(s, _)| *s == section)
        .map(|(_, keys)| *keys)
        .unwrap_or_default();

    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            if section.is_empty() {
                unknown.push(key.clone());
            } else {
                unknown.push(format!("{}.{}", section, key));
            }
        }
    }
}

/// Make `rules.dir` relative to the directory holding the config file.
fn resolve_relative_dir(config: &mut Config, path: &Path) {
    let Some(dir) = &config.rules.dir else {
        return;
    };
    if dir.is_relative() {
        if let Some(base) = path.parent() {
            config.rules.dir = Some(base.join(dir));
        }
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "bsed: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
