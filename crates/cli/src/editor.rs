// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled rule table plus the file-level translation modes.
//!
//! - [`Target::Copy`] streams `src` into a separate `dst`.
//! - [`Target::InPlace`] translates `src` fully into memory, then overwrites
//!   it. The overwrite is the last step, so any earlier failure leaves the
//!   source untouched.
//! - [`Target::Stdio`] filters stdin to stdout.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::matcher::{self, BufferKind, TranslateStats};
use crate::rules::{self, MalformedPolicy, RuleLine};
use crate::trie::Trie;

/// Display name used for stdin/stdout in errors.
const STDIO_NAME: &str = "<stdio>";

/// One unit of work for the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Write the translation of `src` to `dst`.
    Copy { src: PathBuf, dst: PathBuf },
    /// Replace `src` with its translation.
    InPlace(PathBuf),
    /// Translate stdin to stdout.
    Stdio,
}

impl Target {
    /// Copy target writing next to `src` with `suffix` appended.
    pub fn copy_with_suffix(src: &Path, suffix: &str) -> Self {
        let mut dst = src.as_os_str().to_os_string();
        dst.push(suffix);
        Target::Copy {
            src: src.to_path_buf(),
            dst: PathBuf::from(dst),
        }
    }
}

/// A rule table ready to translate any number of targets.
#[derive(Debug, Clone)]
pub struct Editor {
    trie: Trie,
    buffer: BufferKind,
}

impl Editor {
    pub fn new(trie: Trie, buffer: BufferKind) -> Self {
        Self { trie, buffer }
    }

    /// Compile parsed rules, in order.
    pub fn from_rules(rules: &[RuleLine], buffer: BufferKind) -> Self {
        Self::new(rules::compile(rules), buffer)
    }

    /// Load and compile a rule file.
    pub fn load(path: &Path, policy: MalformedPolicy, buffer: BufferKind) -> Result<Self> {
        let rules = rules::load_rules(path, policy)?;
        Ok(Self::from_rules(&rules, buffer))
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Run one target.
    pub fn translate(&self, target: &Target) -> Result<TranslateStats> {
        let stats = match target {
            Target::Copy { src, dst } => self.translate_to(src, dst)?,
            Target::InPlace(src) => self.translate_in_place(src)?,
            Target::Stdio => {
                let stdin = io::stdin();
                let mut stdout = BufWriter::new(io::stdout().lock());
                self.translate_stream(&mut stdin.lock(), &mut stdout)?
            }
        };
        tracing::info!(
            target = ?target,
            bytes_in = stats.bytes_in,
            bytes_out = stats.bytes_out,
            matches = stats.matches,
            "translated"
        );
        Ok(stats)
    }

    /// Stream `src` into a new or truncated `dst`.
    pub fn translate_to(&self, src: &Path, dst: &Path) -> Result<TranslateStats> {
        let input = File::open(src).map_err(|e| io_error(src, e))?;
        let output = File::create(dst).map_err(|e| io_error(dst, e))?;

        let mut reader = Source::new(BufReader::new(input));
        let mut writer = BufWriter::new(output);

        let stats = matcher::translate(&self.trie, self.buffer, &mut reader, &mut writer)
            .map_err(|e| io_error(if reader.failed { src } else { dst }, e))?;
        writer.flush().map_err(|e| io_error(dst, e))?;
        Ok(stats)
    }

    /// Translate `src` in memory and overwrite it with the result.
    pub fn translate_in_place(&self, src: &Path) -> Result<TranslateStats> {
        let input = std::fs::read(src).map_err(|e| io_error(src, e))?;

        let mut output = Vec::with_capacity(input.len());
        let stats =
            matcher::translate(&self.trie, self.buffer, &mut input.as_slice(), &mut output)
                .map_err(|e| io_error(src, e))?;

        std::fs::write(src, &output).map_err(|e| io_error(src, e))?;
        Ok(stats)
    }

    /// Translate between arbitrary streams; `output` is flushed at the end.
    pub fn translate_stream<R, W>(&self, input: &mut R, output: &mut W) -> Result<TranslateStats>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let stats = matcher::translate(&self.trie, self.buffer, input, output)
            .and_then(|stats| output.flush().map(|()| stats))
            .map_err(|e| io_error(Path::new(STDIO_NAME), e))?;
        Ok(stats)
    }

    /// Translate a byte slice.
    pub fn translate_bytes(&self, input: &[u8]) -> Vec<u8> {
        matcher::translate_bytes_with(&self.trie, self.buffer, input)
    }
}

/// Reader that remembers whether it failed, so errors name the right file.
struct Source<R> {
    inner: R,
    failed: bool,
}

impl<R> Source<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            failed: false,
        }
    }
}

impl<R: Read> Read for Source<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).inspect_err(|e| {
            if e.kind() != io::ErrorKind::Interrupted {
                self.failed = true;
            }
        })
    }
}

fn io_error(path: &Path, source: io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
