// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming substitution over a compiled [`Trie`].
//!
//! The matcher walks the trie one input byte at a time:
//! - no edge: flush pending bytes, emit the byte literally, restart at root;
//! - edge to a terminal node: emit its replacement, discard pending bytes,
//!   restart at root;
//! - edge to an inner node: buffer the byte and advance.
//!
//! At end of input, pending bytes are emitted unchanged.
//!
//! There are no failure links. The byte that breaks a partial match is never
//! retried as the start of a new match, and a shorter pattern fires before a
//! longer one sharing its prefix is considered.

use std::io::{self, Read, Write};

use serde::Deserialize;

use crate::pending::{PendingBuffer, QueueBuffer, RingBuffer};
use crate::trie::{StateId, Trie};

/// Read chunk size for [`translate`].
const CHUNK_SIZE: usize = 64 * 1024;

/// Counters for one translation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TranslateStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub matches: u64,
}

/// Which [`PendingBuffer`] implementation a translation uses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferKind {
    /// Fixed ring sized to the trie's max depth.
    #[default]
    Ring,
    /// Growable `VecDeque`.
    Queue,
}

/// Per-stream matching state over a shared trie.
///
/// The trie is only read, so any number of matchers can share one.
pub struct Matcher<'t, P = RingBuffer> {
    trie: &'t Trie,
    current: StateId,
    pending: P,
    stats: TranslateStats,
}

impl<'t> Matcher<'t, RingBuffer> {
    /// Create a matcher with a ring buffer sized to the trie.
    pub fn new(trie: &'t Trie) -> Self {
        Self::with_buffer(trie, RingBuffer::with_capacity(trie.max_depth()))
    }
}

impl<'t> Matcher<'t, QueueBuffer> {
    /// Create a matcher with a growable queue.
    pub fn with_queue(trie: &'t Trie) -> Self {
        Self::with_buffer(trie, QueueBuffer::new())
    }
}

impl<'t, P: PendingBuffer> Matcher<'t, P> {
    /// Create a matcher using `pending` as scratch; it must be empty.
    pub fn with_buffer(trie: &'t Trie, mut pending: P) -> Self {
        pending.clear();
        Self {
            trie,
            current: StateId::ROOT,
            pending,
            stats: TranslateStats::default(),
        }
    }

    /// Consume one input byte, writing whatever it decides to `out`.
    pub fn step<W: Write + ?Sized>(&mut self, byte: u8, out: &mut W) -> io::Result<()> {
        let trie = self.trie;
        self.stats.bytes_in += 1;

        let Some(next) = trie.step(self.current, byte) else {
            self.stats.bytes_out += self.pending.len() as u64 + 1;
            if !self.pending.is_empty() {
                tracing::trace!(pending = self.pending.len(), "mismatch, flushing");
            }
            self.pending.drain_into(out)?;
            out.write_all(&[byte])?;
            self.current = StateId::ROOT;
            return Ok(());
        };

        match trie.replacement(next) {
            Some(replacement) => {
                tracing::trace!(state = %next, len = replacement.len(), "match");
                out.write_all(replacement)?;
                self.pending.clear();
                self.current = StateId::ROOT;
                self.stats.bytes_out += replacement.len() as u64;
                self.stats.matches += 1;
            }
            None => {
                self.pending.push(byte);
                self.current = next;
            }
        }
        Ok(())
    }

    /// Feed every byte of `input`.
    pub fn feed<W: Write + ?Sized>(&mut self, input: &[u8], out: &mut W) -> io::Result<()> {
        input.iter().try_for_each(|&byte| self.step(byte, out))
    }

    /// End the stream: restore any unfinished candidate verbatim.
    ///
    /// The matcher is reset and can be reused for another stream.
    pub fn finish<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<TranslateStats> {
        self.stats.bytes_out += self.pending.len() as u64;
        self.pending.drain_into(out)?;
        self.current = StateId::ROOT;
        Ok(std::mem::take(&mut self.stats))
    }

    /// Current trie state; the root between episodes.
    pub fn state(&self) -> StateId {
        self.current
    }

    /// Number of bytes held for the current candidate.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Translate everything readable from `input` into `output`.
///
/// Reads in chunks and does not flush `output`; wrap it in a `BufWriter` for
/// file targets.
pub fn translate<R, W>(
    trie: &Trie,
    kind: BufferKind,
    input: &mut R,
    output: &mut W,
) -> io::Result<TranslateStats>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    match kind {
        BufferKind::Ring => run(Matcher::new(trie), input, output),
        BufferKind::Queue => run(Matcher::with_queue(trie), input, output),
    }
}

fn run<P, R, W>(
    mut matcher: Matcher<'_, P>,
    input: &mut R,
    output: &mut W,
) -> io::Result<TranslateStats>
where
    P: PendingBuffer,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = match input.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        matcher.feed(&chunk[..n], output)?;
    }
    matcher.finish(output)
}

/// Translate an in-memory byte slice with the default buffer.
pub fn translate_bytes(trie: &Trie, input: &[u8]) -> Vec<u8> {
    translate_bytes_with(trie, BufferKind::default(), input)
}

/// Translate an in-memory byte slice with the chosen buffer.
pub fn translate_bytes_with(trie: &Trie, kind: BufferKind, input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    // Reading a slice and writing a Vec never return an io error, so the
    // fallback is unreachable.
    translate(trie, kind, &mut &input[..], &mut out)
        .map(|_| out)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
