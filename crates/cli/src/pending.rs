// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Buffers for bytes consumed along an undecided trie path.
//!
//! While the matcher follows a partial match it holds the consumed bytes
//! here. On a mismatch they are drained to the output in order; on a match
//! they are discarded. The buffer never holds more than the trie's max depth
//! minus one, so a fixed ring of that size is enough. [`QueueBuffer`] and
//! [`RingBuffer`] produce identical output.

use std::collections::VecDeque;
use std::io::{self, Write};

/// FIFO byte container used by the matcher.
pub trait PendingBuffer {
    /// Append one byte.
    fn push(&mut self, byte: u8);

    /// Write every buffered byte to `out` in order, then clear.
    fn drain_into<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()>;

    /// Drop every buffered byte.
    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Growable queue backed by `VecDeque`.
#[derive(Debug, Default)]
pub struct QueueBuffer {
    bytes: VecDeque<u8>,
}

impl QueueBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue with room for `capacity` bytes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: VecDeque::with_capacity(capacity),
        }
    }
}

impl PendingBuffer for QueueBuffer {
    fn push(&mut self, byte: u8) {
        self.bytes.push_back(byte);
    }

    fn drain_into<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        let (front, back) = self.bytes.as_slices();
        out.write_all(front)?;
        out.write_all(back)?;
        self.bytes.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.bytes.clear();
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Fixed-capacity circular buffer.
///
/// Sized from the trie's max depth. Pushing into a full ring grows it rather
/// than dropping bytes, so an undersized capacity costs an allocation but
/// never changes output.
#[derive(Debug)]
pub struct RingBuffer {
    buf: Vec<u8>,
    head: usize,
    len: usize,
}

impl RingBuffer {
    /// Create an empty ring holding up to `capacity` bytes.
    ///
    /// A zero capacity is rounded up to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Buffered bytes as up to two slices in logical order.
    ///
    /// The second slice is the wrapped remainder and may be empty.
    pub fn segments(&self) -> (&[u8], &[u8]) {
        let cap = self.buf.len();
        if self.len <= cap - self.head {
            (&self.buf[self.head..self.head + self.len], &[])
        } else {
            let first = cap - self.head;
            (&self.buf[self.head..], &self.buf[..self.len - first])
        }
    }

    /// Double the capacity, unwrapping the contents to the front.
    fn grow(&mut self) {
        let mut buf = Vec::with_capacity(self.buf.len() * 2);
        let (front, back) = self.segments();
        buf.extend_from_slice(front);
        buf.extend_from_slice(back);
        buf.resize(self.buf.len() * 2, 0);
        self.buf = buf;
        self.head = 0;
    }
}

impl PendingBuffer for RingBuffer {
    fn push(&mut self, byte: u8) {
        if self.len == self.buf.len() {
            self.grow();
        }
        let tail = (self.head + self.len) % self.buf.len();
        self.buf[tail] = byte;
        self.len += 1;
    }

    fn drain_into<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        let (front, back) = self.segments();
        out.write_all(front)?;
        out.write_all(back)?;
        self.clear();
        Ok(())
    }

    /// Empty the ring in place; the next push continues where the last one
    /// left off.
    fn clear(&mut self) {
        self.head = (self.head + self.len) % self.buf.len();
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
