//! Output sinks.
//!
//! The engine never owns its output: it pushes byte runs through [`Sink`]
//! and leaves truncation and failure bookkeeping to the sink.
//!
//! Adapters shipped with the crate:
//! - `Vec<u8>`: growable, never fails.
//! - [`SliceSink`]: caller-owned fixed buffer. Keeps the stored prefix
//!   NUL-terminated and reports the full length it would have needed.
//! - [`StreamSink`]: any `io::Write`. The first failure is sticky.
//! - [`StackBuf`]: owned fixed array, used by the scanner for nested specs.

use std::io;

use crate::error::FormatError;

/// Destination for formatted bytes.
pub trait Sink {
    /// Write `data`, returning the number of bytes actually stored.
    fn write_bytes(&mut self, data: &[u8]) -> usize;

    /// Write a single byte.
    fn write_byte(&mut self, byte: u8) -> usize {
        self.write_bytes(&[byte])
    }

    /// Write `byte` repeated `count` times.
    fn write_repeated(&mut self, byte: u8, count: usize) -> usize {
        const CHUNK: usize = 64;
        let run = [byte; CHUNK];
        let mut remaining = count;
        let mut stored = 0;
        while remaining > 0 {
            let n = remaining.min(CHUNK);
            stored += self.write_bytes(&run[..n]);
            remaining -= n;
        }
        stored
    }
}

impl Sink for Vec<u8> {
    fn write_bytes(&mut self, data: &[u8]) -> usize {
        self.extend_from_slice(data);
        data.len()
    }
}

// ---------------------------------------------------------------------------
// Fixed caller buffer
// ---------------------------------------------------------------------------

/// Sink over a caller-owned byte slice.
///
/// Invariants:
/// - `stored < buf.len()` and `buf[stored] == 0` whenever `buf` is non-empty
/// - `stored <= len`
/// - nothing past `buf.len()` is ever touched
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    stored: usize,
    len: usize,
}

impl<'a> SliceSink<'a> {
    /// Wrap `buf`. The first byte is cleared so an empty result is a valid
    /// C string.
    pub fn new(buf: &'a mut [u8]) -> Self {
        if let Some(first) = buf.first_mut() {
            *first = 0;
        }
        Self {
            buf,
            stored: 0,
            len: 0,
        }
    }

    /// Full logical length written, including anything that did not fit.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes actually stored (excluding the terminator).
    pub fn stored(&self) -> usize {
        self.stored
    }

    /// True once some output did not fit.
    pub fn is_truncated(&self) -> bool {
        self.len > self.stored
    }

    /// Stored bytes, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.stored]
    }
}

impl Sink for SliceSink<'_> {
    fn write_bytes(&mut self, data: &[u8]) -> usize {
        self.len = self.len.saturating_add(data.len());
        if self.buf.is_empty() {
            return 0;
        }
        let room = self.buf.len() - 1 - self.stored;
        let n = room.min(data.len());
        self.buf[self.stored..self.stored + n].copy_from_slice(&data[..n]);
        self.stored += n;
        self.buf[self.stored] = 0;
        n
    }

    /// Fills what is left of the buffer and counts the rest.
    fn write_repeated(&mut self, byte: u8, count: usize) -> usize {
        self.len = self.len.saturating_add(count);
        if self.buf.is_empty() {
            return 0;
        }
        let room = self.buf.len() - 1 - self.stored;
        let n = room.min(count);
        self.buf[self.stored..self.stored + n].fill(byte);
        self.stored += n;
        self.buf[self.stored] = 0;
        n
    }
}

// ---------------------------------------------------------------------------
// Owned fixed buffer
// ---------------------------------------------------------------------------

/// Fixed-size owned buffer. Silently truncates, but keeps counting.
#[derive(Debug, Clone)]
pub struct StackBuf<const N: usize> {
    buf: [u8; N],
    stored: usize,
    len: usize,
}

impl<const N: usize> StackBuf<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            stored: 0,
            len: 0,
        }
    }

    /// Full logical length written.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes that fit.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.stored]
    }
}

impl<const N: usize> Default for StackBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Sink for StackBuf<N> {
    fn write_bytes(&mut self, data: &[u8]) -> usize {
        self.len = self.len.saturating_add(data.len());
        let n = (N - self.stored).min(data.len());
        self.buf[self.stored..self.stored + n].copy_from_slice(&data[..n]);
        self.stored += n;
        n
    }

    fn write_repeated(&mut self, byte: u8, count: usize) -> usize {
        self.len = self.len.saturating_add(count);
        let n = (N - self.stored).min(count);
        self.buf[self.stored..self.stored + n].fill(byte);
        self.stored += n;
        n
    }
}

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

/// Sink over an `io::Write`.
///
/// Once a write fails the sink stops touching the writer: later writes are
/// accepted and dropped, and the result stays failed.
#[derive(Debug)]
pub struct StreamSink<W: io::Write> {
    writer: W,
    len: usize,
    error: Option<io::Error>,
}

impl<W: io::Write> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            len: 0,
            error: None,
        }
    }

    /// Bytes written so far, or `-1` once a write has failed.
    pub fn result(&self) -> isize {
        if self.error.is_some() {
            -1
        } else {
            isize::try_from(self.len).unwrap_or(isize::MAX)
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Flush the writer and return the total length, or the first error.
    pub fn finish(mut self) -> Result<usize, FormatError> {
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        self.writer.flush()?;
        Ok(self.len)
    }
}

impl<W: io::Write> Sink for StreamSink<W> {
    fn write_bytes(&mut self, data: &[u8]) -> usize {
        if self.error.is_some() {
            return 0;
        }
        match self.writer.write_all(data) {
            Ok(()) => {
                self.len = self.len.saturating_add(data.len());
                data.len()
            }
            Err(err) => {
                self.error = Some(err);
                0
            }
        }
    }

    /// Stops at the first failed chunk.
    fn write_repeated(&mut self, byte: u8, count: usize) -> usize {
        const CHUNK: usize = 64;
        let run = [byte; CHUNK];
        let mut remaining = count;
        let mut stored = 0;
        while remaining > 0 && self.error.is_none() {
            let n = remaining.min(CHUNK);
            stored += self.write_bytes(&run[..n]);
            remaining -= n;
        }
        stored
    }
}
