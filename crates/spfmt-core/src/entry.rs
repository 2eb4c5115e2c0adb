//! Top-level entry points: thin adapters that pick a sink and run the
//! scanner.

use std::io;

use crate::arg::Argument;
use crate::error::FormatError;
use crate::scan::scan;
use crate::sink::{Sink, SliceSink, StreamSink};

/// Format `template` into `sink`.
pub fn format(sink: &mut dyn Sink, template: &str, args: &[Argument<'_>]) {
    scan(sink, template.as_bytes(), args);
}

/// Format a byte template into `sink`.
pub fn format_bytes(sink: &mut dyn Sink, template: &[u8], args: &[Argument<'_>]) {
    scan(sink, template, args);
}

/// Format into a new byte vector.
pub fn format_to_vec(template: &str, args: &[Argument<'_>]) -> Vec<u8> {
    let mut out = Vec::with_capacity(template.len());
    scan(&mut out, template.as_bytes(), args);
    out
}

/// Format into a `String`. Precision can cut a multi-byte character in half,
/// so invalid sequences are replaced with U+FFFD.
pub fn format_to_string(template: &str, args: &[Argument<'_>]) -> String {
    match String::from_utf8(format_to_vec(template, args)) {
        Ok(s) => s,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Format into a caller buffer, `snprintf`-style.
///
/// At most `buf.len() - 1` bytes are stored and the result is always
/// NUL-terminated when `buf` is non-empty. Returns the length the complete
/// output needs, which exceeds `buf.len() - 1` when it was truncated.
pub fn format_to_slice(buf: &mut [u8], template: &str, args: &[Argument<'_>]) -> usize {
    let mut sink = SliceSink::new(buf);
    scan(&mut sink, template.as_bytes(), args);
    sink.len()
}

/// Format into any writer. Returns the number of bytes written, or the first
/// write error.
pub fn format_to_writer<W: io::Write>(
    writer: W,
    template: &str,
    args: &[Argument<'_>],
) -> Result<usize, FormatError> {
    let mut sink = StreamSink::new(writer);
    scan(&mut sink, template.as_bytes(), args);
    sink.finish()
}

/// Format to standard output.
pub fn print(template: &str, args: &[Argument<'_>]) -> Result<usize, FormatError> {
    format_to_writer(io::stdout().lock(), template, args)
}
