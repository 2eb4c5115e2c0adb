//! # spfmt-core
//!
//! Brace-template formatting engine.
//!
//! Templates such as `"{0:+08} {:#x} {:-^9.4s}"` are scanned left to right,
//! each replacement field is parsed into a [`FormatSpec`] and rendered from a
//! slice of heterogeneous [`Argument`]s straight into a caller-supplied
//! [`Sink`]. Digit assembly happens in fixed stack buffers; the only heap use
//! is whatever the sink itself does.
//!
//! ```
//! use spfmt_core::{args, format_to_string};
//!
//! let out = format_to_string("{} {} {1} {} {1}", &args![0, 1, 2]);
//! assert_eq!(out, "0 1 1 2 1");
//! ```

#![deny(unsafe_code)]

pub mod arg;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod render;
pub mod scan;
pub mod sink;
pub mod spec;

pub use arg::{Argument, FormatValue};
pub use entry::{
    format, format_bytes, format_to_slice, format_to_string, format_to_vec, format_to_writer,
    print,
};
pub use error::FormatError;
pub use render::MAX_FLOAT_PRECISION;
pub use scan::{MAX_NESTING_DEPTH, NESTED_SPEC_CAPACITY};
pub use sink::{Sink, SliceSink, StackBuf, StreamSink};
pub use spec::{Align, FormatSpec, Sign};
