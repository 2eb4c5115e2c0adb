//! Field index to argument.

use crate::arg::Argument;
use crate::sink::Sink;
use crate::spec::FormatSpec;

/// Render argument `index` with `spec`.
///
/// Returns `false` when `index` is past the end of `args` or the argument
/// rejects the spec's type byte. Nothing is written in either case.
pub fn dispatch(sink: &mut dyn Sink, spec: &FormatSpec, index: usize, args: &[Argument<'_>]) -> bool {
    match args.get(index) {
        Some(arg) => arg.format(sink, spec),
        None => false,
    }
}
