//! String rendering.
//!
//! Precision caps the number of bytes taken from the value; width pads the
//! result. Strings align left unless asked otherwise, and `=` has no sign to
//! split around so it behaves like `>`.

use super::Padding;
use crate::sink::Sink;
use crate::spec::{Align, FormatSpec};

/// Render `value` according to `spec`.
pub fn render_str(sink: &mut dyn Sink, spec: &FormatSpec, value: &[u8]) -> usize {
    let take = spec
        .precision
        .map_or(value.len(), |p| p.min(value.len()));
    let body = &value[..take];

    let align = match spec.align {
        Align::None => Align::Left,
        Align::AfterSign => Align::Right,
        other => other,
    };
    let pad = Padding::split(align, spec.min_width(), body.len());
    let fill = spec.fill_byte();

    sink.write_repeated(fill, pad.lead);
    sink.write_bytes(body);
    sink.write_repeated(fill, pad.tail);
    pad.total(body.len())
}
