//! Floating-point rendering.
//!
//! Notations follow C `printf`: `f` fixed, `e` scientific with an exponent
//! of at least two digits, `g` shortest of the two with trailing zeros
//! removed, and `%` fixed after scaling by 100. Without a type byte the
//! value is printed as `g` with the type's full decimal precision.
//!
//! Digit generation goes through `core::fmt`, which rounds exactly. The
//! text is assembled in a stack buffer and spills to the heap only for very
//! large fixed-notation output.

use core::fmt::{self, Write as _};

use super::Padding;
use super::int::render_digits;
use crate::sink::Sink;
use crate::spec::{Align, FormatSpec};

/// Stack scratch size for the digit text.
const FLOAT_BUF: usize = 512;

const DEFAULT_PRECISION: usize = 6;

/// Largest precision a float field honors. `core::fmt` rejects anything
/// above `u16::MAX`, and `%g` may ask for four more fractional digits than
/// its precision.
pub const MAX_FLOAT_PRECISION: usize = u16::MAX as usize - 4;

/// Floating-point types the renderer accepts.
pub trait FloatValue: Copy {
    /// Decimal digits the type represents exactly (`std::numeric_limits::digits10`).
    const DIGITS10: usize;

    fn to_f64(self) -> f64;

    /// `self * 100`, computed in the type's own precision.
    fn percent(self) -> f64;
}

impl FloatValue for f32 {
    const DIGITS10: usize = 6;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn percent(self) -> f64 {
        f64::from(self * 100.0)
    }
}

impl FloatValue for f64 {
    const DIGITS10: usize = 15;

    fn to_f64(self) -> f64 {
        self
    }

    fn percent(self) -> f64 {
        self * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Fixed,
    Exponent,
    General,
}

/// Render a float. `spec.ty` must be `None` or one of `e E f F g G %`.
pub fn render_float<F: FloatValue>(sink: &mut dyn Sink, spec: &FormatSpec, value: F) -> usize {
    let (notation, precision, scaled) = match spec.ty {
        Some(b'f' | b'F') => (
            Notation::Fixed,
            spec.precision.unwrap_or(DEFAULT_PRECISION),
            value.to_f64(),
        ),
        Some(b'e' | b'E') => (
            Notation::Exponent,
            spec.precision.unwrap_or(DEFAULT_PRECISION),
            value.to_f64(),
        ),
        Some(b'%') => (
            Notation::Fixed,
            spec.precision.unwrap_or(DEFAULT_PRECISION),
            value.percent(),
        ),
        _ => (
            Notation::General,
            spec.precision.map_or(F::DIGITS10, |p| p.max(1)),
            value.to_f64(),
        ),
    };
    let precision = precision.min(MAX_FLOAT_PRECISION);
    let upper = spec.is_uppercase();

    if !scaled.is_finite() {
        let word: &[u8] = match (scaled.is_nan(), upper) {
            (true, false) => b"nan",
            (true, true) => b"NAN",
            (false, false) => b"inf",
            (false, true) => b"INF",
        };
        let negative = !scaled.is_nan() && scaled.is_sign_negative();
        return emit(sink, spec, spec.sign_byte(negative), word, None, None);
    }

    let negative = scaled.is_sign_negative();
    let abs = scaled.abs();
    let mut text = Scratch::new();
    let exponent = match notation {
        Notation::Fixed => {
            fixed(&mut text, abs, precision);
            None
        }
        Notation::Exponent => Some(scientific(&mut text, abs, precision, upper)),
        Notation::General => general(&mut text, abs, precision, upper),
    };
    let suffix = (spec.ty == Some(b'%')).then_some(b'%');
    emit(
        sink,
        spec,
        spec.sign_byte(negative),
        text.as_bytes(),
        exponent,
        suffix,
    )
}

// ---------------------------------------------------------------------------
// Digit text
// ---------------------------------------------------------------------------

/// C-style exponent: marker, explicit sign, at least two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Exponent {
    marker: u8,
    value: i32,
}

impl Exponent {
    fn digits(&self, out: &mut [u8; 10]) -> usize {
        let n = render_digits(u64::from(self.value.unsigned_abs()), 10, false, out);
        if n < 2 {
            out[out.len() - 2] = b'0';
            2
        } else {
            n
        }
    }

    fn len(&self) -> usize {
        let mut digits = [0u8; 10];
        2 + self.digits(&mut digits)
    }

    fn write(&self, sink: &mut dyn Sink) {
        let mut digits = [0u8; 10];
        let n = self.digits(&mut digits);
        sink.write_byte(self.marker);
        sink.write_byte(if self.value < 0 { b'-' } else { b'+' });
        sink.write_bytes(&digits[digits.len() - n..]);
    }
}

fn fixed(text: &mut Scratch, abs: f64, precision: usize) {
    text.clear();
    // Scratch writes are infallible.
    let _ = write!(text, "{abs:.precision$}");
}

/// Write the mantissa of `abs` with `precision` fractional digits and
/// return its exponent.
fn scientific(text: &mut Scratch, abs: f64, precision: usize, upper: bool) -> Exponent {
    text.clear();
    let _ = write!(text, "{abs:.precision$e}");
    let value = text.split_exponent();
    Exponent {
        marker: if upper { b'E' } else { b'e' },
        value,
    }
}

/// `%g`: pick fixed or scientific from the decimal exponent, then drop
/// trailing zeros.
fn general(text: &mut Scratch, abs: f64, precision: usize, upper: bool) -> Option<Exponent> {
    let exp = scientific(text, abs, precision - 1, upper);
    let p = i64::try_from(precision).unwrap_or(i64::MAX);
    let x = i64::from(exp.value);
    if -4 <= x && x < p {
        // Bounded by p - 1 + 4.
        let decimals = usize::try_from(p - 1 - x).unwrap_or(0);
        fixed(text, abs, decimals);
        text.trim_fraction();
        None
    } else {
        text.trim_fraction();
        Some(exp)
    }
}

/// Write `[pad] sign [pad] text exponent suffix [pad]` and return its length.
fn emit(
    sink: &mut dyn Sink,
    spec: &FormatSpec,
    sign: Option<u8>,
    text: &[u8],
    exponent: Option<Exponent>,
    suffix: Option<u8>,
) -> usize {
    let sign_len = usize::from(sign.is_some());
    let content = sign_len
        + text.len()
        + exponent.map_or(0, |e| e.len())
        + usize::from(suffix.is_some());
    let align = match spec.align {
        Align::None => Align::Right,
        other => other,
    };
    let pad = Padding::split(align, spec.min_width(), content);
    let fill = spec.fill_byte();

    if align != Align::AfterSign {
        sink.write_repeated(fill, pad.lead);
    }
    if let Some(sign) = sign {
        sink.write_byte(sign);
    }
    if align == Align::AfterSign {
        sink.write_repeated(fill, pad.lead);
    }
    sink.write_bytes(text);
    if let Some(exp) = exponent {
        exp.write(sink);
    }
    if let Some(suffix) = suffix {
        sink.write_byte(suffix);
    }
    sink.write_repeated(fill, pad.tail);
    pad.total(content)
}

// ---------------------------------------------------------------------------
// Scratch buffer
// ---------------------------------------------------------------------------

/// `fmt::Write` target that lives on the stack until it runs out of room.
struct Scratch {
    stack: [u8; FLOAT_BUF],
    len: usize,
    spill: Option<Vec<u8>>,
}

impl Scratch {
    fn new() -> Self {
        Self {
            stack: [0u8; FLOAT_BUF],
            len: 0,
            spill: None,
        }
    }

    fn clear(&mut self) {
        self.len = 0;
        self.spill = None;
    }

    fn as_bytes(&self) -> &[u8] {
        match &self.spill {
            Some(heap) => heap,
            None => &self.stack[..self.len],
        }
    }

    fn truncate(&mut self, len: usize) {
        match &mut self.spill {
            Some(heap) => heap.truncate(len),
            None => self.len = self.len.min(len),
        }
    }

    /// Cut `...e<exp>` off the end and return the exponent.
    fn split_exponent(&mut self) -> i32 {
        let bytes = self.as_bytes();
        let Some(at) = bytes.iter().rposition(|&b| b == b'e') else {
            return 0;
        };
        let (negative, digits) = match &bytes[at + 1..] {
            [b'-', rest @ ..] => (true, rest),
            rest => (false, rest),
        };
        let mut value = 0_i32;
        for &d in digits {
            value = value.saturating_mul(10).saturating_add(i32::from(d - b'0'));
        }
        self.truncate(at);
        if negative { -value } else { value }
    }

    /// Drop trailing zeros after a decimal point, then the point itself.
    fn trim_fraction(&mut self) {
        let bytes = self.as_bytes();
        if !bytes.contains(&b'.') {
            return;
        }
        let mut end = bytes.len();
        while end > 0 && bytes[end - 1] == b'0' {
            end -= 1;
        }
        if end > 0 && bytes[end - 1] == b'.' {
            end -= 1;
        }
        self.truncate(end);
    }
}

impl fmt::Write for Scratch {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if let Some(heap) = &mut self.spill {
            heap.extend_from_slice(bytes);
        } else if self.len + bytes.len() <= FLOAT_BUF {
            self.stack[self.len..self.len + bytes.len()].copy_from_slice(bytes);
            self.len += bytes.len();
        } else {
            let mut heap = Vec::with_capacity(self.len + bytes.len());
            heap.extend_from_slice(&self.stack[..self.len]);
            heap.extend_from_slice(bytes);
            self.spill = Some(heap);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FloatValue>(spec: &[u8], value: F) -> String {
        let spec = FormatSpec::parse(spec).unwrap();
        let mut out = Vec::new();
        let n = render_float(&mut out, &spec, value);
        assert_eq!(n, out.len());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn fixed_notation() {
        assert_eq!(render(b"f", 2.34567_f64), "2.345670");
        assert_eq!(render(b".2f", 2.34567_f64), "2.35");
        assert_eq!(render(b".0f", 2.7_f64), "3");
        assert_eq!(render(b"F", 1.0_f64), "1.000000");
    }

    #[test]
    fn exponent_notation() {
        assert_eq!(render(b"e", 12345.678_f64), "1.234568e+04");
        assert_eq!(render(b".2E", 0.000123_f64), "1.23E-04");
        assert_eq!(render(b".0e", 5.0_f64), "5e+00");
        assert_eq!(render(b"e", 1e300_f64), "1.000000e+300");
        assert_eq!(render(b"e", 0.0_f64), "0.000000e+00");
    }

    #[test]
    fn general_notation() {
        assert_eq!(render(b"g", 0.5_f64), "0.5");
        assert_eq!(render(b"g", 100000.0_f64), "100000");
        assert_eq!(render(b".6g", 1e6_f64), "1e+06");
        assert_eq!(render(b".3g", 0.0001234_f64), "0.000123");
        assert_eq!(render(b".3g", 0.00001234_f64), "1.23e-05");
        assert_eq!(render(b".0g", 2.4_f64), "2");
        assert_eq!(render(b"G", 1e-10_f64), "1E-10");
        assert_eq!(render(b"g", 0.0_f64), "0");
    }

    #[test]
    fn no_type_uses_full_precision() {
        assert_eq!(render(b"", 1.5_f64), "1.5");
        assert_eq!(render(b"", 0.1_f64), "0.1");
        assert_eq!(render(b"", 1.0_f64 / 3.0), "0.333333333333333");
        assert_eq!(render(b"", 1.0_f32 / 3.0), "0.333333");
        assert_eq!(render(b"", 1e20_f64), "1e+20");
    }

    #[test]
    fn percent() {
        assert_eq!(render(b"%", 0.25_f64), "25.000000%");
        assert_eq!(render(b".1%", 0.125_f64), "12.5%");
        assert_eq!(render(b".0%", 0.5_f32), "50%");
    }

    #[test]
    fn signs_and_padding() {
        assert_eq!(render(b"+.1f", 2.0_f64), "+2.0");
        assert_eq!(render(b" .1f", 2.0_f64), " 2.0");
        assert_eq!(render(b"8.2f", -2.34567_f64), "   -2.35");
        assert_eq!(render(b"08.2f", -2.34567_f64), "-0002.35");
        assert_eq!(render(b"=+8.1f", 1.5_f64), "+    1.5");
        assert_eq!(render(b"*<8.1f", 1.5_f64), "1.5*****");
        assert_eq!(render(b"^7.1f", 1.5_f64), "  1.5  ");
    }

    #[test]
    fn negative_zero_keeps_its_sign() {
        assert_eq!(render(b".1f", -0.0_f64), "-0.0");
    }

    #[test]
    fn non_finite() {
        assert_eq!(render(b"", f64::NAN), "nan");
        assert_eq!(render(b"E", f64::NAN), "NAN");
        assert_eq!(render(b"f", f64::INFINITY), "inf");
        assert_eq!(render(b"F", f64::NEG_INFINITY), "-INF");
        assert_eq!(render(b"+", f64::NAN), "+nan");
        assert_eq!(render(b"6", f64::INFINITY), "   inf");
        assert_eq!(render(b"%", f64::INFINITY), "inf");
    }

    #[test]
    fn long_fixed_output_spills_to_heap() {
        let out = render(b"f", 1e300_f64);
        assert_eq!(out.len(), 301 + 7);
        assert!(out.starts_with("100000000000000005"));
        assert!(out.ends_with(".000000"));
        let long = render(b".600f", 1.0_f64);
        assert_eq!(long.len(), 602);
    }

    #[test]
    fn oversized_precision_is_capped() {
        let fixed = render(b".70000f", 1.0_f64);
        assert_eq!(fixed.len(), 2 + MAX_FLOAT_PRECISION);
        assert!(fixed.starts_with("1.0000"));
        assert!(fixed.ends_with('0'));

        let sci = render(b".99999999999999999999e", 1.0_f64);
        assert_eq!(sci.len(), 2 + MAX_FLOAT_PRECISION + 4);
        assert!(sci.ends_with("0e+00"));

        assert_eq!(render(b".70000g", 1.0_f64), "1");
        assert_eq!(render(b".70000g", 0.5_f64), "0.5");
        assert_eq!(render(b".70000%", 0.5_f32).len(), 4 + MAX_FLOAT_PRECISION);
    }
}
