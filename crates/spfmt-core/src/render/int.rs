//! Integer rendering.
//!
//! Layout of an integer token: `[sign][0b|0o|0x|0X]digits`. Callers pass the
//! sign and magnitude separately so every width from `i8` to `u64` takes the
//! same path, including `i64::MIN`.
//!
//! `c` prints the value as a single byte when it is ASCII, and otherwise as
//! `(` + prefix + lowercase hex + `)`, e.g. `(e9)` or `(-0x1)`.

use super::Padding;
use crate::sink::Sink;
use crate::spec::{Align, FormatSpec};

/// 64 binary digits plus sign, two prefix bytes and the `c` parentheses.
const INT_BUF: usize = 70;

const DIGITS_LOWER: &[u8; 16] = b"0123456789abcdef";
const DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Render an integer. `spec.ty` must be `None` or one of `b c d o x X`.
pub fn render_int(sink: &mut dyn Sink, spec: &FormatSpec, negative: bool, magnitude: u64) -> usize {
    let base: u64 = match spec.ty {
        Some(b'b') => 2,
        Some(b'o') => 8,
        Some(b'x' | b'X' | b'c') => 16,
        _ => 10,
    };
    let upper = spec.ty == Some(b'X');
    let is_char = spec.ty == Some(b'c');
    let raw_char = is_char && !negative && magnitude < 0x80;

    let mut buf = [0u8; INT_BUF];
    let mut at = INT_BUF;

    if raw_char {
        at -= 1;
        buf[at] = magnitude as u8;
    } else {
        if is_char {
            at -= 1;
            buf[at] = b')';
        }
        let n = render_digits(magnitude, base, upper, &mut buf[..at]);
        at -= n;
    }

    // --- sign and radix prefix ---
    let mut prefix = [0u8; 3];
    let mut prefix_len = 0;
    if let Some(sign) = spec.sign_byte(negative) {
        prefix[prefix_len] = sign;
        prefix_len += 1;
    }
    if spec.alternate && !raw_char {
        let radix = match base {
            2 => Some(b'b'),
            8 => Some(b'o'),
            16 if upper => Some(b'X'),
            16 => Some(b'x'),
            _ => None,
        };
        if let Some(radix) = radix {
            prefix[prefix_len] = b'0';
            prefix[prefix_len + 1] = radix;
            prefix_len += 2;
        }
    }

    // The escaped char form is one opaque token: the prefix moves inside
    // the parentheses and padding never splits it.
    if is_char && !raw_char {
        at -= prefix_len;
        buf[at..at + prefix_len].copy_from_slice(&prefix[..prefix_len]);
        at -= 1;
        buf[at] = b'(';
        prefix_len = 0;
    }

    let body = &buf[at..];
    let content = prefix_len + body.len();
    let align = match spec.align {
        Align::None => Align::Right,
        other => other,
    };
    let pad = Padding::split(align, spec.min_width(), content);
    let fill = spec.fill_byte();

    if align == Align::AfterSign {
        sink.write_bytes(&prefix[..prefix_len]);
        sink.write_repeated(fill, pad.lead);
    } else {
        sink.write_repeated(fill, pad.lead);
        sink.write_bytes(&prefix[..prefix_len]);
    }
    sink.write_bytes(body);
    sink.write_repeated(fill, pad.tail);
    pad.total(content)
}

/// Write the digits of `value` in `base` right-aligned into `out`.
/// Returns the number of digits written. `out` must hold at least 64 bytes
/// for base 2.
pub(crate) fn render_digits(mut value: u64, base: u64, upper: bool, out: &mut [u8]) -> usize {
    let table = if upper { DIGITS_UPPER } else { DIGITS_LOWER };
    let mut pos = out.len();
    if value == 0 {
        pos -= 1;
        out[pos] = b'0';
        return 1;
    }
    while value != 0 {
        pos -= 1;
        out[pos] = table[(value % base) as usize];
        value /= base;
    }
    out.len() - pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(spec: &[u8], value: i64) -> String {
        let spec = FormatSpec::parse(spec).unwrap();
        let mut out = Vec::new();
        let n = render_int(&mut out, &spec, value < 0, value.unsigned_abs());
        assert_eq!(n, out.len());
        String::from_utf8(out).unwrap()
    }

    fn render_u(spec: &[u8], value: u64) -> String {
        let spec = FormatSpec::parse(spec).unwrap();
        let mut out = Vec::new();
        render_int(&mut out, &spec, false, value);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_digits_bases() {
        let mut buf = [0u8; 64];
        let n = render_digits(255, 16, false, &mut buf);
        assert_eq!(&buf[64 - n..], b"ff");
        let n = render_digits(255, 16, true, &mut buf);
        assert_eq!(&buf[64 - n..], b"FF");
        let n = render_digits(0, 8, false, &mut buf);
        assert_eq!(&buf[64 - n..], b"0");
        let n = render_digits(u64::MAX, 2, false, &mut buf);
        assert_eq!(n, 64);
    }

    #[test]
    fn decimal() {
        assert_eq!(render(b"", 42), "42");
        assert_eq!(render(b"", -15), "-15");
        assert_eq!(render(b"d", 0), "0");
    }

    #[test]
    fn sign_flags() {
        assert_eq!(render(b"+", 96), "+96");
        assert_eq!(render(b" ", 7), " 7");
        assert_eq!(render(b" 3", 32), " 32");
        assert_eq!(render(b" 4", 75), "  75");
        assert_eq!(render(b"+", -3), "-3");
    }

    #[test]
    fn width_and_align() {
        assert_eq!(render(b"4", 4), "   4");
        assert_eq!(render(b"0<3", 3), "300");
        assert_eq!(render(b"^4", 2), " 2  ");
        assert_eq!(render(b"^5", 8), "  8  ");
        assert_eq!(render(b"=+5", 52), "+  52");
    }

    #[test]
    fn default_alignment_keeps_sign_next_to_digits() {
        assert_eq!(render(b"5", -42), "  -42");
        assert_eq!(render(b"+5", 42), "  +42");
    }

    #[test]
    fn zero_padding_goes_after_sign_and_prefix() {
        assert_eq!(render(b"+08", 42), "+0000042");
        assert_eq!(render(b"#010x", 255), "0x000000ff");
        assert_eq!(render(b"05", -7), "-0007");
    }

    #[test]
    fn radix_prefixes() {
        assert_eq!(render(b"b", 40), "101000");
        assert_eq!(render(b"#b", 68), "0b1000100");
        assert_eq!(render(b"o", 63), "77");
        assert_eq!(render(b"#o", 30), "0o36");
        assert_eq!(render(b"x", 2748), "abc");
        assert_eq!(render(b"#x", 186), "0xba");
        assert_eq!(render(b"X", 3840), "F00");
        assert_eq!(render(b"#X", 2989), "0XBAD");
    }

    #[test]
    fn extremes() {
        assert_eq!(render(b"#b", i8::MIN as i64), "-0b10000000");
        assert_eq!(render(b"=+6o", i8::MAX as i64), "+  177");
        assert_eq!(render_u(b">> 23", u64::MAX), ">> 18446744073709551615");
        assert_eq!(render(b"#x", i64::MAX), "0x7fffffffffffffff");
        assert_eq!(render(b"#x", i64::MIN), "-0x8000000000000000");
        assert_eq!(render(b"", i64::MIN), "-9223372036854775808");
    }

    #[test]
    fn char_type_prints_ascii_byte() {
        assert_eq!(render(b"c", 65), "A");
        assert_eq!(render(b"3c", 97), "  a");
        assert_eq!(render(b"#c", 97), "a");
    }

    #[test]
    fn char_type_escapes_out_of_range_values() {
        assert_eq!(render(b"c", 0xe9), "(e9)");
        assert_eq!(render(b"c", -1), "(-1)");
        assert_eq!(render(b"#c", -1), "(-0x1)");
        assert_eq!(render(b"=8c", 0xe9), "    (e9)");
    }
}
