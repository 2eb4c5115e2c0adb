//! Format arguments.
//!
//! A call site hands the engine a slice of [`Argument`]s. Each variant knows
//! which type bytes it accepts; a mismatch is reported as `false` and the
//! scanner leaves the field as literal text.

use core::ffi::CStr;
use core::fmt;

use crate::render::{FloatValue, render_float, render_int, render_str};
use crate::sink::Sink;
use crate::spec::{Align, FormatSpec};

/// Caller-defined rendering.
///
/// Implementations must decide whether they accept `spec` before writing
/// anything: returning `false` after a partial write would leave both the
/// partial output and the literal field text in the sink.
pub trait FormatValue {
    fn format_value(&self, sink: &mut dyn Sink, spec: &FormatSpec) -> bool;
}

/// One formattable value.
#[derive(Clone, Copy)]
pub enum Argument<'a> {
    Signed(i64),
    Unsigned(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    /// A code point; narrow and wide characters share this variant.
    Char(u32),
    /// An address. Null renders as `0`.
    Pointer(usize),
    Str(&'a [u8]),
    Custom(&'a dyn FormatValue),
}

impl<'a> Argument<'a> {
    /// Wrap a caller-defined value.
    pub fn custom(value: &'a dyn FormatValue) -> Self {
        Argument::Custom(value)
    }

    /// Render through `sink`. `false` means the type byte does not apply to
    /// this value and nothing was written.
    pub fn format(&self, sink: &mut dyn Sink, spec: &FormatSpec) -> bool {
        match *self {
            Argument::Signed(v) => format_integer(sink, spec, v < 0, v.unsigned_abs()),
            Argument::Unsigned(v) => format_integer(sink, spec, false, v),
            Argument::F32(v) => format_float(sink, spec, v),
            Argument::F64(v) => format_float(sink, spec, v),
            Argument::Bool(v) => format_bool(sink, spec, v),
            Argument::Char(cp) => format_char(sink, spec, cp),
            Argument::Pointer(addr) => format_pointer(sink, spec, addr),
            Argument::Str(s) => format_str(sink, spec, s),
            Argument::Custom(value) => value.format_value(sink, spec),
        }
    }
}

impl fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Signed(v) => f.debug_tuple("Signed").field(v).finish(),
            Argument::Unsigned(v) => f.debug_tuple("Unsigned").field(v).finish(),
            Argument::F32(v) => f.debug_tuple("F32").field(v).finish(),
            Argument::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Argument::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Argument::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Argument::Pointer(v) => f.debug_tuple("Pointer").field(v).finish(),
            Argument::Str(v) => f
                .debug_tuple("Str")
                .field(&String::from_utf8_lossy(v))
                .finish(),
            Argument::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Type-byte tables
// ---------------------------------------------------------------------------

fn is_int_type(ty: Option<u8>) -> bool {
    matches!(
        ty,
        None | Some(b'b' | b'c' | b'd' | b'o' | b'x' | b'X')
    )
}

fn is_float_type(ty: Option<u8>) -> bool {
    matches!(
        ty,
        Some(b'e' | b'E' | b'f' | b'F' | b'g' | b'G' | b'%')
    )
}

// ---------------------------------------------------------------------------
// Per-category rules
// ---------------------------------------------------------------------------

fn format_integer(sink: &mut dyn Sink, spec: &FormatSpec, negative: bool, magnitude: u64) -> bool {
    if is_int_type(spec.ty) {
        render_int(sink, spec, negative, magnitude);
        true
    } else if is_float_type(spec.ty) {
        let value = magnitude as f64;
        render_float(sink, spec, if negative { -value } else { value });
        true
    } else {
        false
    }
}

fn format_float<F: FloatValue>(sink: &mut dyn Sink, spec: &FormatSpec, value: F) -> bool {
    if spec.ty.is_none() || is_float_type(spec.ty) {
        render_float(sink, spec, value);
        true
    } else {
        false
    }
}

fn format_bool(sink: &mut dyn Sink, spec: &FormatSpec, value: bool) -> bool {
    match spec.ty {
        None | Some(b's') => {
            let word: &[u8] = if value { b"true" } else { b"false" };
            render_str(sink, spec, word);
            true
        }
        ty if is_int_type(ty) => {
            render_int(sink, spec, false, u64::from(value));
            true
        }
        _ => false,
    }
}

fn format_char(sink: &mut dyn Sink, spec: &FormatSpec, code_point: u32) -> bool {
    if !is_int_type(spec.ty) {
        return false;
    }
    let mut spec = *spec;
    if spec.ty.is_none() {
        spec.ty = Some(b'c');
    }
    if spec.align == Align::None {
        spec.align = Align::Left;
    }
    render_int(sink, &spec, false, u64::from(code_point));
    true
}

fn format_pointer(sink: &mut dyn Sink, spec: &FormatSpec, addr: usize) -> bool {
    if !is_int_type(spec.ty) {
        return false;
    }
    let mut spec = *spec;
    if spec.ty.is_none() {
        spec.ty = Some(b'x');
    }
    render_int(sink, &spec, false, addr as u64);
    true
}

fn format_str(sink: &mut dyn Sink, spec: &FormatSpec, value: &[u8]) -> bool {
    match spec.ty {
        None | Some(b's') => {
            render_str(sink, spec, value);
            true
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Argument<'_> {
            fn from(v: $t) -> Self {
                Argument::Signed(v as i64)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Argument<'_> {
            fn from(v: $t) -> Self {
                Argument::Unsigned(v as u64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Argument<'_> {
    fn from(v: f32) -> Self {
        Argument::F32(v)
    }
}

impl From<f64> for Argument<'_> {
    fn from(v: f64) -> Self {
        Argument::F64(v)
    }
}

impl From<bool> for Argument<'_> {
    fn from(v: bool) -> Self {
        Argument::Bool(v)
    }
}

impl From<char> for Argument<'_> {
    fn from(v: char) -> Self {
        Argument::Char(u32::from(v))
    }
}

impl<'a> From<&'a str> for Argument<'a> {
    fn from(v: &'a str) -> Self {
        Argument::Str(v.as_bytes())
    }
}

impl<'a> From<&'a String> for Argument<'a> {
    fn from(v: &'a String) -> Self {
        Argument::Str(v.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Argument<'a> {
    fn from(v: &'a [u8]) -> Self {
        Argument::Str(v)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Argument<'a> {
    fn from(v: &'a [u8; N]) -> Self {
        Argument::Str(v)
    }
}

impl<'a> From<&'a CStr> for Argument<'a> {
    fn from(v: &'a CStr) -> Self {
        Argument::Str(v.to_bytes())
    }
}

impl<T> From<*const T> for Argument<'_> {
    fn from(v: *const T) -> Self {
        Argument::Pointer(v.addr())
    }
}

impl<T> From<*mut T> for Argument<'_> {
    fn from(v: *mut T) -> Self {
        Argument::Pointer(v.addr())
    }
}

/// Build a `[Argument; N]` from a list of values.
///
/// ```
/// use spfmt_core::{args, format_to_string};
///
/// assert_eq!(format_to_string("{}-{}", &args![1, "two"]), "1-two");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        [$crate::Argument::Unsigned(0); 0]
    };
    ($($value:expr),+ $(,)?) => {
        [$($crate::Argument::from($value)),+]
    };
}

/// Format into a new `String`.
///
/// ```
/// use spfmt_core::sformat;
///
/// assert_eq!(sformat!("{:>4}", 7), "   7");
/// ```
#[macro_export]
macro_rules! sformat {
    ($template:expr) => {
        $crate::format_to_string($template, &[])
    };
    ($template:expr, $($value:expr),+ $(,)?) => {
        $crate::format_to_string($template, &$crate::args![$($value),+])
    };
}
