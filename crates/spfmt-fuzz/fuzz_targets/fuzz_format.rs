#![no_main]
use libfuzzer_sys::fuzz_target;
use spfmt_core::{Argument, SliceSink, format_bytes};

/// Outputs longer than this are only run through the fixed buffer, which
/// counts padding without storing it. Float precision is capped by the
/// engine, so only width can get this large.
const VEC_LIMIT: usize = 1 << 20;

fn float_from(word: u64) -> f64 {
    match word % 8 {
        0 => f64::NAN,
        1 => f64::INFINITY,
        2 => f64::NEG_INFINITY,
        3 => -0.0,
        _ => f64::from(word as i16) / 8.0,
    }
}

fuzz_target!(|data: &[u8]| {
    // First byte sizes the fixed buffer, the next 8 seed the arguments.
    if data.len() < 13 {
        return;
    }
    let buf_len = usize::from(data[0]);
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&data[1..9]);
    let word = u64::from_le_bytes(seed);
    let text = &data[9..13];
    let template = &data[13..];
    // Small values keep nested widths cheap for the Vec comparison.
    let args = [
        Argument::Signed(i64::from(word as i16)),
        Argument::Unsigned(u64::from(word as u16)),
        Argument::F64(float_from(word)),
        Argument::F32(float_from(word.rotate_left(3)) as f32),
        Argument::Bool(word & 1 == 1),
        Argument::Char((word >> 16) as u32 & 0x1f_ffff),
        Argument::Str(text),
        Argument::Pointer(usize::from(word as u16)),
        Argument::Str(b"<6"),
    ];

    let mut buf = vec![0xAAu8; buf_len];
    let mut sink = SliceSink::new(&mut buf);
    format_bytes(&mut sink, template, &args);
    let len = sink.len();
    let stored = sink.stored();

    assert_eq!(stored, len.min(buf_len.saturating_sub(1)));
    if buf_len > 0 {
        assert_eq!(buf[stored], 0);
    }
    if len > VEC_LIMIT {
        return;
    }

    let mut full = Vec::new();
    format_bytes(&mut full, template, &args);
    assert_eq!(len, full.len(), "slice and vec paths disagree on length");
    assert_eq!(&buf[..stored], &full[..stored]);
});
