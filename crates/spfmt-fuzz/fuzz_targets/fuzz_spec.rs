#![no_main]
use libfuzzer_sys::fuzz_target;
use spfmt_core::{Align, FormatSpec};

fuzz_target!(|data: &[u8]| {
    let Some(spec) = FormatSpec::parse(data) else {
        return;
    };
    if spec.fill.is_some() {
        assert_ne!(spec.align, Align::None, "fill without alignment");
    }
    if let Some(ty) = spec.ty {
        assert_eq!(data.last(), Some(&ty), "type must be the last byte");
    }
    let _ = spec.min_width();
    let _ = spec.sign_byte(true);
});
