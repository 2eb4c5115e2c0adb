//! Shared workloads for the spfmt benchmarks.
//!
//! Each workload pairs a brace template with the equivalent `printf` format
//! so the benches can compare against the host `snprintf`.

use spfmt_core::Argument;

/// One benchmark input.
pub struct Workload {
    pub name: &'static str,
    pub template: &'static str,
    /// Equivalent C format string, NUL-terminated.
    pub c_format: &'static [u8],
    pub args: Vec<Argument<'static>>,
}

/// Integer fields: padding, sign, and alternate hex.
#[must_use]
pub fn integers() -> Workload {
    Workload {
        name: "integers",
        template: "{:>8}|{:+}|{:#x}",
        c_format: b"%8d|%+d|%#x\0",
        args: vec![
            Argument::Signed(-4096),
            Argument::Signed(96),
            Argument::Unsigned(0xdead),
        ],
    }
}

/// Fixed and scientific floats.
#[must_use]
pub fn floats() -> Workload {
    Workload {
        name: "floats",
        template: "{:.3f} {:e}",
        c_format: b"%.3f %e\0",
        args: vec![Argument::F64(2.345_678), Argument::F64(1234.5)],
    }
}

/// A right-aligned string field.
#[must_use]
pub fn strings() -> Workload {
    Workload {
        name: "strings",
        template: "[{:>20}]",
        c_format: b"[%20s]\0",
        args: vec![Argument::Str(b"benchmark")],
    }
}

/// Output length of `workload` rendered by spfmt.
#[must_use]
pub fn rendered_len(workload: &Workload) -> usize {
    spfmt_core::format_to_vec(workload.template, &workload.args).len()
}
