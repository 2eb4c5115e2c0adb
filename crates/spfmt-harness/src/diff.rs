//! Diff rendering for fixture comparison.
//!
//! Formatted outputs are short and usually single-line, so besides the
//! per-line view the diff reports the first differing byte and both strings
//! in escaped form, which keeps padding and control bytes visible.

use std::fmt::Write as _;

/// Render a text diff between expected and actual output.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");

    let offset = expected
        .bytes()
        .zip(actual.bytes())
        .position(|(e, a)| e != a)
        .unwrap_or(expected.len().min(actual.len()));
    let _ = writeln!(out, "@@ first difference at byte {offset} @@");

    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let e = expected_lines.get(i);
        let a = actual_lines.get(i);
        if e != a {
            let _ = writeln!(out, "@@ line {} @@", i + 1);
            if let Some(e) = e {
                let _ = writeln!(out, "-{}", e.escape_debug());
            }
            if let Some(a) = a {
                let _ = writeln!(out, "+{}", a.escape_debug());
            }
        }
    }
    if expected.len() != actual.len() {
        let _ = writeln!(
            out,
            "@@ length {} -> {} @@",
            expected.len(),
            actual.len()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical() {
        assert_eq!(render_diff("abc", "abc"), "[identical]");
    }

    #[test]
    fn reports_first_byte_and_line() {
        let diff = render_diff("  42", " 42");
        assert!(diff.contains("first difference at byte 1"));
        assert!(diff.contains("@@ line 1 @@"));
        assert!(diff.contains("-  42\n"));
        assert!(diff.contains("+ 42\n"));
        assert!(diff.contains("@@ length 4 -> 3 @@"));
    }

    #[test]
    fn escapes_control_bytes() {
        let diff = render_diff("a\tb", "a b");
        assert!(diff.contains("-a\\tb"));
    }

    #[test]
    fn extra_lines_are_listed() {
        let diff = render_diff("a", "a\nb");
        assert!(diff.contains("@@ line 2 @@"));
        assert!(diff.contains("+b"));
    }
}
