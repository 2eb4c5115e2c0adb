//! Template scanner.
//!
//! One left-to-right pass over the template. Literal runs are copied as-is,
//! `{{` and `}}` collapse to single braces, and every `{index:spec}` field is
//! handed to the spec parser and dispatcher as soon as its closing brace is
//! found.
//!
//! A field that cannot be rendered (bad index, bad spec, type mismatch) is
//! not an error: the pending literal run simply restarts at its `{`, so the
//! field text shows up in the output unchanged.
//!
//! When a spec contains fields of its own (`{:{}}`), it is first formatted
//! into a [`StackBuf`] and the result is parsed as the spec. Nested and
//! outer fields share one auto-index counter.

use crate::arg::Argument;
use crate::dispatch::dispatch;
use crate::sink::{Sink, StackBuf};
use crate::spec::{FormatSpec, parse_decimal};

/// Deepest chain of specs-within-specs that is resolved. A field nested
/// deeper stays literal.
pub const MAX_NESTING_DEPTH: usize = 8;

/// Bytes available to a nested spec once formatted. Longer results leave the
/// field literal.
pub const NESTED_SPEC_CAPACITY: usize = 64;

/// Format `template` with `args` into `sink`.
pub fn scan(sink: &mut dyn Sink, template: &[u8], args: &[Argument<'_>]) {
    let mut scanner = Scanner {
        args,
        prev_index: None,
    };
    scanner.run(sink, template, 0);
}

/// A delimited `{...}` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Field<'t> {
    /// Explicit index, or `None` for auto.
    index: Option<usize>,
    /// Text between `:` and the closing brace.
    spec: &'t [u8],
    /// `spec` contains braces and must be formatted first.
    nested: bool,
    /// Offset just past the closing brace.
    end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimited<'t> {
    Field(Field<'t>),
    /// Something other than `:` or `}` follows the index. The field still
    /// claims its index.
    Malformed { index: Option<usize> },
    /// The template ends inside the field.
    Unterminated,
}

struct Scanner<'s, 'a> {
    args: &'s [Argument<'a>],
    prev_index: Option<usize>,
}

impl Scanner<'_, '_> {
    fn run(&mut self, sink: &mut dyn Sink, template: &[u8], depth: usize) {
        let len = template.len();
        // Start of the pending literal run.
        let mut start = 0;
        let mut pos = 0;

        while pos < len {
            match template[pos] {
                b'{' if template.get(pos + 1) == Some(&b'{') => {
                    write_literal(sink, &template[start..=pos]);
                    pos += 2;
                    start = pos;
                }
                b'{' => match delimit(template, pos) {
                    Delimited::Field(field) => {
                        write_literal(sink, &template[start..pos]);
                        start = if self.render_field(sink, &field, depth) {
                            field.end
                        } else {
                            pos
                        };
                        pos = field.end;
                    }
                    Delimited::Malformed { index } => {
                        self.resolve_index(index);
                        pos += 1;
                    }
                    Delimited::Unterminated => break,
                },
                b'}' => {
                    write_literal(sink, &template[start..=pos]);
                    pos += if template.get(pos + 1) == Some(&b'}') { 2 } else { 1 };
                    start = pos;
                }
                _ => {
                    pos += template[pos..]
                        .iter()
                        .position(|&b| b == b'{' || b == b'}')
                        .unwrap_or(len - pos);
                }
            }
        }

        write_literal(sink, &template[start..]);
    }

    /// Settle a field's argument index and make it the new auto-index base.
    fn resolve_index(&mut self, explicit: Option<usize>) -> usize {
        let index = explicit
            .unwrap_or_else(|| self.prev_index.map_or(0, |prev| prev.saturating_add(1)));
        self.prev_index = Some(index);
        index
    }

    fn render_field(&mut self, sink: &mut dyn Sink, field: &Field<'_>, depth: usize) -> bool {
        let index = self.resolve_index(field.index);

        let spec = if field.nested {
            if depth >= MAX_NESTING_DEPTH {
                return false;
            }
            let mut buf = StackBuf::<NESTED_SPEC_CAPACITY>::new();
            self.run(&mut buf, field.spec, depth + 1);
            if buf.len() > NESTED_SPEC_CAPACITY {
                return false;
            }
            FormatSpec::parse(buf.as_bytes())
        } else {
            FormatSpec::parse(field.spec)
        };

        match spec {
            Some(spec) => dispatch(sink, &spec, index, self.args),
            None => false,
        }
    }
}

/// Find the extent of the field opened at `open`.
fn delimit(template: &[u8], open: usize) -> Delimited<'_> {
    let mut pos = open + 1;
    let digits = pos;
    while pos < template.len() && template[pos].is_ascii_digit() {
        pos += 1;
    }
    let index = (pos > digits).then(|| parse_decimal(&template[digits..pos]));

    match template.get(pos) {
        None => Delimited::Unterminated,
        Some(b'}') => Delimited::Field(Field {
            index,
            spec: &[],
            nested: false,
            end: pos + 1,
        }),
        Some(b':') => {
            let spec_start = pos + 1;
            let mut open_inner = 0_usize;
            let mut nested = false;
            for (offset, &byte) in template[spec_start..].iter().enumerate() {
                match byte {
                    b'{' => {
                        open_inner += 1;
                        nested = true;
                    }
                    b'}' if open_inner > 0 => open_inner -= 1,
                    b'}' => {
                        let close = spec_start + offset;
                        return Delimited::Field(Field {
                            index,
                            spec: &template[spec_start..close],
                            nested,
                            end: close + 1,
                        });
                    }
                    _ => {}
                }
            }
            Delimited::Unterminated
        }
        Some(_) => Delimited::Malformed { index },
    }
}

fn write_literal(sink: &mut dyn Sink, bytes: &[u8]) {
    if !bytes.is_empty() {
        sink.write_bytes(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn run(template: &str, args: &[Argument<'_>]) -> String {
        let mut out = Vec::new();
        scan(&mut out, template.as_bytes(), args);
        String::from_utf8(out).unwrap()
    }

    fn nested_template(levels: usize) -> String {
        let mut template = String::from("{}");
        for _ in 0..levels {
            template = format!("{{:{template}}}");
        }
        template
    }

    #[test]
    fn test_delimit_simple_field() {
        assert_eq!(
            delimit(b"{12:x}rest", 0),
            Delimited::Field(Field {
                index: Some(12),
                spec: b"x",
                nested: false,
                end: 6,
            })
        );
        assert_eq!(
            delimit(b"{}", 0),
            Delimited::Field(Field {
                index: None,
                spec: b"",
                nested: false,
                end: 2,
            })
        );
    }

    #[test]
    fn test_delimit_nested_and_broken_fields() {
        match delimit(b"{:{}>{}}", 0) {
            Delimited::Field(field) => {
                assert_eq!(field.spec, b"{}>{}");
                assert!(field.nested);
                assert_eq!(field.end, 8);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(delimit(b"{a}", 0), Delimited::Malformed { index: None });
        assert_eq!(delimit(b"{1a}", 0), Delimited::Malformed { index: Some(1) });
        assert_eq!(delimit(b"{0:x", 0), Delimited::Unterminated);
        assert_eq!(delimit(b"{", 0), Delimited::Unterminated);
    }

    #[test]
    fn literals_and_escapes() {
        assert_eq!(run("", &[]), "");
        assert_eq!(run("foo", &[]), "foo");
        assert_eq!(run("{{", &[]), "{");
        assert_eq!(run("}}", &[]), "}");
        assert_eq!(run("{{}}", &[]), "{}");
        assert_eq!(run("}}{{", &[]), "}{");
        assert_eq!(run("{{0}}", &[]), "{0}");
        assert_eq!(run("{{{{0}}}}", &[]), "{{0}}");
        assert_eq!(run("a{{b", &[]), "a{b");
        assert_eq!(run("a}}b", &[]), "a}b");
    }

    #[test]
    fn lone_close_brace_is_kept() {
        assert_eq!(run("a}b", &[]), "a}b");
        assert_eq!(run("}", &[]), "}");
    }

    #[test]
    fn auto_and_explicit_indices() {
        assert_eq!(run("{} {} {1} {} {1}", &args![0, 1, 2]), "0 1 1 2 1");
        assert_eq!(run("{2}{0}{}", &args!["a", "z", "b"]), "baz");
        assert_eq!(run("{}{}{}", &args!["b", "a", "r"]), "bar");
    }

    #[test]
    fn unresolvable_fields_stay_literal() {
        assert_eq!(run("{5}", &args![1, 2]), "{5}");
        assert_eq!(run("x{5}y", &args![1, 2]), "x{5}y");
        assert_eq!(run("{}", &[]), "{}");
        assert_eq!(run("{:q}", &args![1]), "{:q}");
        assert_eq!(run("{:x}", &args!["s"]), "{:x}");
        assert_eq!(run("{a}", &args![1]), "{a}");
        assert_eq!(run("{99999999999999999999999}", &args![1]), "{99999999999999999999999}");
    }

    #[test]
    fn failed_field_still_advances_auto_index() {
        assert_eq!(run("{:q}{}", &args![1, 2]), "{:q}2");
        assert_eq!(run("{5}{}", &args![1, 2]), "{5}{}");
    }

    #[test]
    fn malformed_field_claims_an_index() {
        assert_eq!(run("{a}{}", &args![1, 2]), "{a}2");
        assert_eq!(run("{a}{a}{}", &args![1, 2, 3]), "{a}{a}3");
        assert_eq!(run("{1a}{}", &args![1, 2, 3]), "{1a}3");
        assert_eq!(run("{} {x} {}", &args![1, 2, 3]), "1 {x} 3");
    }

    #[test]
    fn escapes_after_failed_field() {
        assert_eq!(run("{5}}}", &args![1]), "{5}}");
    }

    #[test]
    fn unterminated_field_is_literal() {
        assert_eq!(run("abc{", &args![1]), "abc{");
        assert_eq!(run("{0:x", &args![1]), "{0:x");
        assert_eq!(run("a{}b{", &args![1]), "a1b{");
    }

    #[test]
    fn nested_spec_is_formatted_first() {
        assert_eq!(run("{:{}}", &args![42, 5]), "   42");
        assert_eq!(run("{0:{1}}", &args!["ab", "^6"]), "  ab  ");
        assert_eq!(run("{:{}{}}", &args![7, "0", 3]), "007");
        assert_eq!(run("{:{:{}}}", &args![1, 8, "d"]), "       1");
    }

    #[test]
    fn nested_spec_failure_leaves_outer_literal() {
        assert_eq!(run("{:{9}}", &args![1]), "{:{9}}");
    }

    #[test]
    fn nested_spec_over_capacity_is_literal() {
        let long = "9".repeat(NESTED_SPEC_CAPACITY + 1);
        assert_eq!(run("{:{}}", &args![1, long.as_str()]), "{:{}}");
    }

    #[test]
    fn nesting_depth_is_capped() {
        let empties = [Argument::Str(b""); 16];
        let within = nested_template(MAX_NESTING_DEPTH);
        assert_eq!(run(&within, &empties), "");
        let beyond = nested_template(MAX_NESTING_DEPTH + 1);
        assert_eq!(run(&beyond, &empties), beyond);
    }

    #[test]
    fn wide_padding() {
        let out = run("{0:>1000}", &args!["a"]);
        assert_eq!(out.len(), 1000);
        assert!(out.ends_with(" a"));
        assert_eq!(run("{0:1000}", &args![""]), " ".repeat(1000));
    }
}
