//! Per-category renderers.
//!
//! Each renderer takes an already-validated [`FormatSpec`], assembles the
//! value's bytes in a stack buffer, and writes `lead fill, token, tail fill`
//! through the sink. They return the logical number of bytes produced.
//!
//! Type-byte compatibility (e.g. rejecting `{:x}` for a string) is decided
//! by the caller before a renderer is invoked.

pub mod float;
pub mod int;
pub mod string;

pub use float::{FloatValue, MAX_FLOAT_PRECISION, render_float};
pub use int::render_int;
pub use string::render_str;

use crate::spec::Align;

/// Fill counts on either side of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Padding {
    pub lead: usize,
    pub tail: usize,
}

impl Padding {
    /// Split `width - content` according to `align`.
    ///
    /// Centering puts the odd column on the right: `lead` is the floor of
    /// half the slack. `Align::None` must be resolved by the caller; it is
    /// treated as right alignment here.
    pub(crate) fn split(align: Align, width: usize, content: usize) -> Padding {
        let slack = width.saturating_sub(content);
        match align {
            Align::Left => Padding {
                lead: 0,
                tail: slack,
            },
            Align::Center => Padding {
                lead: slack / 2,
                tail: slack - slack / 2,
            },
            Align::Right | Align::AfterSign | Align::None => Padding {
                lead: slack,
                tail: 0,
            },
        }
    }

    pub(crate) fn total(&self, content: usize) -> usize {
        self.lead.saturating_add(content).saturating_add(self.tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_puts_extra_column_on_the_right() {
        assert_eq!(
            Padding::split(Align::Center, 5, 1),
            Padding { lead: 2, tail: 2 }
        );
        assert_eq!(
            Padding::split(Align::Center, 4, 1),
            Padding { lead: 1, tail: 2 }
        );
        assert_eq!(
            Padding::split(Align::Center, 8, 3),
            Padding { lead: 2, tail: 3 }
        );
    }

    #[test]
    fn content_wider_than_width_gets_no_padding() {
        let pad = Padding::split(Align::Right, 2, 10);
        assert_eq!(pad, Padding { lead: 0, tail: 0 });
        assert_eq!(pad.total(10), 10);
    }

    #[test]
    fn left_and_right() {
        assert_eq!(
            Padding::split(Align::Left, 6, 2),
            Padding { lead: 0, tail: 4 }
        );
        assert_eq!(
            Padding::split(Align::Right, 6, 2),
            Padding { lead: 4, tail: 0 }
        );
        assert_eq!(
            Padding::split(Align::AfterSign, 6, 2),
            Padding { lead: 4, tail: 0 }
        );
    }
}
