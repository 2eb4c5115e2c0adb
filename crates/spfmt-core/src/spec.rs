//! Replacement-field format specs.
//!
//! Parses the text between `:` and the closing `}` of a field:
//!
//! ```text
//! spec := [[fill] align] [sign] ['#'] [width] ['.' precision] [type]
//! ```
//!
//! Single forward pass with at most two bytes of lookahead. Anything left
//! over after the type byte makes the whole spec invalid, which the scanner
//! turns into "leave the field as literal text".

/// Alignment within the padded width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// Nothing requested; each renderer applies its own default.
    #[default]
    None,
    /// `<`
    Left,
    /// `>`
    Right,
    /// `^`
    Center,
    /// `=`: padding goes between the sign/prefix and the digits.
    AfterSign,
}

/// Sign policy for non-negative numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sign {
    /// Only negative values get a sign (`-` or nothing).
    #[default]
    None,
    /// `+`
    Plus,
    /// ` `
    Space,
}

/// A parsed field spec.
///
/// `FormatSpec::default()` is the empty spec (`{}` / `{:}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: Option<u8>,
    pub align: Align,
    pub sign: Sign,
    pub alternate: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub ty: Option<u8>,
}

impl FormatSpec {
    /// Parse a spec slice. `None` if the slice has trailing garbage.
    pub fn parse(fmt: &[u8]) -> Option<FormatSpec> {
        parse_format_spec(fmt)
    }

    /// Fill byte to pad with.
    pub fn fill_byte(&self) -> u8 {
        self.fill.unwrap_or(b' ')
    }

    /// Requested width, or 0.
    pub fn min_width(&self) -> usize {
        self.width.unwrap_or(0)
    }

    /// Sign byte to print for a value of the given sign.
    pub fn sign_byte(&self, negative: bool) -> Option<u8> {
        if negative {
            return Some(b'-');
        }
        match self.sign {
            Sign::None => None,
            Sign::Plus => Some(b'+'),
            Sign::Space => Some(b' '),
        }
    }

    /// True if the type byte is an uppercase letter (`E`, `F`, `G`, `X`).
    pub fn is_uppercase(&self) -> bool {
        self.ty.is_some_and(|t| t.is_ascii_uppercase())
    }
}

/// Type bytes the grammar accepts.
pub const TYPE_BYTES: &[u8] = b"bcdeEfFgGosxX%";

/// Parse a whole spec slice. Returns `None` if any byte is left unconsumed.
pub fn parse_format_spec(fmt: &[u8]) -> Option<FormatSpec> {
    let len = fmt.len();
    let mut pos = 0;
    let mut spec = FormatSpec::default();

    // --- [[fill] align] ---
    if let Some(align) = fmt.get(1).copied().and_then(align_from_byte) {
        spec.fill = Some(fmt[0]);
        spec.align = align;
        pos = 2;
    } else if let Some(align) = fmt.first().copied().and_then(align_from_byte) {
        spec.align = align;
        pos = 1;
    }

    // --- sign ---
    match fmt.get(pos) {
        Some(b'+') => {
            spec.sign = Sign::Plus;
            pos += 1;
        }
        Some(b'-') => pos += 1,
        Some(b' ') => {
            spec.sign = Sign::Space;
            pos += 1;
        }
        _ => {}
    }

    // --- alternate ---
    if fmt.get(pos) == Some(&b'#') {
        spec.alternate = true;
        pos += 1;
    }

    // --- width ---
    let start = pos;
    while pos < len && fmt[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos > start {
        // Leading zero with no explicit alignment: sign-aware zero padding.
        if fmt[start] == b'0' && spec.align == Align::None {
            spec.fill = Some(b'0');
            spec.align = Align::AfterSign;
        }
        spec.width = Some(parse_decimal(&fmt[start..pos]));
    }

    // --- precision ---
    if fmt.get(pos) == Some(&b'.') && fmt.get(pos + 1).is_some_and(u8::is_ascii_digit) {
        pos += 1;
        let start = pos;
        while pos < len && fmt[pos].is_ascii_digit() {
            pos += 1;
        }
        spec.precision = Some(parse_decimal(&fmt[start..pos]));
    }

    // --- type ---
    if let Some(&ty) = fmt.get(pos) {
        if TYPE_BYTES.contains(&ty) {
            spec.ty = Some(ty);
            pos += 1;
        }
    }

    if pos == len { Some(spec) } else { None }
}

fn align_from_byte(byte: u8) -> Option<Align> {
    match byte {
        b'<' => Some(Align::Left),
        b'>' => Some(Align::Right),
        b'^' => Some(Align::Center),
        b'=' => Some(Align::AfterSign),
        _ => None,
    }
}

pub(crate) fn parse_decimal(digits: &[u8]) -> usize {
    let mut result = 0_usize;
    for &d in digits {
        result = result
            .saturating_mul(10)
            .saturating_add((d - b'0') as usize);
    }
    result
}
