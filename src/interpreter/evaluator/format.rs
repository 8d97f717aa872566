//! Rendering of `print` templates.
//!
//! A string operand of `print` is a printf-style template taking at most one
//! integer argument. The supported directive syntax is
//!
//! ```text
//!     %[flags][width][.precision][length]conversion
//! ```
//!
//! with flags `-`, `+`, space, `0` and `#`, length modifiers `hh`, `h`, `l`
//! and `ll` (accepted and ignored), and conversions `d`, `i`, `u`, `x`, `X`,
//! `o` and `c`. `%%` always produces a single `%`.
//!
//! Only the first conversion consumes the argument. Later conversions,
//! conversions when there is no argument, and unsupported directives are
//! copied to the output unchanged. A width or precision above `i32::MAX`
//! makes a directive unsupported.
//!
//! Templates are C strings: rendering stops at the first NUL byte.

/// Largest accepted field width or precision.
const MAX_FIELD: usize = i32::MAX as usize;

/// Renders `template`, substituting `argument` into its first conversion.
///
/// The result is raw bytes, because `%c` may produce any byte value.
///
/// # Example
/// ```
/// use mikroc::interpreter::evaluator::format::render;
///
/// assert_eq!(render("x=%d\n", Some(42)), b"x=42\n");
/// assert_eq!(render("[%-4x|%04i]", Some(255)), b"[ff  |%04i]");
/// assert_eq!(render("100%%", None), b"100%");
/// assert_eq!(render("%d", None), b"%d");
/// assert_eq!(render("ab\0cd", None), b"ab");
/// ```
#[must_use]
pub fn render(template: &str, argument: Option<i32>) -> Vec<u8> {
    let bytes = template.as_bytes();
    let bytes = &bytes[..bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())];
    let mut out = Vec::with_capacity(bytes.len());
    let mut argument = argument;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        if bytes.get(i + 1) == Some(&b'%') {
            out.push(b'%');
            i += 2;
            continue;
        }

        let (directive, end) = Directive::parse(bytes, i + 1);
        match (directive, argument) {
            (Some(directive), Some(value)) => {
                directive.write(value, &mut out);
                argument = None;
            },
            _ => out.extend_from_slice(&bytes[i..end]),
        }
        i = end;
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Signed,
    Unsigned,
    HexLower,
    HexUpper,
    Octal,
    Char,
}

impl Conversion {
    const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'd' | b'i' => Some(Self::Signed),
            b'u' => Some(Self::Unsigned),
            b'x' => Some(Self::HexLower),
            b'X' => Some(Self::HexUpper),
            b'o' => Some(Self::Octal),
            b'c' => Some(Self::Char),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Flags {
    left:      bool,
    plus:      bool,
    space:     bool,
    zero:      bool,
    alternate: bool,
}

#[derive(Debug, Clone, Copy)]
struct Directive {
    flags:      Flags,
    width:      usize,
    precision:  Option<usize>,
    conversion: Conversion,
}

impl Directive {
    /// Parses the directive starting after its `%` at `start`.
    ///
    /// Returns the directive, or `None` when it is not a supported
    /// conversion, together with the index one past its last byte.
    fn parse(bytes: &[u8], start: usize) -> (Option<Self>, usize) {
        let mut i = start;
        let mut flags = Flags::default();

        while let Some(&byte) = bytes.get(i) {
            match byte {
                b'-' => flags.left = true,
                b'+' => flags.plus = true,
                b' ' => flags.space = true,
                b'0' => flags.zero = true,
                b'#' => flags.alternate = true,
                _ => break,
            }
            i += 1;
        }

        let width = digits(bytes, &mut i).unwrap_or(0);

        let precision = if bytes.get(i) == Some(&b'.') {
            i += 1;
            Some(digits(bytes, &mut i).unwrap_or(0))
        } else {
            None
        };

        for modifier in [b'h', b'h'] {
            if bytes.get(i) == Some(&modifier) {
                i += 1;
            }
        }
        for modifier in [b'l', b'l'] {
            if bytes.get(i) == Some(&modifier) {
                i += 1;
            }
        }

        let Some(&byte) = bytes.get(i) else {
            return (None, i);
        };
        if width > MAX_FIELD || precision.is_some_and(|p| p > MAX_FIELD) {
            return (None, i + 1);
        }
        let directive = Conversion::from_byte(byte).map(|conversion| Self { flags,
                                                                              width,
                                                                              precision,
                                                                              conversion });
        (directive, i + 1)
    }

    fn write(&self, value: i32, out: &mut Vec<u8>) {
        let unsigned = value.cast_unsigned();
        let mut digits = match self.conversion {
            Conversion::Signed => value.unsigned_abs().to_string(),
            Conversion::Unsigned => unsigned.to_string(),
            Conversion::HexLower => format!("{unsigned:x}"),
            Conversion::HexUpper => format!("{unsigned:X}"),
            Conversion::Octal => format!("{unsigned:o}"),
            Conversion::Char => {
                self.pad(&[], &[value.to_le_bytes()[0]], false, out);
                return;
            },
        };
        let mut prefix = String::new();

        match self.precision {
            Some(0) if value == 0 => digits.clear(),
            Some(precision) if digits.len() < precision => {
                digits.insert_str(0, &"0".repeat(precision - digits.len()));
            },
            _ => {},
        }

        match self.conversion {
            Conversion::Signed if value < 0 => prefix.push('-'),
            Conversion::Signed if self.flags.plus => prefix.push('+'),
            Conversion::Signed if self.flags.space => prefix.push(' '),
            Conversion::HexLower if self.flags.alternate && value != 0 => prefix.push_str("0x"),
            Conversion::HexUpper if self.flags.alternate && value != 0 => prefix.push_str("0X"),
            Conversion::Octal if self.flags.alternate && !digits.starts_with('0') => {
                prefix.push('0');
            },
            _ => {},
        }

        let zero_fill = self.flags.zero && self.precision.is_none();
        self.pad(prefix.as_bytes(), digits.as_bytes(), zero_fill, out);
    }

    /// Writes `prefix` and `body`, padded to the field width.
    fn pad(&self, prefix: &[u8], body: &[u8], zero_fill: bool, out: &mut Vec<u8>) {
        let fill = self.width.saturating_sub(prefix.len() + body.len());

        if self.flags.left {
            out.extend_from_slice(prefix);
            out.extend_from_slice(body);
            out.resize(out.len() + fill, b' ');
        } else if zero_fill {
            out.extend_from_slice(prefix);
            out.resize(out.len() + fill, b'0');
            out.extend_from_slice(body);
        } else {
            out.resize(out.len() + fill, b' ');
            out.extend_from_slice(prefix);
            out.extend_from_slice(body);
        }
    }
}

/// Reads a run of decimal digits at `*i`, advancing past them.
fn digits(bytes: &[u8], i: &mut usize) -> Option<usize> {
    let start = *i;
    let mut value: usize = 0;

    while let Some(&byte) = bytes.get(*i).filter(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add(usize::from(byte - b'0'));
        *i += 1;
    }

    (*i > start).then_some(value)
}
