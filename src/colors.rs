//! IRC color and formatting codes.
//!
//! Three color syntaxes are recognized:
//! - mIRC colors: `\x03` followed by `fg`, `fg,bg` or `,bg` (one or two
//!   digits each)
//! - RGB colors: `\x04` followed by up to six hex digits
//! - ECMA-48 escapes: `\x1b[` up to and including a final byte
//!
//! Formatting codes are single bytes that toggle an attribute: bold
//! (`\x02`), blink (`\x06`), fixed (`\x11`), inverse (`\x16`), italic
//! (`\x1d`) and underline (`\x1f`). `\x0f` resets everything.
//!
//! # Example
//!
//! ```
//! use slirc_support::colors::{irc_format, strip_color, strip_formatting, Attribute, Color};
//!
//! let text = irc_format(&[Attribute::Bold], Some(Color::Red), None, "alert");
//! assert_eq!(text, "\x02\x0304alert\x0f");
//! assert_eq!(strip_formatting(&strip_color(&text)), "alert");
//! ```

use std::borrow::Cow;

const COLOR_CHARS: &[char] = &['\x03', '\x04', '\x1b'];
const FORMAT_CHARS: &[char] = &['\x02', '\x06', '\x11', '\x16', '\x1d', '\x1f'];
const RESET: char = '\x0f';

/// A formatting attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Clear all formatting.
    Reset,
    /// Bold.
    Bold,
    /// Underline.
    Underline,
    /// Swap foreground and background.
    Inverse,
    /// Italic.
    Italic,
    /// Monospace.
    Fixed,
    /// Blink.
    Blink,
}

impl Attribute {
    /// The control character for this attribute.
    pub fn code(self) -> char {
        match self {
            Self::Reset => RESET,
            Self::Bold => '\x02',
            Self::Underline => '\x1f',
            Self::Inverse => '\x16',
            Self::Italic => '\x1d',
            Self::Fixed => '\x11',
            Self::Blink => '\x06',
        }
    }
}

/// The 16 standard mIRC colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
    Blue,
    Green,
    Red,
    Brown,
    Purple,
    Orange,
    Yellow,
    Lime,
    Teal,
    Aqua,
    Royal,
    Pink,
    Grey,
    Silver,
}

impl Color {
    /// The two-digit color number.
    pub fn code(self) -> &'static str {
        match self {
            Self::White => "00",
            Self::Black => "01",
            Self::Blue => "02",
            Self::Green => "03",
            Self::Red => "04",
            Self::Brown => "05",
            Self::Purple => "06",
            Self::Orange => "07",
            Self::Yellow => "08",
            Self::Lime => "09",
            Self::Teal => "10",
            Self::Aqua => "11",
            Self::Royal => "12",
            Self::Pink => "13",
            Self::Grey => "14",
            Self::Silver => "15",
        }
    }
}

/// True if `text` contains any color code.
pub fn has_color(text: &str) -> bool {
    text.contains(COLOR_CHARS)
}

/// True if `text` contains any formatting code.
pub fn has_formatting(text: &str) -> bool {
    text.contains(FORMAT_CHARS)
}

/// Remove color codes from `text`.
///
/// Reset codes are removed as well unless a color code survives (an
/// unterminated ECMA-48 escape is left alone).
pub fn strip_color(text: &str) -> Cow<'_, str> {
    if !has_color(text) && !text.contains(RESET) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(COLOR_CHARS) {
        out.push_str(&rest[..pos]);
        let tail = &rest.as_bytes()[pos + 1..];
        let skip = match rest.as_bytes()[pos] {
            b'\x03' => Some(mirc_color_len(tail)),
            b'\x04' => Some(rgb_color_len(tail)),
            _ => ecma48_len(tail),
        };
        match skip {
            Some(len) => rest = &rest[pos + 1 + len..],
            None => {
                out.push('\x1b');
                rest = &rest[pos + 1..];
            }
        }
    }
    out.push_str(rest);

    if !has_color(&out) {
        out.retain(|c| c != RESET);
    }
    Cow::Owned(out)
}

/// Remove formatting codes from `text`.
///
/// Reset codes are removed as well unless color codes remain.
pub fn strip_formatting(text: &str) -> Cow<'_, str> {
    let strip_reset = !has_color(text);
    if !has_formatting(text) && !(strip_reset && text.contains(RESET)) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .filter(|c| !FORMAT_CHARS.contains(c) && !(strip_reset && *c == RESET))
            .collect(),
    )
}

/// Wrap `text` in the given attributes and colors, followed by a reset.
///
/// Attributes are toggles, so any of the requested attribute codes already
/// inside `text` are removed. Resets inside `text` re-apply the outer
/// formatting, which lets formatted strings nest.
///
/// ```
/// use slirc_support::colors::{irc_format, Attribute};
///
/// let inner = irc_format(&[Attribute::Italic], None, None, "b");
/// let outer = irc_format(&[Attribute::Bold], None, None, &format!("a{inner}c"));
/// assert_eq!(outer, "\x02a\x1db\x0f\x02c\x0f");
/// ```
pub fn irc_format(
    attributes: &[Attribute],
    foreground: Option<Color>,
    background: Option<Color>,
    text: &str,
) -> String {
    let codes: Vec<char> = attributes.iter().map(|a| a.code()).collect();

    let mut prepend: String = codes.iter().collect();
    match (foreground, background) {
        (None, None) => {}
        (Some(fg), None) => {
            prepend.push('\x03');
            prepend.push_str(fg.code());
        }
        (fg, Some(bg)) => {
            prepend.push('\x03');
            prepend.push_str(fg.map(Color::code).unwrap_or_default());
            prepend.push(',');
            prepend.push_str(bg.code());
        }
    }

    let mut out = String::with_capacity(text.len() + prepend.len() * 2 + 1);
    out.push_str(&prepend);
    for c in text.chars().filter(|c| !codes.contains(c)) {
        out.push(c);
        if c == RESET {
            out.push_str(&prepend);
        }
    }
    out.push(RESET);
    out
}

fn digit_run(bytes: &[u8], max: usize) -> usize {
    bytes
        .iter()
        .take(max)
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Length of the `fg[,bg]` or `,bg` that follows `\x03`.
fn mirc_color_len(tail: &[u8]) -> usize {
    let fg = digit_run(tail, 2);
    if tail.get(fg) == Some(&b',') {
        let bg = digit_run(&tail[fg + 1..], 2);
        if bg > 0 {
            return fg + 1 + bg;
        }
    }
    fg
}

fn rgb_color_len(tail: &[u8]) -> usize {
    tail.iter()
        .take(6)
        .take_while(|b| b.is_ascii_hexdigit())
        .count()
}

/// Length of an ECMA-48 sequence after `\x1b`, through its final byte.
fn ecma48_len(tail: &[u8]) -> Option<usize> {
    if tail.first() != Some(&b'[') {
        return None;
    }
    tail[1..]
        .iter()
        .position(|&b| b <= 0x1f || (0x40..=0x7e).contains(&b))
        .map(|end| end + 2)
}
