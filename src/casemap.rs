//! IRC case-mapping functions.
//!
//! IRC uses a special case-insensitive comparison where some characters
//! are considered equivalent (e.g., `[` and `{`). Servers advertise which
//! rule they use through the `CASEMAPPING` ISUPPORT token:
//!
//! | mapping          | lower          | upper          |
//! |------------------|----------------|----------------|
//! | `ascii`          | `a-z`          | `A-Z`          |
//! | `rfc1459`        | `a-z{}^\|`     | `A-Z[]~\`      |
//! | `strict-rfc1459` | `a-z{}\|`      | `A-Z[]\`       |
//!
//! # Example
//!
//! ```
//! use slirc_support::casemap::{irc_eq, irc_upcase, CaseMapping};
//!
//! assert_eq!(irc_upcase("c0mpl^{x}", CaseMapping::Rfc1459), "C0MPL~[X]");
//! assert!(irc_eq("C0MPL~[X]", "c0mpl^{x}", CaseMapping::Rfc1459));
//! assert!(!irc_eq("C0MPL~[X]", "c0mpl^{x}", CaseMapping::StrictRfc1459));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::CaseMappingError;

/// One of the three casemappings IRC servers advertise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaseMapping {
    /// Only `a-z` and `A-Z` are case-equivalent.
    Ascii,
    /// ASCII plus `{}^|` ↔ `[]~\`.
    #[default]
    Rfc1459,
    /// ASCII plus `{}|` ↔ `[]\` (no `^`/`~`).
    StrictRfc1459,
}

impl CaseMapping {
    /// The name used in the `CASEMAPPING` token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Rfc1459 => "rfc1459",
            Self::StrictRfc1459 => "strict-rfc1459",
        }
    }
}

impl fmt::Display for CaseMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseMapping {
    type Err = CaseMappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Self::Ascii),
            "rfc1459" => Ok(Self::Rfc1459),
            "strict-rfc1459" => Ok(Self::StrictRfc1459),
            other => Err(CaseMappingError::Unsupported(other.to_string())),
        }
    }
}

/// Convert a single character to IRC uppercase under `mapping`.
#[inline]
pub const fn irc_upper_char(c: char, mapping: CaseMapping) -> char {
    match (c, mapping) {
        ('a'..='z', _) => (c as u8 - 32) as char,
        ('{', CaseMapping::Rfc1459 | CaseMapping::StrictRfc1459) => '[',
        ('}', CaseMapping::Rfc1459 | CaseMapping::StrictRfc1459) => ']',
        ('|', CaseMapping::Rfc1459 | CaseMapping::StrictRfc1459) => '\\',
        ('^', CaseMapping::Rfc1459) => '~',
        _ => c,
    }
}

/// Convert a single character to IRC lowercase under `mapping`.
#[inline]
pub const fn irc_lower_char(c: char, mapping: CaseMapping) -> char {
    match (c, mapping) {
        ('A'..='Z', _) => (c as u8 + 32) as char,
        ('[', CaseMapping::Rfc1459 | CaseMapping::StrictRfc1459) => '{',
        (']', CaseMapping::Rfc1459 | CaseMapping::StrictRfc1459) => '}',
        ('\\', CaseMapping::Rfc1459 | CaseMapping::StrictRfc1459) => '|',
        ('~', CaseMapping::Rfc1459) => '^',
        _ => c,
    }
}

/// Convert a string to IRC uppercase under `mapping`.
pub fn irc_upcase(s: &str, mapping: CaseMapping) -> String {
    s.chars().map(|c| irc_upper_char(c, mapping)).collect()
}

/// Convert a string to IRC lowercase under `mapping`.
pub fn irc_downcase(s: &str, mapping: CaseMapping) -> String {
    s.chars().map(|c| irc_lower_char(c, mapping)).collect()
}

/// Compare two strings using IRC case-insensitive comparison.
///
/// Both strings are upcased under the same mapping before comparing.
pub fn irc_eq(a: &str, b: &str, mapping: CaseMapping) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.chars()
        .zip(b.chars())
        .all(|(ca, cb)| irc_upper_char(ca, mapping) == irc_upper_char(cb, mapping))
}
