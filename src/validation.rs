//! Nickname and channel name validation.
//!
//! These are syntax checks only. The decoder never calls them; they exist
//! for clients that want to reject bad input before composing a line.
//!
//! # Nicknames
//!
//! The first character must be an ASCII letter or one of ``_`-^|\{}[]``;
//! later characters may also be digits.
//!
//! # Channel names
//!
//! A channel name is at most 200 bytes, starts with one of the server's
//! `CHANTYPES`, and has at least one more character. NUL, BEL, CR, LF,
//! space, comma and colon are not allowed.

use thiserror::Error;

/// The longest channel name accepted, in bytes.
pub const MAX_CHANNEL_LEN: usize = 200;

/// Characters that may not appear in a channel name.
const INVALID_CHAN_CHARS: &[char] = &['\x00', '\x07', '\n', '\r', ' ', ':', ','];

/// The `CHANTYPES` assumed when a server did not announce any.
pub const DEFAULT_CHANTYPES: &[char] = &['#', '&'];

/// Why a nickname or channel name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The input was empty.
    #[error("input is empty")]
    Empty,
    /// The input was too long.
    #[error("input too long: {actual} bytes (max {max})")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length.
        actual: usize,
    },
    /// Invalid character found at position.
    #[error("invalid character {ch:?} at position {position}")]
    InvalidChar {
        /// The invalid character.
        ch: char,
        /// Position in the string, in characters.
        position: usize,
    },
    /// The channel name does not start with a channel type.
    #[error("missing channel type prefix")]
    MissingPrefix,
    /// Invalid first character.
    #[error("invalid first character: {ch:?}")]
    InvalidFirstChar {
        /// The invalid character.
        ch: char,
    },
}

/// True if `c` may start a nickname.
#[inline]
pub fn is_valid_nick_first_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '`' | '-' | '^' | '|' | '\\' | '{' | '}' | '[' | ']')
}

/// True if `c` may appear after the first character of a nickname.
#[inline]
pub fn is_valid_nick_char(c: char) -> bool {
    is_valid_nick_first_char(c) || c.is_ascii_digit()
}

/// Check a nickname, reporting the first problem found.
///
/// ```
/// use slirc_support::validation::{validate_nickname, ValidationError};
///
/// assert!(validate_nickname("dan`away").is_ok());
/// assert_eq!(
///     validate_nickname("9lives"),
///     Err(ValidationError::InvalidFirstChar { ch: '9' })
/// );
/// ```
pub fn validate_nickname(nick: &str) -> Result<(), ValidationError> {
    let mut chars = nick.chars();
    let Some(first) = chars.next() else {
        return Err(ValidationError::Empty);
    };
    if !is_valid_nick_first_char(first) {
        return Err(ValidationError::InvalidFirstChar { ch: first });
    }

    for (i, c) in chars.enumerate() {
        if !is_valid_nick_char(c) {
            return Err(ValidationError::InvalidChar {
                ch: c,
                position: i + 1,
            });
        }
    }

    Ok(())
}

/// True if `nick` is a syntactically valid nickname.
pub fn valid_nickname(nick: &str) -> bool {
    validate_nickname(nick).is_ok()
}

/// Check a channel name against the given channel types.
///
/// ```
/// use slirc_support::validation::{validate_channel_name, ValidationError};
///
/// assert!(validate_channel_name("#rust", &['#']).is_ok());
/// assert_eq!(validate_channel_name("&local", &['#']), Err(ValidationError::MissingPrefix));
/// ```
pub fn validate_channel_name(name: &str, chantypes: &[char]) -> Result<(), ValidationError> {
    if name.len() > MAX_CHANNEL_LEN {
        return Err(ValidationError::TooLong {
            max: MAX_CHANNEL_LEN,
            actual: name.len(),
        });
    }

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(ValidationError::Empty);
    };
    if !chantypes.contains(&first) {
        return Err(ValidationError::MissingPrefix);
    }
    if chars.as_str().is_empty() {
        return Err(ValidationError::Empty);
    }

    for (i, c) in chars.enumerate() {
        if INVALID_CHAN_CHARS.contains(&c) {
            return Err(ValidationError::InvalidChar {
                ch: c,
                position: i + 1,
            });
        }
    }

    Ok(())
}

/// True if `name` is a syntactically valid channel name.
pub fn valid_channel_name(name: &str, chantypes: &[char]) -> bool {
    validate_channel_name(name, chantypes).is_ok()
}
