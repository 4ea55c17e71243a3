//! Conversion between wire bytes and text.
//!
//! IRC has no negotiated character set. The `irc` pseudo-encoding used by
//! [`decode_irc`] and [`encode_irc`] is the usual hybrid: incoming bytes are
//! UTF-8 when they validate and CP1252 otherwise; outgoing text is CP1252
//! when every character fits and UTF-8 when it does not.
//!
//! # Example
//!
//! ```
//! use slirc_support::encoding::{decode_irc, encode_irc};
//!
//! assert_eq!(decode_irc(b"caf\xe9"), "café");
//! assert_eq!(decode_irc("café".as_bytes()), "café");
//! assert_eq!(encode_irc("café").as_ref(), b"caf\xe9");
//! assert_eq!(encode_irc("Привет").as_ref(), "Привет".as_bytes());
//! ```

use std::borrow::Cow;

use ::encoding::{EncoderResult, Encoding, WINDOWS_1252};
use thiserror::Error;

/// Label accepted by [`decode_with`] and [`encode_with`] for the hybrid
/// UTF-8/CP1252 behaviour.
pub const IRC_LABEL: &str = "irc";

/// Errors from explicit-encoding conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodingError {
    /// The label does not name a known encoding.
    #[error("unknown encoding label: {0}")]
    UnknownLabel(String),
}

/// Decode bytes received from the server.
pub fn decode_irc(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

/// Encode text for sending to the server.
pub fn encode_irc(text: &str) -> Cow<'_, [u8]> {
    let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
    if unmappable {
        Cow::Borrowed(text.as_bytes())
    } else {
        bytes
    }
}

fn lookup(label: &str) -> Result<&'static Encoding, EncodingError> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| EncodingError::UnknownLabel(label.to_string()))
}

/// Decode bytes in the encoding named by `label`.
///
/// Malformed sequences become U+FFFD. The label `irc` selects
/// [`decode_irc`].
pub fn decode_with<'a>(bytes: &'a [u8], label: &str) -> Result<Cow<'a, str>, EncodingError> {
    if label.eq_ignore_ascii_case(IRC_LABEL) {
        return Ok(decode_irc(bytes));
    }
    Ok(lookup(label)?.decode_without_bom_handling(bytes).0)
}

/// Encode text in the encoding named by `label`.
///
/// Characters the encoding cannot represent become `?`. The label `irc`
/// selects [`encode_irc`].
pub fn encode_with(text: &str, label: &str) -> Result<Vec<u8>, EncodingError> {
    if label.eq_ignore_ascii_case(IRC_LABEL) {
        return Ok(encode_irc(text).into_owned());
    }

    let mut encoder = lookup(label)?.new_encoder();
    let mut out = Vec::with_capacity(text.len() + 16);
    let mut input = text;
    loop {
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(input, &mut out, true);
        input = &input[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => out.reserve(input.len() + 16),
            EncoderResult::Unmappable(_) => out.push(b'?'),
        }
    }
    Ok(out)
}
