//! CTCP (Client-To-Client Protocol) quoting and payload extraction.
//!
//! CTCP messages ride inside PRIVMSG/NOTICE bodies between `\x01` bytes and
//! use two layers of quoting:
//!
//! 1. Low-level quoting maps NUL, LF, CR and `\x10` to two-byte sequences
//!    starting with `\x10`, so they survive the line protocol.
//! 2. CTCP-level quoting escapes `\x01` as `\a` and `\` as `\\` inside a
//!    payload.
//!
//! # Example
//!
//! ```
//! use slirc_support::ctcp::{ctcp_dequote, ctcp_quote};
//!
//! let body = ctcp_quote("ACTION", "waves");
//! assert_eq!(body, "\x01ACTION waves\x01");
//!
//! let chunks = ctcp_dequote(&body).unwrap();
//! assert_eq!(chunks.ctcp, vec!["ACTION waves"]);
//! assert!(chunks.text.is_empty());
//! ```

pub mod dcc;

use crate::util::is_word_char;

/// The CTCP delimiter byte.
pub const CTCP_DELIM: char = '\x01';

const LOW_QUOTE: char = '\x10';

/// Apply low-level quoting to a message.
pub fn low_quote(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\0' => out.push_str("\x100"),
            '\n' => out.push_str("\x10n"),
            '\r' => out.push_str("\x10r"),
            LOW_QUOTE => out.push_str("\x10\x10"),
            c => out.push(c),
        }
    }
    out
}

/// Reverse low-level quoting.
///
/// `\x10` followed by anything other than `0`, `n`, `r` or `\x10` is kept
/// as is.
pub fn low_dequote(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c != LOW_QUOTE {
            out.push(c);
            continue;
        }
        let replacement = match chars.peek() {
            Some('0') => '\0',
            Some('n') => '\n',
            Some('r') => '\r',
            Some(&LOW_QUOTE) => LOW_QUOTE,
            _ => {
                out.push(c);
                continue;
            }
        };
        chars.next();
        out.push(replacement);
    }
    out
}

/// Quote a CTCP message of the given type for sending.
///
/// An empty `message` produces a bare `\x01TYPE\x01`.
pub fn ctcp_quote(kind: &str, message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for c in message.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            CTCP_DELIM => escaped.push_str("\\a"),
            c => escaped.push(c),
        }
    }
    let escaped = low_quote(&escaped);

    if escaped.is_empty() {
        format!("{CTCP_DELIM}{kind}{CTCP_DELIM}")
    } else {
        format!("{CTCP_DELIM}{kind} {escaped}{CTCP_DELIM}")
    }
}

/// The CTCP and plain-text chunks of a message body, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CtcpChunks {
    /// Payloads found between delimiters.
    pub ctcp: Vec<String>,
    /// Text found outside delimiters.
    pub text: Vec<String>,
}

/// Split a message body into CTCP payloads and text.
///
/// An unpaired final `\x01` is treated as a literal `\a`. Returns `None` if no
/// delimiter remains after that repair.
pub fn ctcp_dequote(body: &str) -> Option<CtcpChunks> {
    let mut line = low_dequote(body);

    if line.matches(CTCP_DELIM).count() % 2 != 0 {
        if let Some(idx) = line.rfind(CTCP_DELIM) {
            line.replace_range(idx..idx + CTCP_DELIM.len_utf8(), "\\a");
        }
    }
    if !line.contains(CTCP_DELIM) {
        return None;
    }

    let mut chunks: Vec<&str> = line.split(CTCP_DELIM).collect();
    while chunks.last().map_or(false, |c| c.is_empty()) {
        chunks.pop();
    }

    let mut chunks = chunks.into_iter().map(unescape_chunk);
    let mut result = CtcpChunks::default();

    if line.starts_with(CTCP_DELIM) {
        // split() yields an empty chunk before a leading delimiter
        chunks.next();
        result.ctcp.extend(chunks.next());
    }
    while let Some(text) = chunks.next() {
        result.text.push(text);
        result.ctcp.extend(chunks.next());
    }

    Some(result)
}

/// Undo CTCP-level quoting inside one chunk.
fn unescape_chunk(chunk: &str) -> String {
    let mut out = String::with_capacity(chunk.len());
    let mut chars = chunk.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('a') => out.push(CTCP_DELIM),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Split a CTCP payload into its name and argument string.
///
/// The name is a run of word characters that must be followed by the end of
/// the payload or a space. Returns `None` for anything else.
///
/// ```
/// use slirc_support::ctcp::split_payload;
///
/// assert_eq!(split_payload("PING 12345"), Some(("PING", Some("12345"))));
/// assert_eq!(split_payload("VERSION"), Some(("VERSION", None)));
/// assert_eq!(split_payload("!bogus"), None);
/// ```
pub fn split_payload(payload: &str) -> Option<(&str, Option<&str>)> {
    let end = payload
        .find(|c: char| !is_word_char(c))
        .unwrap_or(payload.len());
    if end == 0 {
        return None;
    }
    let (name, rest) = payload.split_at(end);
    if rest.is_empty() {
        return Some((name, None));
    }
    rest.strip_prefix(' ').map(|args| (name, Some(args)))
}

/// Strip an identify-msg marker from the start of a CTCP payload.
///
/// A leading `+` means identified, `-` means not identified; either is
/// removed. Anything else is left in place and counts as not identified.
pub fn strip_identify_marker(payload: &str) -> (bool, &str) {
    match payload.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, payload.strip_prefix('-').unwrap_or(payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_quote() {
        assert_eq!(low_quote("a\0b\nc\rd\x10e"), "a\x100b\x10nc\x10rd\x10\x10e");
        assert_eq!(low_dequote("a\x100b\x10nc\x10rd\x10\x10e"), "a\0b\nc\rd\x10e");
    }

    #[test]
    fn test_low_dequote_all_occurrences() {
        assert_eq!(low_dequote("\x10n\x10n"), "\n\n");
        assert_eq!(low_dequote("x\x10"), "x\x10");
        assert_eq!(low_dequote("\x10z"), "\x10z");
    }

    #[test]
    fn test_ctcp_quote() {
        assert_eq!(ctcp_quote("VERSION", ""), "\x01VERSION\x01");
        assert_eq!(ctcp_quote("PING", "a\\b\x01c"), "\x01PING a\\\\b\\ac\x01");
        assert_eq!(ctcp_quote("ACTION", "line\nbreak"), "\x01ACTION line\x10nbreak\x01");
    }

    #[test]
    fn test_dequote_quote_round_trip() {
        let body = ctcp_quote("PING", "a\\b\x01c\nd");
        let chunks = ctcp_dequote(&body).unwrap();
        assert_eq!(chunks.ctcp, vec!["PING a\\b\x01c\nd"]);
    }

    #[test]
    fn test_dequote_text_first() {
        let chunks = ctcp_dequote("hello \x01VERSION\x01 world \x01TIME\x01").unwrap();
        assert_eq!(chunks.text, vec!["hello ", " world "]);
        assert_eq!(chunks.ctcp, vec!["VERSION", "TIME"]);
    }

    #[test]
    fn test_dequote_two_ctcps() {
        let chunks = ctcp_dequote("\x01VERSION\x01\x01TIME\x01").unwrap();
        assert_eq!(chunks.ctcp, vec!["VERSION", "TIME"]);
        assert_eq!(chunks.text, vec![""]);
    }

    #[test]
    fn test_dequote_unbalanced() {
        let chunks = ctcp_dequote("\x01VERSION\x01 and \x01").unwrap();
        assert_eq!(chunks.ctcp, vec!["VERSION"]);
        assert_eq!(chunks.text, vec![" and \x01"]);

        assert_eq!(ctcp_dequote("\x01VERSION"), None);
        assert_eq!(ctcp_dequote("no delimiters"), None);
    }

    #[test]
    fn test_dequote_only_delimiters() {
        assert_eq!(ctcp_dequote("\x01\x01"), Some(CtcpChunks::default()));
    }

    #[test]
    fn test_unescape_chunk() {
        assert_eq!(unescape_chunk("a\\\\b"), "a\\b");
        assert_eq!(unescape_chunk("\\a"), "\x01");
        assert_eq!(unescape_chunk("\\x\\"), "x\\");
    }

    #[test]
    fn test_split_payload() {
        assert_eq!(split_payload("ACTION waves hello"), Some(("ACTION", Some("waves hello"))));
        assert_eq!(split_payload("PING "), Some(("PING", Some(""))));
        assert_eq!(split_payload(""), None);
        assert_eq!(split_payload("FOO\tbar"), None);
    }

    #[test]
    fn test_strip_identify_marker() {
        assert_eq!(strip_identify_marker("+ACTION x"), (true, "ACTION x"));
        assert_eq!(strip_identify_marker("-ACTION x"), (false, "ACTION x"));
        assert_eq!(strip_identify_marker("ACTION x"), (false, "ACTION x"));
    }
}
