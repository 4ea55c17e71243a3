//! Small string helpers shared by the extractors.

/// Parse the leading run of ASCII digits in `s`, yielding 0 when there is none.
///
/// Servers occasionally send values like `MODES=` or `CHANLIMIT=#:` with no
/// number, and DCC peers pad numbers with junk; both degrade to zero instead
/// of failing the whole line.
///
/// ```
/// use slirc_support::util::leading_u64;
///
/// assert_eq!(leading_u64("300"), 300);
/// assert_eq!(leading_u64("12abc"), 12);
/// assert_eq!(leading_u64(""), 0);
/// assert_eq!(leading_u64("x1"), 0);
/// ```
pub fn leading_u64(s: &str) -> u64 {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s[..end]
        .bytes()
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')))
}

/// Split `s` at the first run of `delim`, skipping the run.
///
/// Returns `None` when `delim` does not occur or nothing follows it.
pub(crate) fn split_at_run(s: &str, delim: char) -> Option<(&str, &str)> {
    let idx = s.find(delim)?;
    let rest = s[idx..].trim_start_matches(delim);
    if rest.is_empty() {
        return None;
    }
    Some((&s[..idx], rest))
}

/// True for characters allowed in a regex-style `\w` word.
#[inline]
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Map an empty string to `None`.
#[inline]
pub(crate) fn non_empty(s: Option<&String>) -> Option<String> {
    s.filter(|s| !s.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_u64_saturates() {
        assert_eq!(leading_u64("99999999999999999999999"), u64::MAX);
        assert_eq!(leading_u64("  42 "), 42);
    }

    #[test]
    fn test_split_at_run() {
        assert_eq!(split_at_run("SEND  foo bar", ' '), Some(("SEND", "foo bar")));
        assert_eq!(split_at_run("SEND", ' '), None);
        assert_eq!(split_at_run("SEND   ", ' '), None);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(&String::new())), None);
        assert_eq!(non_empty(Some(&"bye!".to_string())), Some("bye!".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
