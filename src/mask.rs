//! Hostmask matching and normalization.
//!
//! Masks are `nick!user@host` patterns where `*` matches zero or more
//! characters and `?` matches exactly one. Matching is case-insensitive
//! under the server's casemapping.
//!
//! # Example
//!
//! ```
//! use slirc_support::casemap::CaseMapping;
//! use slirc_support::mask::{matches_mask, normalize_mask};
//!
//! let mask = normalize_mask("stalin*");
//! assert_eq!(mask, "stalin*!*@*");
//! assert!(matches_mask(&mask, "Stalin!joe@kremlin.ru", CaseMapping::Rfc1459).unwrap());
//! ```

use std::collections::BTreeMap;

use crate::casemap::{irc_upper_char, CaseMapping};
use crate::error::MaskError;

/// Match `candidate` against `mask` under `mapping`.
///
/// The whole candidate must match. Masks using extended-ban syntax (any `$`)
/// are rejected with [`MaskError::UnsupportedMask`].
pub fn matches_mask(mask: &str, candidate: &str, mapping: CaseMapping) -> Result<bool, MaskError> {
    if mask.contains('$') {
        return Err(MaskError::UnsupportedMask(mask.to_string()));
    }

    let pattern: Vec<char> = mask.chars().map(|c| irc_upper_char(c, mapping)).collect();
    let text: Vec<char> = candidate
        .chars()
        .map(|c| irc_upper_char(c, mapping))
        .collect();

    Ok(wildcard_match(&pattern, &text))
}

/// Match every candidate against every mask.
///
/// Returns each mask that matched at least once, mapped to the candidates it
/// matched in input order.
pub fn matches_mask_array<M, C>(
    masks: &[M],
    candidates: &[C],
    mapping: CaseMapping,
) -> Result<BTreeMap<String, Vec<String>>, MaskError>
where
    M: AsRef<str>,
    C: AsRef<str>,
{
    let mut results: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for mask in masks {
        let mask = mask.as_ref();
        for candidate in candidates {
            let candidate = candidate.as_ref();
            if matches_mask(mask, candidate, mapping)? {
                results
                    .entry(mask.to_string())
                    .or_default()
                    .push(candidate.to_string());
            }
        }
    }
    Ok(results)
}

/// Expand a partial mask into full `nick!user@host` form.
///
/// Runs of `*` collapse to one and missing parts default to `*`. A mask with
/// an `@` but no `!` is taken as `user@host`.
///
/// ```
/// use slirc_support::mask::normalize_mask;
///
/// assert_eq!(normalize_mask("*@*"), "*!*@*");
/// assert_eq!(normalize_mask("foo*"), "foo*!*@*");
/// assert_eq!(normalize_mask("nick!user"), "nick!user@*");
/// ```
pub fn normalize_mask(mask: &str) -> String {
    let mut collapsed = String::with_capacity(mask.len());
    for c in mask.chars() {
        if c == '*' && collapsed.ends_with('*') {
            continue;
        }
        collapsed.push(c);
    }

    let (nick, remainder) = if !collapsed.contains('!') && collapsed.contains('@') {
        ("*", Some(collapsed.as_str()))
    } else {
        match collapsed.split_once('!') {
            Some((nick, rest)) => (nick, Some(rest)),
            None => (collapsed.as_str(), None),
        }
    };

    let (user, host) = match remainder {
        Some(rest) if !rest.is_empty() => {
            let rest = rest.replace('!', "");
            match rest.split_once('@') {
                Some((user, host)) => (user.to_string(), host.replace('@', "")),
                None => (rest, "*".to_string()),
            }
        }
        _ => ("*".to_string(), "*".to_string()),
    };

    format!("{}!{}@{}", nick, user, host)
}

/// Iterative wildcard matcher with single-star backtracking.
fn wildcard_match(pattern: &[char], text: &[char]) -> bool {
    let mut p = 0;
    let mut t = 0;
    let mut star_p = None;
    let mut star_t = 0;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star_p = Some(p);
            star_t = t;
            p += 1;
        } else if let Some(sp) = star_p {
            p = sp + 1;
            star_t += 1;
            t = star_t;
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }

    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANMASK: &str = "stalin*!*@*";

    #[test]
    fn test_normalize_mask() {
        assert_eq!(normalize_mask("*@*"), "*!*@*");
        assert_eq!(normalize_mask("foo*"), "foo*!*@*");
        assert_eq!(normalize_mask("foo***"), "foo*!*@*");
        assert_eq!(normalize_mask("nick!user@host"), "nick!user@host");
        assert_eq!(normalize_mask("user@host"), "*!user@host");
        assert_eq!(normalize_mask("nick!"), "nick!*@*");
        assert_eq!(normalize_mask("a!b@c@d"), "a!b@cd");
    }

    #[test]
    fn test_matches_mask() {
        let rfc = CaseMapping::Rfc1459;
        assert!(matches_mask(BANMASK, "stalin!joe@kremlin.ru", rfc).unwrap());
        assert!(!matches_mask(BANMASK, "BinGOs!foo@blah.com", rfc).unwrap());
        assert!(matches_mask("*!*@*.RU", "stalin!joe@kremlin.ru", rfc).unwrap());
        assert!(matches_mask("n?ck!*@*", "nick!u@h", rfc).unwrap());
        assert!(!matches_mask("n?ck!*@*", "nck!u@h", rfc).unwrap());
    }

    #[test]
    fn test_matches_mask_casemapping() {
        assert!(matches_mask("{foo}!*@*", "[FOO]!u@h", CaseMapping::Rfc1459).unwrap());
        assert!(!matches_mask("{foo}!*@*", "[FOO]!u@h", CaseMapping::Ascii).unwrap());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let rfc = CaseMapping::Rfc1459;
        assert!(matches_mask("a.b!*@*", "a.b!u@h", rfc).unwrap());
        assert!(!matches_mask("a.b!*@*", "axb!u@h", rfc).unwrap());
        assert!(matches_mask("(x)+!*@*", "(x)+!u@h", rfc).unwrap());
    }

    #[test]
    fn test_extended_ban_rejected() {
        assert_eq!(
            matches_mask("$r:Lee*", "foo", CaseMapping::Rfc1459),
            Err(MaskError::UnsupportedMask("$r:Lee*".to_string()))
        );
    }

    #[test]
    fn test_matches_mask_array() {
        let result = matches_mask_array(
            &[BANMASK],
            &["stalin!joe@kremlin.ru", "BinGOs!foo@blah.com"],
            CaseMapping::Rfc1459,
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[BANMASK], vec!["stalin!joe@kremlin.ru".to_string()]);

        let none = matches_mask_array(&[BANMASK], &["BinGOs!foo@blah.com"], CaseMapping::Rfc1459)
            .unwrap();
        assert!(none.is_empty());
    }
}
