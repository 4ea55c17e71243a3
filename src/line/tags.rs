//! IRCv3 message tag parsing and escaping.

use std::collections::BTreeMap;
use std::fmt::{Result as FmtResult, Write};

use super::TagValue;

/// Parse the raw tag section (without the leading `@`) into a map.
///
/// Pairs are separated by `;` and split on the first `=`. A key without `=`
/// is a flag. Empty pairs are skipped; a repeated key keeps the last value.
pub(crate) fn parse_tags(raw: &str) -> BTreeMap<String, TagValue> {
    raw.split(';')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), TagValue::Value(unescape_tag_value(value))),
            None => (pair.to_string(), TagValue::Flag),
        })
        .collect()
}

/// Write `tags` in wire format, without the leading `@` or trailing space.
pub(crate) fn write_tags(f: &mut dyn Write, tags: &BTreeMap<String, TagValue>) -> FmtResult {
    for (i, (key, value)) in tags.iter().enumerate() {
        if i > 0 {
            f.write_char(';')?;
        }
        f.write_str(key)?;
        if let TagValue::Value(value) = value {
            f.write_char('=')?;
            escape_tag_value(f, value)?;
        }
    }
    Ok(())
}

/// Escape a tag value for serialization.
///
/// Escapes special characters according to the IRCv3 message-tags rules.
pub fn escape_tag_value(f: &mut dyn Write, value: &str) -> FmtResult {
    for c in value.chars() {
        match c {
            ';' => f.write_str("\\:")?,
            ' ' => f.write_str("\\s")?,
            '\\' => f.write_str("\\\\")?,
            '\r' => f.write_str("\\r")?,
            '\n' => f.write_str("\\n")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Unescape a tag value from wire format.
///
/// Reverses the escaping applied by [`escape_tag_value`]. Unknown escapes
/// drop the backslash, and a lone trailing backslash is removed.
pub fn unescape_tag_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    unescaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let tags = parse_tags("time=2023-01-01T00:00:00Z;draft/bot;msgid=a\\sb=c");
        assert_eq!(tags.len(), 3);
        assert_eq!(
            tags["time"],
            TagValue::Value("2023-01-01T00:00:00Z".to_string())
        );
        assert_eq!(tags["draft/bot"], TagValue::Flag);
        assert_eq!(tags["msgid"], TagValue::Value("a b=c".to_string()));
    }

    #[test]
    fn test_parse_tags_skips_empty_pairs() {
        let tags = parse_tags(";a;;b=1;");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags["b"], TagValue::Value("1".to_string()));
    }

    #[test]
    fn test_write_tags() {
        let mut tags = BTreeMap::new();
        tags.insert("b".to_string(), TagValue::Flag);
        tags.insert("a".to_string(), TagValue::Value("x;y z".to_string()));
        let mut out = String::new();
        write_tags(&mut out, &tags).unwrap();
        assert_eq!(out, "a=x\\:y\\sz;b");
    }

    #[test]
    fn test_unescape_combined() {
        let input = "a\\:b\\sc\\\\d\\re\\nf";
        let expected = "a;b c\\d\re\nf";
        assert_eq!(unescape_tag_value(input), expected);
    }

    #[test]
    fn test_unescape_trailing_backslash() {
        assert_eq!(unescape_tag_value("test\\"), "test");
    }

    #[test]
    fn test_unescape_unknown_escape() {
        assert_eq!(unescape_tag_value("a\\xb"), "axb");
    }

    #[test]
    fn test_escape_roundtrip() {
        let values = [
            "simple",
            "with space",
            "with;semicolon",
            "with\\backslash",
            "complex; \\ \n \r all",
        ];

        for original in values {
            let mut escaped = String::new();
            escape_tag_value(&mut escaped, original).unwrap();
            assert_eq!(unescape_tag_value(&escaped), original, "via {:?}", escaped);
        }
    }
}
