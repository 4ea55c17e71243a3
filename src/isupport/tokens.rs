//! Typed conversion of individual ISUPPORT tokens.

use std::collections::BTreeMap;

use crate::mode::ChanModes;
use crate::util::leading_u64;

use super::{ISupportValue, Limit};

/// How a known token's value is converted.
#[derive(Clone, Copy)]
enum Transform {
    Int,
    Chars,
    Str,
    Prefix,
    ChanModes,
    CharLimits,
    TargMax,
}

static TRANSFORMS: &[(&str, Transform)] = &[
    ("MODES", Transform::Int),
    ("MAXCHANNELS", Transform::Int),
    ("NICKLEN", Transform::Int),
    ("MAXBANS", Transform::Int),
    ("TOPICLEN", Transform::Int),
    ("KICKLEN", Transform::Int),
    ("CHANNELLEN", Transform::Int),
    ("CHIDLEN", Transform::Int),
    ("SILENCE", Transform::Int),
    ("AWAYLEN", Transform::Int),
    ("MAXTARGETS", Transform::Int),
    ("WATCH", Transform::Int),
    ("MONITOR", Transform::Int),
    ("STATUSMSG", Transform::Chars),
    ("ELIST", Transform::Chars),
    ("CHANTYPES", Transform::Chars),
    ("CASEMAPPING", Transform::Str),
    ("NETWORK", Transform::Str),
    ("PREFIX", Transform::Prefix),
    ("CHANMODES", Transform::ChanModes),
    ("CHANLIMIT", Transform::CharLimits),
    ("MAXLIST", Transform::CharLimits),
    ("IDCHAN", Transform::CharLimits),
    ("TARGMAX", Transform::TargMax),
];

/// Parse a single `NAME` or `NAME=VALUE` token.
///
/// Returns `None` for an empty name. Unknown names with a value are kept as
/// [`ISupportValue::Str`]; any name without `=` is a [`ISupportValue::Flag`].
///
/// ```
/// use slirc_support::isupport::{parse_token, ISupportValue};
///
/// assert_eq!(
///     parse_token("NICKLEN=16"),
///     Some(("NICKLEN".to_string(), ISupportValue::int(16)))
/// );
/// assert_eq!(
///     parse_token("IRCD=dancer"),
///     Some(("IRCD".to_string(), ISupportValue::Str("dancer".to_string())))
/// );
/// ```
pub fn parse_token(token: &str) -> Option<(String, ISupportValue)> {
    let (name, value) = match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    };
    if name.is_empty() {
        return None;
    }

    let value = match value {
        None => ISupportValue::Flag,
        Some(value) => match TRANSFORMS.iter().find(|(n, _)| *n == name) {
            Some((_, transform)) => apply(*transform, value),
            None => ISupportValue::Str(value.to_string()),
        },
    };

    Some((name.to_string(), value))
}

fn apply(transform: Transform, value: &str) -> ISupportValue {
    match transform {
        Transform::Int => ISupportValue::int(leading_u64(value)),
        Transform::Chars => ISupportValue::Chars(value.chars().collect()),
        Transform::Str => ISupportValue::Str(value.to_string()),
        Transform::Prefix => match parse_prefix(value) {
            Some(pairs) => ISupportValue::Prefix(pairs),
            None => {
                tracing::debug!(value, "malformed PREFIX, keeping raw value");
                ISupportValue::Str(value.to_string())
            }
        },
        Transform::ChanModes => ISupportValue::ChanModes(ChanModes::parse(value)),
        Transform::CharLimits => ISupportValue::CharLimits(parse_char_limits(value)),
        Transform::TargMax => ISupportValue::TargMax(parse_targmax(value)),
    }
}

/// `(ov)@+` → `[('o', '@'), ('v', '+')]`.
///
/// Modes without a matching display character are dropped.
fn parse_prefix(value: &str) -> Option<Vec<(char, char)>> {
    let rest = value.strip_prefix('(')?;
    let (modes, prefixes) = rest.split_once(')')?;
    if modes.is_empty() || prefixes.is_empty() {
        return None;
    }
    Some(modes.chars().zip(prefixes.chars()).collect())
}

/// `#&:100,!:5` → `{'#': 100, '&': 100, '!': 5}`. A missing number means no
/// limit.
fn parse_char_limits(value: &str) -> BTreeMap<char, Limit> {
    let mut limits = BTreeMap::new();
    for pair in value.split(',') {
        let (chars, num) = pair.split_once(':').unwrap_or((pair, ""));
        let limit = if num.is_empty() {
            Limit::Unbounded
        } else {
            Limit::Bounded(leading_u64(num))
        };
        for c in chars.chars() {
            limits.insert(c, limit);
        }
    }
    limits
}

/// `PRIVMSG:4,NOTICE:,JOIN:` → `{PRIVMSG: 4, NOTICE: 0, JOIN: 0}`.
fn parse_targmax(value: &str) -> BTreeMap<String, u64> {
    value
        .split(',')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, num) = pair.split_once(':').unwrap_or((pair, ""));
            (name.to_string(), leading_u64(num))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn value(token: &str) -> ISupportValue {
        parse_token(token).map(|(_, v)| v).unwrap()
    }

    #[test]
    fn test_ints_are_lenient() {
        assert_eq!(value("MODES=4"), ISupportValue::int(4));
        assert_eq!(value("SILENCE="), ISupportValue::int(0));
        assert_eq!(value("WATCH=abc"), ISupportValue::int(0));
    }

    #[test]
    fn test_char_sets() {
        assert_eq!(
            value("STATUSMSG=@+"),
            ISupportValue::Chars(BTreeSet::from(['@', '+']))
        );
        assert_eq!(value("ELIST="), ISupportValue::Chars(BTreeSet::new()));
    }

    #[test]
    fn test_prefix() {
        assert_eq!(
            value("PREFIX=(qaohv)~&@%+"),
            ISupportValue::Prefix(vec![
                ('q', '~'),
                ('a', '&'),
                ('o', '@'),
                ('h', '%'),
                ('v', '+'),
            ])
        );
        assert_eq!(value("PREFIX=garbage"), ISupportValue::Str("garbage".to_string()));
        assert_eq!(value("PREFIX=()"), ISupportValue::Str("()".to_string()));
    }

    #[test]
    fn test_chanmodes() {
        assert_eq!(
            value("CHANMODES=eIbq,k,flj,CFLMPQcgimnprstz"),
            ISupportValue::ChanModes(ChanModes::new("eIbq", "k", "flj", "CFLMPQcgimnprstz"))
        );
    }

    #[test]
    fn test_char_limits() {
        assert_eq!(
            value("CHANLIMIT=#&:100,!:5"),
            ISupportValue::CharLimits(BTreeMap::from([
                ('#', Limit::Bounded(100)),
                ('&', Limit::Bounded(100)),
                ('!', Limit::Bounded(5)),
            ]))
        );
        assert_eq!(
            value("CHANLIMIT=#:"),
            ISupportValue::CharLimits(BTreeMap::from([('#', Limit::Unbounded)]))
        );
        assert_eq!(
            value("MAXLIST=bqeI:100"),
            ISupportValue::CharLimits(
                "bqeI".chars().map(|c| (c, Limit::Bounded(100))).collect()
            )
        );
    }

    #[test]
    fn test_targmax() {
        assert_eq!(
            value("TARGMAX=NAMES:1,LIST:1,KICK:1,WHOIS:1,PRIVMSG:4,NOTICE:4,ACCEPT:,MONITOR:"),
            ISupportValue::TargMax(BTreeMap::from([
                ("NAMES".to_string(), 1),
                ("LIST".to_string(), 1),
                ("KICK".to_string(), 1),
                ("WHOIS".to_string(), 1),
                ("PRIVMSG".to_string(), 4),
                ("NOTICE".to_string(), 4),
                ("ACCEPT".to_string(), 0),
                ("MONITOR".to_string(), 0),
            ]))
        );
    }

    #[test]
    fn test_strings_and_flags() {
        assert_eq!(value("NETWORK=freenode"), ISupportValue::Str("freenode".to_string()));
        assert_eq!(value("CASEMAPPING=ascii"), ISupportValue::Str("ascii".to_string()));
        assert_eq!(value("CAPAB"), ISupportValue::Flag);
        assert_eq!(value("EXCEPTS=e"), ISupportValue::Str("e".to_string()));
        assert_eq!(parse_token("=x"), None);
    }
}
