//! ISUPPORT (RPL_ISUPPORT / 005) values.
//!
//! Servers advertise their limits and features as `NAME` or `NAME=VALUE`
//! tokens. Known names are converted into typed [`ISupportValue`]s; unknown
//! names keep their raw string value.
//!
//! # Example
//!
//! ```
//! use slirc_support::isupport::{parse_isupport, ISupportValue, Limit};
//!
//! let update = parse_isupport(["dan", "MODES=4", "PREFIX=(ov)@+", "EXCEPTS", "are supported"]);
//! assert_eq!(update.values["MODES"], ISupportValue::Limit(Limit::Bounded(4)));
//! assert_eq!(update.values["PREFIX"], ISupportValue::Prefix(vec![('o', '@'), ('v', '+')]));
//! assert_eq!(update.values["EXCEPTS"], ISupportValue::Flag);
//! ```

mod tokens;

use std::collections::{BTreeMap, BTreeSet};

use crate::mode::ChanModes;

pub use self::tokens::parse_token;

/// A numeric limit that may be absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Limit {
    /// At most this many.
    Bounded(u64),
    /// No limit advertised.
    Unbounded,
}

impl Limit {
    /// The bound, if any.
    pub fn get(self) -> Option<u64> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    /// True if `n` is within this limit.
    pub fn allows(self, n: u64) -> bool {
        match self {
            Self::Bounded(max) => n <= max,
            Self::Unbounded => true,
        }
    }
}

/// A typed ISUPPORT value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ISupportValue {
    /// The token was sent without a value.
    Flag,
    /// A numeric limit (`NICKLEN`, `MODES`, ...).
    Limit(Limit),
    /// A plain string (`NETWORK`, `CASEMAPPING`, unknown tokens).
    Str(String),
    /// A set of characters (`CHANTYPES`, `STATUSMSG`, `ELIST`).
    Chars(BTreeSet<char>),
    /// `PREFIX` as ordered `(mode, display)` pairs, highest rank first.
    Prefix(Vec<(char, char)>),
    /// `CHANMODES` classes.
    ChanModes(ChanModes),
    /// Per-character limits (`CHANLIMIT`, `MAXLIST`, `IDCHAN`).
    CharLimits(BTreeMap<char, Limit>),
    /// Per-command target limits (`TARGMAX`).
    TargMax(BTreeMap<String, u64>),
}

impl ISupportValue {
    /// Shorthand for a bounded numeric value.
    pub fn int(n: u64) -> Self {
        Self::Limit(Limit::Bounded(n))
    }

    /// The value as a bounded integer.
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Limit(limit) => limit.get(),
            _ => None,
        }
    }

    /// The value as a limit.
    pub fn as_limit(&self) -> Option<Limit> {
        match self {
            Self::Limit(limit) => Some(*limit),
            _ => None,
        }
    }

    /// The value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a character set.
    pub fn as_chars(&self) -> Option<&BTreeSet<char>> {
        match self {
            Self::Chars(set) => Some(set),
            _ => None,
        }
    }
}

/// The typed contents of one ISUPPORT reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ISupportUpdate {
    /// Tokens set by this reply.
    pub values: BTreeMap<String, ISupportValue>,
    /// Tokens negated with `-NAME`.
    pub removed: Vec<String>,
}

/// Parse the arguments of a 005 reply.
///
/// The first argument (the client's nickname) and a final argument
/// containing a space (the human-readable comment) are skipped. A later
/// token overrides an earlier one with the same name.
pub fn parse_isupport<I, S>(args: I) -> ISupportUpdate
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<S> = args.into_iter().collect();
    let mut tokens = args.get(1..).unwrap_or_default();
    if let Some((last, init)) = tokens.split_last() {
        if last.as_ref().contains(' ') {
            tokens = init;
        }
    }

    let mut update = ISupportUpdate::default();
    for token in tokens {
        let token = token.as_ref();
        if let Some(name) = token.strip_prefix('-') {
            if !name.is_empty() {
                update.values.remove(name);
                update.removed.push(name.to_string());
            }
            continue;
        }
        if let Some((name, value)) = parse_token(token) {
            update.removed.retain(|n| n != &name);
            update.values.insert(name, value);
        }
    }
    update
}

/// The ISUPPORT table assumed before the server sends any 005 reply.
pub fn default_isupport() -> BTreeMap<String, ISupportValue> {
    let chars = |s: &str| ISupportValue::Chars(s.chars().collect());
    let unbounded = ISupportValue::Limit(Limit::Unbounded);

    BTreeMap::from([
        ("PREFIX".to_string(), ISupportValue::Prefix(vec![('o', '@'), ('v', '+')])),
        ("CHANTYPES".to_string(), chars("#")),
        ("CHANMODES".to_string(), ISupportValue::ChanModes(ChanModes::default())),
        ("MODES".to_string(), ISupportValue::int(1)),
        ("NICKLEN".to_string(), unbounded.clone()),
        ("MAXBANS".to_string(), unbounded.clone()),
        ("TOPICLEN".to_string(), unbounded.clone()),
        ("KICKLEN".to_string(), unbounded.clone()),
        ("CHANNELLEN".to_string(), unbounded.clone()),
        ("CHIDLEN".to_string(), ISupportValue::int(5)),
        ("AWAYLEN".to_string(), unbounded.clone()),
        ("MAXTARGETS".to_string(), ISupportValue::int(1)),
        ("MAXCHANNELS".to_string(), unbounded),
        (
            "CHANLIMIT".to_string(),
            ISupportValue::CharLimits(BTreeMap::from([('#', Limit::Unbounded)])),
        ),
        ("STATUSMSG".to_string(), chars("@+")),
        ("CASEMAPPING".to_string(), ISupportValue::Str("rfc1459".to_string())),
        ("ELIST".to_string(), chars("")),
        ("MONITOR".to_string(), ISupportValue::int(0)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_isupport_skips_nick_and_comment() {
        let update = parse_isupport([
            "dsfdsfdsf",
            "CHANTYPES=#",
            "PREFIX=(ov)@+",
            "MODES=4",
            "are supported by this server",
        ]);
        assert_eq!(update.values.len(), 3);
        assert_eq!(update.values["MODES"], ISupportValue::int(4));
        assert_eq!(
            update.values["CHANTYPES"],
            ISupportValue::Chars(BTreeSet::from(['#']))
        );
        assert!(!update.values.contains_key("dsfdsfdsf"));
    }

    #[test]
    fn test_parse_isupport_negation() {
        let update = parse_isupport(["nick", "EXCEPTS", "-EXCEPTS", "-INVEX", "-"]);
        assert!(update.values.is_empty());
        assert_eq!(update.removed, vec!["EXCEPTS", "INVEX"]);
    }

    #[test]
    fn test_parse_isupport_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(parse_isupport(empty), ISupportUpdate::default());
        assert_eq!(parse_isupport(["nick"]), ISupportUpdate::default());
    }

    #[test]
    fn test_defaults() {
        let defaults = default_isupport();
        assert_eq!(defaults["MODES"].as_int(), Some(1));
        assert_eq!(defaults["NICKLEN"].as_limit(), Some(Limit::Unbounded));
        assert_eq!(defaults["CASEMAPPING"].as_str(), Some("rfc1459"));
        assert!(defaults["ELIST"].as_chars().map_or(false, BTreeSet::is_empty));
        assert_eq!(
            defaults["CHANMODES"],
            ISupportValue::ChanModes(ChanModes::new("b", "k", "l", "imnpstr"))
        );
    }

    #[test]
    fn test_limit() {
        assert!(Limit::Unbounded.allows(u64::MAX));
        assert!(Limit::Bounded(5).allows(5));
        assert!(!Limit::Bounded(5).allows(6));
        assert_eq!(Limit::Bounded(5).get(), Some(5));
    }
}
