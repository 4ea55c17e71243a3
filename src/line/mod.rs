//! Low-level IRC line grammar.
//!
//! A [`Line`] is the untyped decomposition of one protocol line: optional
//! IRCv3 tags, optional prefix, command and ordered arguments. Whether the
//! last argument arrived as a colon-prefixed trailing argument is not kept.
//!
//! # Example
//!
//! ```
//! use slirc_support::line::{compose, Line};
//!
//! let line: Line = "@id=42 :irc.example.net 001 dan :Welcome to the network".parse().unwrap();
//! assert_eq!(line.command, "001");
//! assert_eq!(line.args[1], "Welcome to the network");
//! assert_eq!(
//!     compose(&line).unwrap(),
//!     "@id=42 :irc.example.net 001 dan :Welcome to the network"
//! );
//! ```

mod compose;
mod parse;
pub mod tags;

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ParseError;

pub use self::compose::compose;
pub use self::parse::decompose;

/// The value of an IRCv3 message tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagValue {
    /// The tag was present with no `=value`.
    Flag,
    /// The unescaped tag value.
    Value(String),
}

impl TagValue {
    /// The value as a string, if one was given.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// One decomposed protocol line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// IRCv3 tags; empty when the line had none.
    pub tags: BTreeMap<String, TagValue>,
    /// The source, usually `nick!user@host` or a server name.
    pub prefix: Option<String>,
    /// The upper-cased command or three-digit numeric.
    pub command: String,
    /// Arguments in order. Only the last may contain spaces.
    pub args: Vec<String>,
}

impl Line {
    /// Create a line with only a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Set the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Replace the arguments.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Add or replace a tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: TagValue) -> Self {
        self.tags.insert(key.into(), value);
        self
    }

    /// Look up a tag value. Flags yield `Some(None)`.
    pub fn tag(&self, key: &str) -> Option<Option<&str>> {
        self.tags.get(key).map(TagValue::as_str)
    }
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decompose(s)
    }
}
