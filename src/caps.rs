//! IRCv3 capability negotiation replies.
//!
//! Only the reply side is handled here: `CAP LS`, `CAP LIST` and `CAP ACK`
//! lines are parsed into a capability → modifier map, and `CAP ACK` replies
//! drive the enabled set in [`SessionState`](crate::state::SessionState).
//!
//! # Reference
//! - IRCv3 Capability Negotiation: <https://ircv3.net/specs/extensions/capability-negotiation>

use std::collections::BTreeMap;
use std::fmt;

/// Prefixes each message body with `+`/`-` to flag whether the sender is
/// identified to services.
pub const IDENTIFY_MSG: &str = "identify-msg";

/// Adds the account name and realname to JOIN.
pub const EXTENDED_JOIN: &str = "extended-join";

/// `CAP` subcommands whose replies carry a capability list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapSubCommand {
    /// Capabilities the server supports.
    Ls,
    /// Capabilities currently enabled.
    List,
    /// Capabilities the server agreed to change.
    Ack,
}

impl CapSubCommand {
    /// Recognize a subcommand token. Matching is exact (`LS`, not `ls`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "LS" => Some(Self::Ls),
            "LIST" => Some(Self::List),
            "ACK" => Some(Self::Ack),
            _ => None,
        }
    }

    /// The wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ls => "LS",
            Self::List => "LIST",
            Self::Ack => "ACK",
        }
    }
}

impl fmt::Display for CapSubCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A modifier attached to a capability name in a CAP reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapModifier {
    /// `-`: the capability is being disabled.
    Disable,
    /// `~` or no modifier: the capability is being enabled.
    Enable,
    /// `=`: the capability cannot be disabled.
    Sticky,
}

impl CapModifier {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Self::Disable),
            '~' => Some(Self::Enable),
            '=' => Some(Self::Sticky),
            _ => None,
        }
    }
}

/// Parse a CAP reply body such as `"-sasl =multi-prefix ~away-notify tls"`.
///
/// Each whitespace-separated token is a run of modifier characters followed
/// by the capability name. A token without modifiers means
/// [`CapModifier::Enable`]. A capability listed twice keeps its last entry.
///
/// ```
/// use slirc_support::caps::{parse_cap_reply, CapModifier};
///
/// let caps = parse_cap_reply("-sasl multi-prefix");
/// assert_eq!(caps["sasl"], vec![CapModifier::Disable]);
/// assert_eq!(caps["multi-prefix"], vec![CapModifier::Enable]);
/// ```
pub fn parse_cap_reply(reply: &str) -> BTreeMap<String, Vec<CapModifier>> {
    reply
        .split_whitespace()
        .map(|token| {
            let name = token.trim_start_matches(['-', '~', '=']);
            let mods = &token[..token.len() - name.len()];
            let modifiers = if mods.is_empty() {
                vec![CapModifier::Enable]
            } else {
                mods.chars().filter_map(CapModifier::from_char).collect()
            };
            (name.to_string(), modifiers)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommand_tokens() {
        assert_eq!(CapSubCommand::from_token("LS"), Some(CapSubCommand::Ls));
        assert_eq!(CapSubCommand::from_token("ACK"), Some(CapSubCommand::Ack));
        assert_eq!(CapSubCommand::from_token("NAK"), None);
        assert_eq!(CapSubCommand::from_token("ls"), None);
        assert_eq!(CapSubCommand::List.to_string(), "LIST");
    }

    #[test]
    fn test_parse_cap_reply() {
        let caps = parse_cap_reply("-sasl =multi-prefix ~away-notify identify-msg");
        assert_eq!(caps.len(), 4);
        assert_eq!(caps["sasl"], vec![CapModifier::Disable]);
        assert_eq!(caps["multi-prefix"], vec![CapModifier::Sticky]);
        assert_eq!(caps["away-notify"], vec![CapModifier::Enable]);
        assert_eq!(caps["identify-msg"], vec![CapModifier::Enable]);
    }

    #[test]
    fn test_stacked_modifiers() {
        let caps = parse_cap_reply("-=foo");
        assert_eq!(caps["foo"], vec![CapModifier::Disable, CapModifier::Sticky]);
    }

    #[test]
    fn test_empty_reply() {
        assert!(parse_cap_reply("").is_empty());
        assert!(parse_cap_reply("   ").is_empty());
    }
}
