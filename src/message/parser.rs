//! The stateful line parser.

use super::classify::classify;
use super::types::{Message, MessageKind};
use crate::caps::CapSubCommand;
use crate::error::ParseError;
use crate::line::{decompose, Line};
use crate::state::SessionState;

/// Decodes raw lines for one connection, tracking ISUPPORT and capabilities.
///
/// 005 replies are merged into the session state and `CAP ACK` replies update
/// the enabled capability set, so later lines are classified against what the
/// server has announced.
///
/// # Example
///
/// ```
/// use slirc_support::message::{MessageKind, Parser};
/// use slirc_support::isupport::ISupportValue;
///
/// let mut parser = Parser::new();
/// parser
///     .parse(":adams.freenode.net 005 dan CHANTYPES=#& MODES=4 :are supported by this server")
///     .unwrap();
/// assert_eq!(parser.state().get("MODES"), Some(&ISupportValue::int(4)));
///
/// let msg = parser.parse(":foo!bar@baz PRIVMSG &local :hi").unwrap().unwrap();
/// match msg.kind {
///     MessageKind::Chat(chat) => assert_eq!(chat.channel.as_deref(), Some("&local")),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Parser {
    state: SessionState,
}

impl Parser {
    /// A parser with default session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser resuming from existing session state.
    pub fn with_state(state: SessionState) -> Self {
        Self { state }
    }

    /// The current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Consume the parser, returning its session state.
    pub fn into_state(self) -> SessionState {
        self.state
    }

    /// Decode one raw line.
    ///
    /// `Ok(None)` means the line was valid IRC but carried a malformed CTCP
    /// or DCC payload; it should be skipped.
    pub fn parse(&mut self, raw: &str) -> Result<Option<Message>, ParseError> {
        let line = decompose(raw)?;
        Ok(self.parse_line(line))
    }

    /// Classify an already decomposed line.
    pub fn parse_line(&mut self, line: Line) -> Option<Message> {
        let message = classify(line, &self.state)?;

        match &message.kind {
            MessageKind::ISupport(update) => self.state.merge_isupport(update),
            MessageKind::Cap(cap) if cap.subcommand == CapSubCommand::Ack => {
                self.state.apply_cap_ack(&cap.capabilities);
            }
            _ => {}
        }

        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isupport::{ISupportValue, Limit};

    #[test]
    fn test_isupport_side_effect() {
        let mut parser = Parser::new();
        let msg = parser
            .parse(":adams.freenode.net 005 dsfdsfdsf CHANTYPES=# PREFIX=(ov)@+ MODES=4 :are supported by this server")
            .unwrap()
            .unwrap();
        assert_eq!(msg.message_type(), "005");
        assert_eq!(parser.state().get("MODES"), Some(&ISupportValue::Limit(Limit::Bounded(4))));
        assert_eq!(parser.state().prefixes(), &[('o', '@'), ('v', '+')]);
        assert_eq!(parser.state().limit("NICKLEN"), Limit::Unbounded);
    }

    #[test]
    fn test_cap_ack_side_effect() {
        let mut parser = Parser::new();
        parser.parse(":server CAP dan LS :identify-msg").unwrap();
        assert!(!parser.state().has_capability("identify-msg"));

        parser.parse(":server CAP dan ACK :identify-msg").unwrap();
        assert!(parser.state().has_capability("identify-msg"));

        let msg = parser.parse(":foo!bar@baz PRIVMSG #chan :+hi").unwrap().unwrap();
        let MessageKind::Chat(chat) = msg.kind else { panic!("expected chat") };
        assert_eq!(chat.identified, Some(true));
        assert_eq!(chat.message, "hi");

        parser.parse(":server CAP dan ACK :-identify-msg").unwrap();
        assert!(!parser.state().has_capability("identify-msg"));
    }

    #[test]
    fn test_parse_errors_propagate() {
        let mut parser = Parser::new();
        assert!(matches!(
            parser.parse("+"),
            Err(ParseError::NotIrcProtocol { .. })
        ));
    }

    #[test]
    fn test_state_round_trip() {
        let mut parser = Parser::new();
        parser.parse(":s 005 me NICKLEN=9 :are supported").unwrap();
        let state = parser.into_state();
        let parser = Parser::with_state(state.clone());
        assert_eq!(parser.state(), &state);
        assert_eq!(state.limit("NICKLEN"), Limit::Bounded(9));
    }
}
