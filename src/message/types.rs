//! Typed message values.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::caps::{CapModifier, CapSubCommand};
use crate::ctcp::dcc::DccRequest;
use crate::isupport::ISupportUpdate;
use crate::line::{Line, TagValue};
use crate::mode::ModeChange;
use crate::numerics::{is_numeric, numeric_to_name};

/// A decoded IRC message.
///
/// The header fields mirror the source [`Line`]; `kind` carries whatever the
/// classifier could extract on top of that.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// IRCv3 tags.
    pub tags: BTreeMap<String, TagValue>,
    /// The sender prefix, if any.
    pub prefix: Option<String>,
    /// The upper-cased command or numeric.
    pub command: String,
    /// The raw arguments.
    pub args: Vec<String>,
    /// The variant-specific payload.
    pub kind: MessageKind,
}

impl Message {
    pub(crate) fn from_line(line: Line, kind: MessageKind) -> Self {
        Self {
            tags: line.tags,
            prefix: line.prefix,
            command: line.command,
            args: line.args,
            kind,
        }
    }

    /// The message type discriminator.
    ///
    /// | kind                         | type                               |
    /// |------------------------------|------------------------------------|
    /// | any numeric                  | the code, e.g. `"001"`             |
    /// | DCC                          | `"dcc_<type>"`                     |
    /// | CTCP / CTCP reply            | `"ctcp_<name>"` / `"ctcpreply_<name>"` |
    /// | CAP                          | `"cap_ls"`, `"cap_list"`, `"cap_ack"` |
    /// | server notice                | `"server_notice"`                  |
    /// | MODE                         | `"user_mode_change"` / `"channel_mode_change"` |
    /// | PRIVMSG, NOTICE, ACTION      | `"message"`                        |
    /// | everything else              | the lower-cased command            |
    pub fn message_type(&self) -> Cow<'_, str> {
        match &self.kind {
            MessageKind::Numeric
            | MessageKind::ISupport(_)
            | MessageKind::NamesReply(_)
            | MessageKind::WhoReply(_) => Cow::Borrowed(self.command.as_str()),
            MessageKind::Dcc(dcc) => format!("dcc_{}", dcc.dcc_type.to_lowercase()).into(),
            MessageKind::Ctcp(ctcp) if ctcp.is_reply => {
                format!("ctcpreply_{}", ctcp.name.to_lowercase()).into()
            }
            MessageKind::Ctcp(ctcp) => format!("ctcp_{}", ctcp.name.to_lowercase()).into(),
            MessageKind::Cap(cap) => match cap.subcommand {
                CapSubCommand::Ls => "cap_ls".into(),
                CapSubCommand::List => "cap_list".into(),
                CapSubCommand::Ack => "cap_ack".into(),
            },
            MessageKind::ServerNotice(_) => "server_notice".into(),
            MessageKind::UserModeChange(_) => "user_mode_change".into(),
            MessageKind::ChannelModeChange(_) => "channel_mode_change".into(),
            MessageKind::Chat(_) => "message".into(),
            _ => self.command.to_lowercase().into(),
        }
    }

    /// The symbolic name of a numeric reply, e.g. `RPL_WELCOME`.
    pub fn numeric_name(&self) -> Option<&'static str> {
        if is_numeric(&self.command) {
            numeric_to_name(&self.command)
        } else {
            None
        }
    }

    /// True for numeric replies whose name starts with `ERR`.
    pub fn is_error(&self) -> bool {
        self.numeric_name()
            .map_or(false, |name| name.starts_with("ERR"))
    }

    /// Look up a tag value. Flags yield `Some(None)`.
    pub fn tag(&self, key: &str) -> Option<Option<&str>> {
        self.tags.get(key).map(TagValue::as_str)
    }
}

/// What the classifier extracted from a message.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum MessageKind {
    /// A command with no dedicated extractor.
    Generic,
    /// A numeric reply with no dedicated extractor.
    Numeric,
    /// 005 `RPL_ISUPPORT`.
    ISupport(ISupportUpdate),
    /// 353 `RPL_NAMREPLY`.
    NamesReply(NamesReply),
    /// 352 `RPL_WHOREPLY`.
    WhoReply(WhoReply),
    /// A DCC request.
    Dcc(Dcc),
    /// A CTCP request or reply other than ACTION and DCC.
    Ctcp(Ctcp),
    /// A PRIVMSG, NOTICE or ACTION from a user.
    Chat(ChatMessage),
    /// A NOTICE from a server or service.
    ServerNotice(ServerNotice),
    /// `ERROR`
    Error(ErrorMessage),
    /// `INVITE`
    Invite(Invite),
    /// `JOIN`
    Join(Join),
    /// `PART`
    Part(Part),
    /// `KICK`
    Kick(Kick),
    /// `NICK`
    Nick(Nick),
    /// `TOPIC`
    Topic(Topic),
    /// `QUIT`
    Quit(Quit),
    /// `PING`
    Ping(Ping),
    /// `MODE` on a user.
    UserModeChange(UserModeChange),
    /// `MODE` on a channel.
    ChannelModeChange(ChannelModeChange),
    /// `CAP LS`, `CAP LIST` or `CAP ACK`.
    Cap(CapReply),
}

/// 353 `RPL_NAMREPLY`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamesReply {
    /// `@` (secret), `*` (private) or `=` (public), when sent.
    pub channel_type: Option<char>,
    /// The channel name.
    pub channel: String,
    /// Each user as `(prefixes, nickname)`, in the order sent.
    pub users: Vec<(Option<String>, String)>,
}

/// 352 `RPL_WHOREPLY`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WhoReply {
    /// The channel or nickname the WHO was for.
    pub target: String,
    /// The user's ident.
    pub username: String,
    /// The user's host.
    pub hostname: String,
    /// The server the user is on.
    pub server: String,
    /// The user's nickname.
    pub nickname: String,
    /// Status characters other than `H`/`G`, e.g. `@` or `*`.
    pub prefixes: Vec<char>,
    /// True if the status carried `G` (gone).
    pub away: bool,
    /// Hop count to the user's server.
    pub hops: u64,
    /// The user's real name.
    pub realname: String,
}

/// A DCC request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dcc {
    /// Who sent it.
    pub sender: Option<String>,
    /// The DCC type as sent, e.g. `SEND`.
    pub dcc_type: String,
    /// The raw arguments after the type.
    pub dcc_args: String,
    /// The typed fields, when the type is known.
    pub request: DccRequest,
    /// identify-msg status, when that capability is enabled.
    pub identified: Option<bool>,
}

/// A CTCP request (PRIVMSG) or reply (NOTICE).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ctcp {
    /// Who sent it.
    pub sender: Option<String>,
    /// The channel it was sent to, if any.
    pub channel: Option<String>,
    /// The CTCP name as sent, e.g. `VERSION`.
    pub name: String,
    /// Everything after the name; empty if nothing followed it.
    pub args: String,
    /// True when carried by a NOTICE.
    pub is_reply: bool,
    /// identify-msg status, when that capability is enabled.
    pub identified: Option<bool>,
}

/// A PRIVMSG, NOTICE or CTCP ACTION.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatMessage {
    /// Who sent it.
    pub sender: Option<String>,
    /// The channel it was sent to. Only the first of several targets is kept.
    pub channel: Option<String>,
    /// The message text, without any identify-msg marker.
    pub message: String,
    /// True for NOTICE.
    pub is_notice: bool,
    /// True for CTCP ACTION.
    pub is_action: bool,
    /// identify-msg status, when that capability is enabled.
    pub identified: Option<bool>,
}

/// A NOTICE from a server or service (no `nick!user@host` prefix).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerNotice {
    /// The server or service name, if any.
    pub sender: Option<String>,
    /// The target, e.g. `AUTH` or `*`, if sent.
    pub target: Option<String>,
    /// The notice text.
    pub message: String,
}

/// `ERROR`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorMessage {
    /// The error text.
    pub error: Option<String>,
}

/// `INVITE`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Invite {
    /// Who sent the invite.
    pub inviter: Option<String>,
    /// The channel we are invited to.
    pub channel: Option<String>,
}

/// `JOIN`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Join {
    /// Who joined.
    pub joiner: Option<String>,
    /// The channel joined.
    pub channel: Option<String>,
    /// Services account, with extended-join. `None` if not logged in.
    pub account: Option<String>,
    /// Real name, with extended-join.
    pub realname: Option<String>,
}

/// `PART`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Part {
    /// Who left.
    pub parter: Option<String>,
    /// The channel left.
    pub channel: Option<String>,
    /// The part message, if non-empty.
    pub message: Option<String>,
}

/// `KICK`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kick {
    /// Who did the kicking.
    pub kicker: Option<String>,
    /// The channel.
    pub channel: Option<String>,
    /// Who was kicked.
    pub kickee: Option<String>,
    /// The kick message, if non-empty.
    pub message: Option<String>,
}

/// `NICK`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nick {
    /// The old `nick!user@host`.
    pub changer: Option<String>,
    /// The new nickname.
    pub nickname: Option<String>,
}

/// `TOPIC`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topic {
    /// Who changed the topic.
    pub changer: Option<String>,
    /// The channel.
    pub channel: Option<String>,
    /// The new topic; `None` when it was cleared.
    pub topic: Option<String>,
}

/// `QUIT`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quit {
    /// Who quit.
    pub quitter: Option<String>,
    /// The quit message, if non-empty.
    pub message: Option<String>,
}

/// `PING`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ping {
    /// The token to echo back, if non-empty.
    pub message: Option<String>,
}

/// `MODE` on a user.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserModeChange {
    /// The nickname whose modes changed, when sent before the mode string.
    pub target: Option<String>,
    /// The changes, without arguments.
    pub mode_changes: Vec<ModeChange>,
}

/// `MODE` on a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelModeChange {
    /// Who changed the modes.
    pub changer: Option<String>,
    /// The channel.
    pub channel: String,
    /// The changes with their arguments.
    pub mode_changes: Vec<ModeChange>,
}

/// `CAP LS`, `CAP LIST` or `CAP ACK`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapReply {
    /// The client nickname or `*` the reply was addressed to, if sent.
    pub target: Option<String>,
    /// Which reply this is.
    pub subcommand: CapSubCommand,
    /// True when more lines of the same reply follow.
    pub multipart: bool,
    /// The raw capability list.
    pub reply: String,
    /// Each capability with its modifiers.
    pub capabilities: BTreeMap<String, Vec<CapModifier>>,
}
