//! Typed IRC messages.
//!
//! [`Parser`] is the usual entry point: it decomposes raw lines, classifies
//! them into a [`Message`] and keeps the [`SessionState`](crate::state::SessionState)
//! current. [`classify`] is the stateless half, for callers that manage state
//! themselves.

mod classify;
mod parser;
mod types;

pub use self::classify::classify;
pub use self::parser::Parser;
pub use self::types::{
    CapReply, ChannelModeChange, ChatMessage, Ctcp, Dcc, ErrorMessage, Invite, Join, Kick,
    Message, MessageKind, NamesReply, Nick, Part, Ping, Quit, ServerNotice, Topic,
    UserModeChange, WhoReply,
};
