//! # slirc-support
//!
//! Stateful decoding of the IRC client protocol.
//!
//! Raw lines are decomposed by a strict grammar, then classified into typed
//! messages against per-connection session state: the server's ISUPPORT
//! table and the enabled IRCv3 capabilities. CTCP and DCC payloads embedded
//! in PRIVMSG/NOTICE bodies are unpacked on the way.
//!
//! ## Features
//!
//! - Line grammar with IRCv3 tags, decompose and compose
//! - ISUPPORT (005) and `CAP ACK` tracking that shapes later decoding
//! - CTCP quoting and DCC request parsing
//! - Channel and user mode parsing, condensing and diffing
//! - `ascii`, `rfc1459` and `strict-rfc1459` casemapping
//! - Hostmask matching and normalization
//! - Numeric reply names, color stripping and name validation
//! - Wire encoding helpers (feature `encoding`)
//!
//! The crate does no I/O. Feed it lines from whatever transport you use.

#![deny(clippy::all)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ```rust
//! use slirc_support::{MessageKind, Parser};
//!
//! let mut parser = Parser::new();
//!
//! let msg = parser
//!     .parse(":adams.freenode.net 005 dan CHANTYPES=#& PREFIX=(ov)@+ :are supported by this server")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(msg.message_type(), "005");
//! assert!(parser.state().is_channel("&ops"));
//!
//! let msg = parser
//!     .parse(":dan!d@example.com PRIVMSG &ops :\x01ACTION waves\x01")
//!     .unwrap()
//!     .unwrap();
//! match msg.kind {
//!     MessageKind::Chat(chat) => {
//!         assert!(chat.is_action);
//!         assert_eq!(chat.channel.as_deref(), Some("&ops"));
//!         assert_eq!(chat.message, "waves");
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! ### Composing lines
//!
//! ```rust
//! use slirc_support::{compose, ctcp_quote, Line};
//!
//! let line = Line::new("PRIVMSG").with_args(["#rust".to_string(), ctcp_quote("VERSION", "")]);
//! assert_eq!(compose(&line).unwrap(), "PRIVMSG #rust \x01VERSION\x01");
//! ```

pub mod caps;
pub mod casemap;
pub mod colors;
pub mod ctcp;
#[cfg(feature = "encoding")]
#[cfg_attr(docsrs, doc(cfg(feature = "encoding")))]
pub mod encoding;
pub mod error;
pub mod isupport;
pub mod line;
pub mod mask;
pub mod message;
pub mod mode;
pub mod numerics;
pub mod state;
pub mod util;
pub mod validation;

pub use self::caps::{CapModifier, CapSubCommand};
pub use self::casemap::{irc_downcase, irc_eq, irc_upcase, CaseMapping};
pub use self::ctcp::dcc::{DccAddress, DccRequest};
pub use self::ctcp::{ctcp_dequote, ctcp_quote, CtcpChunks};
pub use self::error::{
    CaseMappingError, ComposeError, Error, MaskError, ModeError, ParseError, Result,
};
pub use self::isupport::{ISupportUpdate, ISupportValue, Limit};
pub use self::line::{compose, decompose, Line, TagValue};
pub use self::mask::{matches_mask, matches_mask_array, normalize_mask};
pub use self::message::{classify, Message, MessageKind, Parser};
pub use self::mode::{
    condense_modes, diff_modes, parse_channel_modes, parse_modes, ChanModes, ModeArg, ModeChange,
};
pub use self::numerics::{name_to_numeric, numeric_to_name};
pub use self::state::SessionState;
pub use self::validation::{valid_channel_name, valid_nickname};
