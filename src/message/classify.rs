//! Message classification and field extraction.
//!
//! Selection happens in a fixed order: CTCP bodies first, then numerics,
//! `MODE`, server notices, chat, `CAP`, and finally the named commands. Only
//! the CTCP path can refuse a line; everything else degrades to
//! [`MessageKind::Generic`] or [`MessageKind::Numeric`].

use tracing::{debug, warn};

use super::types::*;
use crate::caps::{parse_cap_reply, CapSubCommand, EXTENDED_JOIN, IDENTIFY_MSG};
use crate::ctcp::dcc::parse_dcc;
use crate::ctcp::{ctcp_dequote, split_payload, strip_identify_marker, CTCP_DELIM};
use crate::isupport::parse_isupport;
use crate::line::Line;
use crate::mode::{parse_channel_modes_with_prefixes, parse_modes};
use crate::numerics::is_numeric;
use crate::state::SessionState;
use crate::util::{is_word_char, leading_u64, non_empty, split_at_run};

/// Turn a decomposed line into a typed [`Message`].
///
/// `state` is only read. Returns `None` for a malformed CTCP or DCC payload,
/// which is logged at `warn` level.
///
/// ```
/// use slirc_support::message::{classify, MessageKind};
/// use slirc_support::state::SessionState;
///
/// let line = ":foo!bar@baz PART #chan".parse().unwrap();
/// let msg = classify(line, &SessionState::default()).unwrap();
/// assert_eq!(msg.message_type(), "part");
/// assert!(matches!(msg.kind, MessageKind::Part(ref p) if p.message.is_none()));
/// ```
pub fn classify(line: Line, state: &SessionState) -> Option<Message> {
    let is_chat = matches!(line.command.as_str(), "PRIVMSG" | "NOTICE");
    if is_chat && line.args.get(1).map_or(false, |body| body.contains(CTCP_DELIM)) {
        return classify_ctcp(line, state);
    }
    let kind = extract(&line, state);
    Some(Message::from_line(line, kind))
}

fn extract(line: &Line, state: &SessionState) -> MessageKind {
    let args = &line.args;
    let command = line.command.as_str();

    if is_numeric(command) {
        return match command {
            "005" => MessageKind::ISupport(parse_isupport(args)),
            "353" => names_reply(args, state).map_or(MessageKind::Numeric, MessageKind::NamesReply),
            "352" => who_reply(args).map_or(MessageKind::Numeric, MessageKind::WhoReply),
            _ => MessageKind::Numeric,
        };
    }

    match command {
        "MODE" => mode_change(line, state),
        "NOTICE" if !line.prefix.as_deref().map_or(false, |p| p.contains('!')) => {
            let (target, message) = match args.as_slice() {
                [] => (None, String::new()),
                [message] => (None, message.clone()),
                [target, .., message] => (Some(target.clone()), message.clone()),
            };
            MessageKind::ServerNotice(ServerNotice {
                sender: line.prefix.clone(),
                target,
                message,
            })
        }
        "PRIVMSG" | "NOTICE" => MessageKind::Chat(chat(line, state)),
        "CAP" => cap_reply(args).map_or(MessageKind::Generic, MessageKind::Cap),
        _ => named(line, state),
    }
}

fn named(line: &Line, state: &SessionState) -> MessageKind {
    let args = &line.args;
    let prefix = line.prefix.clone();
    let arg = |i: usize| args.get(i).cloned();

    match line.command.as_str() {
        "ERROR" => MessageKind::Error(ErrorMessage { error: arg(0) }),
        "INVITE" => MessageKind::Invite(Invite {
            inviter: prefix,
            channel: arg(1),
        }),
        "JOIN" => {
            let extended = state.has_capability(EXTENDED_JOIN);
            MessageKind::Join(Join {
                joiner: prefix,
                channel: arg(0),
                account: arg(1).filter(|a| extended && a != "*"),
                realname: arg(2).filter(|_| extended),
            })
        }
        "PART" => MessageKind::Part(Part {
            parter: prefix,
            channel: arg(0),
            message: non_empty(args.get(1)),
        }),
        "KICK" => MessageKind::Kick(Kick {
            kicker: prefix,
            channel: arg(0),
            kickee: arg(1),
            message: non_empty(args.get(2)),
        }),
        "NICK" => MessageKind::Nick(Nick {
            changer: prefix,
            nickname: arg(0),
        }),
        "TOPIC" => MessageKind::Topic(Topic {
            changer: prefix,
            channel: arg(0),
            topic: non_empty(args.get(1)),
        }),
        "QUIT" => MessageKind::Quit(Quit {
            quitter: prefix,
            message: non_empty(args.first()),
        }),
        "PING" => MessageKind::Ping(Ping {
            message: non_empty(args.first()),
        }),
        _ => MessageKind::Generic,
    }
}

/// The first target of a message, if it is a channel.
fn channel_of(target: Option<&String>, state: &SessionState) -> Option<String> {
    target
        .filter(|t| state.is_channel(t))
        .and_then(|t| t.split(',').next())
        .map(str::to_string)
}

fn chat(line: &Line, state: &SessionState) -> ChatMessage {
    let mut message = line.args.get(1).cloned().unwrap_or_default();
    let mut identified = None;

    if state.has_capability(IDENTIFY_MSG) {
        let mut chars = message.chars();
        identified = Some(chars.next() == Some('+'));
        message = chars.as_str().to_string();
    }

    ChatMessage {
        sender: line.prefix.clone(),
        channel: channel_of(line.args.first(), state),
        message,
        is_notice: line.command == "NOTICE",
        is_action: false,
        identified,
    }
}

fn classify_ctcp(line: Line, state: &SessionState) -> Option<Message> {
    let is_reply = line.command == "NOTICE";
    let body = line.args.get(1).map(String::as_str).unwrap_or_default();

    let payload = match ctcp_dequote(body).and_then(|chunks| chunks.ctcp.into_iter().next()) {
        Some(payload) => payload,
        None => {
            let kind = extract(&line, state);
            return Some(Message::from_line(line, kind));
        }
    };

    let (identified, payload) = if state.has_capability(IDENTIFY_MSG) {
        let (identified, rest) = strip_identify_marker(&payload);
        (Some(identified), rest)
    } else {
        (None, payload.as_str())
    };

    let Some((name, rest)) = split_payload(payload) else {
        warn!(sender = ?line.prefix, payload, "malformed CTCP");
        return None;
    };

    let sender = line.prefix.clone();
    let channel = channel_of(line.args.first(), state);

    let kind = match name {
        "ACTION" => MessageKind::Chat(ChatMessage {
            sender,
            channel,
            message: rest.unwrap_or_default().to_string(),
            is_notice: is_reply,
            is_action: true,
            identified,
        }),
        "DCC" => {
            let Some((dcc_type, dcc_args)) = rest.and_then(split_dcc) else {
                warn!(sender = ?line.prefix, payload, "malformed DCC request");
                return None;
            };
            let Some(request) = parse_dcc(dcc_type, dcc_args) else {
                warn!(sender = ?line.prefix, dcc_type, dcc_args, "malformed DCC fields");
                return None;
            };
            MessageKind::Dcc(Dcc {
                sender,
                dcc_type: dcc_type.to_string(),
                dcc_args: dcc_args.to_string(),
                request,
                identified,
            })
        }
        _ => MessageKind::Ctcp(Ctcp {
            sender,
            channel,
            name: name.to_string(),
            args: rest.unwrap_or_default().to_string(),
            is_reply,
            identified,
        }),
    };

    Some(Message::from_line(line, kind))
}

/// `<word> +<rest>` with a non-empty rest.
fn split_dcc(args: &str) -> Option<(&str, &str)> {
    let (dcc_type, rest) = split_at_run(args, ' ')?;
    if dcc_type.is_empty() || !dcc_type.chars().all(is_word_char) {
        return None;
    }
    Some((dcc_type, rest))
}

fn mode_change(line: &Line, state: &SessionState) -> MessageKind {
    let args = &line.args;
    let Some(target) = args.first() else {
        return MessageKind::Generic;
    };

    if !state.is_channel(target) {
        // a lone argument is the mode string only when it carries a sign
        let (target, modes) = match args.get(1) {
            Some(modes) => (Some(target.clone()), modes.as_str()),
            None if target.starts_with(['+', '-']) => (None, target.as_str()),
            None => (Some(target.clone()), ""),
        };
        return MessageKind::UserModeChange(UserModeChange {
            target,
            mode_changes: parse_modes(modes),
        });
    }

    let modes = args.get(1).map(String::as_str).unwrap_or_default();
    let mode_args = args.get(2..).unwrap_or_default();
    match parse_channel_modes_with_prefixes(
        modes,
        mode_args,
        &state.chanmodes(),
        &state.prefix_modes(),
    ) {
        Ok(mode_changes) => MessageKind::ChannelModeChange(ChannelModeChange {
            changer: line.prefix.clone(),
            channel: target.clone(),
            mode_changes,
        }),
        Err(e) => {
            warn!(channel = %target, modes, error = %e, "unparseable channel MODE");
            MessageKind::Generic
        }
    }
}

fn cap_reply(args: &[String]) -> Option<CapReply> {
    let (target, idx) = match args.first().and_then(|a| CapSubCommand::from_token(a)) {
        Some(_) => (None, 0),
        None => (args.first().cloned(), 1),
    };
    let subcommand = CapSubCommand::from_token(args.get(idx)?)?;

    let (multipart, reply) = match args.get(idx + 1).map(String::as_str) {
        Some("*") => (true, args.get(idx + 2)),
        _ => (false, args.get(idx + 1)),
    };
    let reply = reply.cloned().unwrap_or_default();

    Some(CapReply {
        target,
        subcommand,
        multipart,
        capabilities: parse_cap_reply(&reply),
        reply,
    })
}

/// 353: `<me> [<type>] <channel> :<users>`
fn names_reply(args: &[String], state: &SessionState) -> Option<NamesReply> {
    let mut data = args.get(1..)?.iter();
    let mut channel = data.next()?;

    let channel_type = match channel.as_str() {
        "@" | "=" | "*" => {
            let marker = channel.chars().next();
            channel = data.next()?;
            marker
        }
        _ => None,
    };

    let displays: Vec<char> = state.prefixes().iter().map(|(_, d)| *d).collect();
    let users = data
        .next()
        .map(|list| {
            list.split_whitespace()
                .map(|user| {
                    let nick = user.trim_start_matches(displays.as_slice());
                    let prefixes = &user[..user.len() - nick.len()];
                    let prefixes = (!prefixes.is_empty()).then(|| prefixes.to_string());
                    (prefixes, nick.to_string())
                })
                .collect()
        })
        .unwrap_or_default();

    Some(NamesReply {
        channel_type,
        channel: channel.clone(),
        users,
    })
}

/// 352: `<me> <target> <user> <host> <server> <nick> <status> :<hops> <realname>`
fn who_reply(args: &[String]) -> Option<WhoReply> {
    let [_, target, username, hostname, server, nickname, status, rest, ..] = args else {
        debug!(fields = args.len(), "short WHO reply");
        return None;
    };

    let mut away = false;
    let mut prefixes = Vec::new();
    let mut seen_flag = false;
    for c in status.chars() {
        match c {
            'G' | 'H' if !seen_flag => {
                seen_flag = true;
                away = c == 'G';
            }
            c => prefixes.push(c),
        }
    }

    let (hops, realname) = match rest.split_once(char::is_whitespace) {
        Some((hops, realname)) => (leading_u64(hops), realname.to_string()),
        None => (leading_u64(rest), String::new()),
    };

    Some(WhoReply {
        target: target.clone(),
        username: username.clone(),
        hostname: hostname.clone(),
        server: server.clone(),
        nickname: nickname.clone(),
        prefixes,
        away,
        hops,
        realname,
    })
}
