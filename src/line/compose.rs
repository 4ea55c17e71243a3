//! Line composition.

use crate::error::ComposeError;

use super::tags::write_tags;
use super::Line;

/// Compose a [`Line`] back into a protocol line, without the line terminator.
///
/// The final argument is sent with a leading `:` when it contains a space, is
/// empty, or itself starts with `:`.
///
/// # Errors
///
/// - [`ComposeError::MissingCommand`] when the command is empty.
/// - [`ComposeError::IllegalCharacter`] when any argument contains NUL, CR or LF.
/// - [`ComposeError::EmbeddedSpace`] when a non-final argument contains a space.
/// - [`ComposeError::InvalidArgument`] when a non-final argument is empty or
///   starts with `:`.
///
/// ```
/// use slirc_support::line::{compose, Line};
///
/// let line = Line::new("PRIVMSG").with_args(["#chan", "hello there"]);
/// assert_eq!(compose(&line).unwrap(), "PRIVMSG #chan :hello there");
/// ```
pub fn compose(line: &Line) -> Result<String, ComposeError> {
    if line.command.is_empty() {
        return Err(ComposeError::MissingCommand);
    }

    let last = line.args.len().saturating_sub(1);
    for (index, arg) in line.args.iter().enumerate() {
        if arg.contains(['\0', '\r', '\n']) {
            return Err(ComposeError::IllegalCharacter { index });
        }
        if index == last {
            continue;
        }
        if arg.contains(' ') {
            return Err(ComposeError::EmbeddedSpace { index });
        }
        if arg.is_empty() || arg.starts_with(':') {
            return Err(ComposeError::InvalidArgument { index });
        }
    }

    let mut raw = String::with_capacity(512);

    if !line.tags.is_empty() {
        raw.push('@');
        // Writing into a String cannot fail.
        let _ = write_tags(&mut raw, &line.tags);
        raw.push(' ');
    }

    if let Some(prefix) = &line.prefix {
        raw.push(':');
        raw.push_str(prefix);
        raw.push(' ');
    }

    raw.push_str(&line.command);

    for (index, arg) in line.args.iter().enumerate() {
        raw.push(' ');
        if index == last && (arg.is_empty() || arg.starts_with(':') || arg.contains(' ')) {
            raw.push(':');
        }
        raw.push_str(arg);
    }

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::{decompose, TagValue};

    #[test]
    fn test_compose_basic() {
        let line = Line::new("JOIN").with_args(["#foo"]);
        assert_eq!(compose(&line).unwrap(), "JOIN #foo");

        let line = Line::new("PING");
        assert_eq!(compose(&line).unwrap(), "PING");
    }

    #[test]
    fn test_compose_prefix_and_trailing() {
        let line = Line::new("PRIVMSG")
            .with_prefix("nick!user@host")
            .with_args(["#chan", "hi there"]);
        assert_eq!(
            compose(&line).unwrap(),
            ":nick!user@host PRIVMSG #chan :hi there"
        );
    }

    #[test]
    fn test_compose_last_arg_colon_rules() {
        let line = Line::new("TOPIC").with_args(["#chan", ""]);
        assert_eq!(compose(&line).unwrap(), "TOPIC #chan :");

        let line = Line::new("PRIVMSG").with_args(["#chan", ":)"]);
        assert_eq!(compose(&line).unwrap(), "PRIVMSG #chan ::)");
    }

    #[test]
    fn test_compose_tags() {
        let line = Line::new("TAGMSG")
            .with_tag("+typing", TagValue::Value("active".to_string()))
            .with_tag("draft/bot", TagValue::Flag)
            .with_args(["#chan"]);
        assert_eq!(
            compose(&line).unwrap(),
            "@+typing=active;draft/bot TAGMSG #chan"
        );
    }

    #[test]
    fn test_compose_errors() {
        assert_eq!(compose(&Line::default()), Err(ComposeError::MissingCommand));
        assert_eq!(
            compose(&Line::new("PRIVMSG").with_args(["a b", "c"])),
            Err(ComposeError::EmbeddedSpace { index: 0 })
        );
        assert_eq!(
            compose(&Line::new("PRIVMSG").with_args(["", "c"])),
            Err(ComposeError::InvalidArgument { index: 0 })
        );
        assert_eq!(
            compose(&Line::new("PRIVMSG").with_args([":a", "c"])),
            Err(ComposeError::InvalidArgument { index: 0 })
        );
        assert_eq!(
            compose(&Line::new("PRIVMSG").with_args(["#a", "c\r\nQUIT"])),
            Err(ComposeError::IllegalCharacter { index: 1 })
        );
    }

    #[test]
    fn test_round_trip() {
        let raws = [
            ":adams.freenode.net 005 CPAN MODES=4 CHANLIMIT=#:20 NICKLEN=16 USERLEN=10 HOSTLEN=63 TOPICLEN=450 KICKLEN=450 CHANNELLEN=30 KEYLEN=23 CHANTYPES=# PREFIX=(ov)@+ CASEMAPPING=ascii CAPAB IRCD=dancer :are available on this server",
            "PRIVMSG #foo :hello there",
            ":nick!user@host JOIN #foo",
            "@a=1;b :server NOTICE * :*** Looking up your hostname",
        ];
        for raw in raws {
            let line = decompose(raw).unwrap();
            assert_eq!(compose(&line).unwrap(), raw);
        }
    }
}
