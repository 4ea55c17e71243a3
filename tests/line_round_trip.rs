//! Integration tests for the line grammar.
//!
//! These check that lines decompose into the expected parts and that
//! composing a decomposed line gives back the original text.

use slirc_support::{compose, decompose, ComposeError, Line, ParseError, TagValue};

const ISUPPORT_LINE: &str = ":pretend.dancer.server 005 CPAN MODES=4 CHANLIMIT=#:20 NICKLEN=16 USERLEN=10 HOSTLEN=63 TOPICLEN=450 KICKLEN=450 CHANNELLEN=30 KEYLEN=23 CHANTYPES=# PREFIX=(ov)@+ CASEMAPPING=ascii CAPAB IRCD=dancer :are available on this server";

fn round_trip(raw: &str) {
    let line = decompose(raw).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(compose(&line).unwrap(), raw);
}

#[test]
fn test_decompose_server_line() {
    let line = decompose(ISUPPORT_LINE).unwrap();
    assert_eq!(line.prefix.as_deref(), Some("pretend.dancer.server"));
    assert_eq!(line.command, "005");
    assert_eq!(line.args.len(), 16);
    assert_eq!(line.args[0], "CPAN");
    assert_eq!(line.args[15], "are available on this server");
    assert!(line.tags.is_empty());
}

#[test]
fn test_line_terminators_are_ignored() {
    for ending in ["\r\n", "\n", "\r"] {
        let line = decompose(&format!("{ISUPPORT_LINE}{ending}")).unwrap();
        assert_eq!(line.command, "005");
        assert_eq!(line.args[15], "are available on this server");
    }
}

#[test]
fn test_round_trips() {
    round_trip(ISUPPORT_LINE);
    round_trip(":adams.freenode.net 005 CPAN MODES=4 CHANTYPES=# :are available on this server");
    round_trip("PING irc.example.com");
    round_trip(":nick!user@host PRIVMSG #channel :Hello, world!");
    round_trip(":server 001 nickname :Welcome to the IRC Network");
    round_trip("@msgid=abc123;time=2023-01-01T00:00:00.000Z :nick!user@host PRIVMSG #channel :Tagged message");
    round_trip("@+draft/typing=active;account=dan TAGMSG #chan");
    round_trip("PRIVMSG #chan ::-)");
    round_trip("TOPIC #chan :");
}

#[test]
fn test_needless_colon_is_dropped() {
    let line = decompose("PING :irc.example.com").unwrap();
    assert_eq!(line.args, vec!["irc.example.com"]);
    assert_eq!(compose(&line).unwrap(), "PING irc.example.com");
}

#[test]
fn test_command_is_upper_cased() {
    let line = decompose("privmsg #chan hi").unwrap();
    assert_eq!(line.command, "PRIVMSG");
    assert_eq!(compose(&line).unwrap(), "PRIVMSG #chan hi");
}

#[test]
fn test_trailing_whitespace_and_runs() {
    let line = decompose(":srv   NOTICE   dan   :hi  there  ").unwrap();
    assert_eq!(line.args, vec!["dan", "hi  there  "]);

    let line = decompose("MODE #chan +o   ").unwrap();
    assert_eq!(line.args, vec!["#chan", "+o"]);
}

#[test]
fn test_tags() {
    let line = decompose("@a=b\\sc;flag;esc=semi\\:colon :n!u@h PRIVMSG #c :x").unwrap();
    assert_eq!(line.tag("a"), Some(Some("b c")));
    assert_eq!(line.tag("flag"), Some(None));
    assert_eq!(line.tag("esc"), Some(Some("semi;colon")));
    assert_eq!(
        compose(&line).unwrap(),
        "@a=b\\sc;esc=semi\\:colon;flag :n!u@h PRIVMSG #c x"
    );
}

#[test]
fn test_decompose_rejects() {
    for raw in ["+", "", ":prefixonly", "PRIV_MSG #chan", "12 foo", "1234 foo", "PING :a\0b", ":a b\nc"] {
        assert!(
            matches!(decompose(raw), Err(ParseError::NotIrcProtocol { .. })),
            "{raw:?} should not parse"
        );
    }
}

#[test]
fn test_compose_errors() {
    assert_eq!(compose(&Line::default()), Err(ComposeError::MissingCommand));
    assert_eq!(
        compose(&Line::new("bar").with_args(["a b", "c"])),
        Err(ComposeError::EmbeddedSpace { index: 0 })
    );
    assert_eq!(
        compose(&Line::new("bar").with_args(["", "c"])),
        Err(ComposeError::InvalidArgument { index: 0 })
    );
    assert_eq!(
        compose(&Line::new("bar").with_args([":a", "c"])),
        Err(ComposeError::InvalidArgument { index: 0 })
    );
    assert_eq!(
        compose(&Line::new("bar").with_args(["a", "b\r\nQUIT"])),
        Err(ComposeError::IllegalCharacter { index: 1 })
    );
}

#[test]
fn test_builder_composes() {
    let line = Line::new("PRIVMSG")
        .with_prefix("bot!bot@example.com")
        .with_tag("msgid", TagValue::Value("abc 123".to_string()))
        .with_args(["#dev", "Tagged message"]);
    assert_eq!(
        compose(&line).unwrap(),
        "@msgid=abc\\s123 :bot!bot@example.com PRIVMSG #dev :Tagged message"
    );
}
