//! Nom-based line decomposition.
//!
//! Grammar, anchored at both ends:
//!
//! ```text
//! [@tags <space>+] [:prefix <space>+] <3-digit numeric | letters>
//!     [<space>+ <arg> (<space>+ <arg>)*] [<space>+ :trailing | <space>*] [\r\n]
//! ```
//!
//! `<arg>` may not start with `:`. No token may contain NUL, CR or LF.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1, take_while_m_n},
    character::complete::char,
    combinator::{eof, opt},
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::ParseError;

use super::tags::parse_tags;
use super::Line;

/// Intermediate result borrowing from the raw input.
#[derive(Debug, Clone, PartialEq)]
struct RawLine<'a> {
    tags: Option<&'a str>,
    prefix: Option<&'a str>,
    command: &'a str,
    params: Vec<&'a str>,
}

#[inline]
fn is_illegal(c: char) -> bool {
    matches!(c, '\0' | '\r' | '\n')
}

#[inline]
fn is_token_char(c: char) -> bool {
    c != ' ' && !is_illegal(c)
}

fn spaces(input: &str) -> IResult<&str, &str> {
    take_while1(|c| c == ' ')(input)
}

fn tags(input: &str) -> IResult<&str, &str> {
    terminated(preceded(char('@'), take_while1(is_token_char)), spaces)(input)
}

fn prefix(input: &str) -> IResult<&str, &str> {
    terminated(preceded(char(':'), take_while1(is_token_char)), spaces)(input)
}

fn command(input: &str) -> IResult<&str, &str> {
    alt((
        take_while_m_n(3, 3, |c: char| c.is_ascii_digit()),
        take_while1(|c: char| c.is_ascii_alphabetic()),
    ))(input)
}

fn trailing(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while(|c| !is_illegal(c)))(input)
}

fn middle(input: &str) -> IResult<&str, &str> {
    let first_ok = input.chars().next().map_or(false, |c| c != ':' && is_token_char(c));
    if !first_ok {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeWhile1,
        )));
    }
    take_while1(is_token_char)(input)
}

fn line_end(input: &str) -> IResult<&str, ()> {
    let (input, _) = opt(alt((tag("\r\n"), tag("\n"), tag("\r"))))(input)?;
    let (input, _) = eof(input)?;
    Ok((input, ()))
}

fn raw_line(input: &str) -> IResult<&str, RawLine<'_>> {
    let (input, raw_tags) = opt(tags)(input)?;
    let (input, raw_prefix) = opt(prefix)(input)?;
    let (input, cmd) = command(input)?;

    let mut params = Vec::new();
    let mut rest = input;

    while let Ok((after_space, _)) = spaces(rest) {
        if let Ok((after, last)) = trailing(after_space) {
            params.push(last);
            rest = after;
            break;
        }
        match middle(after_space) {
            Ok((after, param)) => {
                params.push(param);
                rest = after;
            }
            Err(_) => {
                rest = after_space;
                break;
            }
        }
    }

    let (rest, ()) = line_end(rest)?;

    Ok((
        rest,
        RawLine {
            tags: raw_tags,
            prefix: raw_prefix,
            command: cmd,
            params,
        },
    ))
}

/// Decompose a raw protocol line into a [`Line`].
///
/// The command is upper-cased. A trailing `\r\n` is ignored.
///
/// # Errors
///
/// Returns [`ParseError::NotIrcProtocol`] when `raw` does not match the line
/// grammar.
///
/// ```
/// use slirc_support::line::decompose;
///
/// let line = decompose(":nick!user@host privmsg #chan :hello there\r\n").unwrap();
/// assert_eq!(line.prefix.as_deref(), Some("nick!user@host"));
/// assert_eq!(line.command, "PRIVMSG");
/// assert_eq!(line.args, vec!["#chan", "hello there"]);
/// ```
pub fn decompose(raw: &str) -> Result<Line, ParseError> {
    let (_, parsed) = raw_line(raw).map_err(|_| ParseError::NotIrcProtocol {
        line: raw.to_string(),
    })?;

    Ok(Line {
        tags: parsed.tags.map(parse_tags).unwrap_or_default(),
        prefix: parsed.prefix.map(str::to_string),
        command: parsed.command.to_ascii_uppercase(),
        args: parsed.params.into_iter().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::TagValue;

    fn not_irc(raw: &str) -> bool {
        matches!(decompose(raw), Err(ParseError::NotIrcProtocol { .. }))
    }

    #[test]
    fn test_simple_command() {
        let line = decompose("PING").unwrap();
        assert_eq!(line.command, "PING");
        assert!(line.tags.is_empty());
        assert!(line.prefix.is_none());
        assert!(line.args.is_empty());
    }

    #[test]
    fn test_multiple_params() {
        let line = decompose("USER guest 0 * :Real Name").unwrap();
        assert_eq!(line.args, vec!["guest", "0", "*", "Real Name"]);
    }

    #[test]
    fn test_numeric() {
        let line = decompose(":server 001 nick :Welcome").unwrap();
        assert_eq!(line.prefix.as_deref(), Some("server"));
        assert_eq!(line.command, "001");
        assert_eq!(line.args, vec!["nick", "Welcome"]);
    }

    #[test]
    fn test_command_is_upcased() {
        assert_eq!(decompose("join #foo").unwrap().command, "JOIN");
    }

    #[test]
    fn test_empty_trailing() {
        let line = decompose("PRIVMSG #channel :").unwrap();
        assert_eq!(line.args, vec!["#channel", ""]);
    }

    #[test]
    fn test_trailing_keeps_colons_and_spaces() {
        let line = decompose("PRIVMSG #c ::) hi  there ").unwrap();
        assert_eq!(line.args, vec!["#c", ":) hi  there "]);
    }

    #[test]
    fn test_extra_spaces() {
        let line = decompose(":server   NOTICE   foo    bar   ").unwrap();
        assert_eq!(line.command, "NOTICE");
        assert_eq!(line.args, vec!["foo", "bar"]);
    }

    #[test]
    fn test_colons_inside_middle() {
        let line = decompose("CMD a:b c").unwrap();
        assert_eq!(line.args, vec!["a:b", "c"]);
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(decompose("PING :x\r\n").unwrap().args, vec!["x"]);
        assert_eq!(decompose("PING :x\n").unwrap().args, vec!["x"]);
        assert_eq!(decompose("PING x\r").unwrap().args, vec!["x"]);
    }

    #[test]
    fn test_tags() {
        let line = decompose("@time=2023-01-01T00:00:00Z;bot :nick PRIVMSG #ch :Hi").unwrap();
        assert_eq!(line.tags.len(), 2);
        assert_eq!(line.tags["bot"], TagValue::Flag);
        assert_eq!(line.prefix.as_deref(), Some("nick"));
        assert_eq!(line.args, vec!["#ch", "Hi"]);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(not_irc(""));
        assert!(not_irc("   "));
        assert!(not_irc(":prefixonly"));
        assert!(not_irc("0012 foo"));
        assert!(not_irc("12 foo"));
        assert!(not_irc("PRIV-MSG foo"));
        assert!(not_irc("PRIVMSG foo\0bar"));
        assert!(not_irc("PRIVMSG :foo\nbar"));
        assert!(not_irc("GET / HTTP/1.1\r\n\r\n"));
    }

    #[test]
    fn test_error_carries_line() {
        assert_eq!(
            decompose("!!!"),
            Err(ParseError::NotIrcProtocol {
                line: "!!!".to_string()
            })
        );
    }
}
