//! Error types for the IRC decoding library.
//!
//! Each concern has its own error enum so callers can match precisely on
//! what went wrong. [`Error`] aggregates them for code that combines several
//! operations with `?`.
//!
//! Malformed CTCP and DCC payloads are deliberately absent here: they are
//! reported through `tracing` and surface as "no message" from the parser.

use thiserror::Error;

/// Convenience type alias for Results using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error aggregating every failure this crate can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A raw line could not be decomposed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A line could not be composed.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// A mode string referenced an unknown mode.
    #[error(transparent)]
    Mode(#[from] ModeError),

    /// An unknown casemapping was requested.
    #[error(transparent)]
    CaseMapping(#[from] CaseMappingError),

    /// A hostmask could not be used for matching.
    #[error(transparent)]
    Mask(#[from] MaskError),

    /// A text conversion named an unknown encoding.
    #[cfg(feature = "encoding")]
    #[error(transparent)]
    Encoding(#[from] crate::encoding::EncodingError),
}

/// Errors encountered when decomposing a raw protocol line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The line does not match the IRC line grammar.
    #[error("line is not IRC protocol: {line:?}")]
    NotIrcProtocol {
        /// The offending raw line.
        line: String,
    },
}

/// Errors encountered when composing a [`Line`](crate::line::Line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// The line has no command.
    #[error("a command must be specified")]
    MissingCommand,

    /// A non-final argument contains a space.
    #[error("only the last argument may contain spaces (argument {index})")]
    EmbeddedSpace {
        /// Position of the offending argument.
        index: usize,
    },

    /// A non-final argument is empty or starts with a colon.
    #[error("argument {index} is empty or starts with ':'")]
    InvalidArgument {
        /// Position of the offending argument.
        index: usize,
    },

    /// An argument contains NUL, CR or LF.
    #[error("argument {index} contains an illegal control character")]
    IllegalCharacter {
        /// Position of the offending argument.
        index: usize,
    },
}

/// Errors encountered when parsing channel mode changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModeError {
    /// The mode letter belongs to no CHANMODES class.
    #[error("unknown mode: {0}")]
    UnknownMode(char),
}

/// Error returned for casemapping names outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CaseMappingError {
    /// The casemapping is not `ascii`, `rfc1459` or `strict-rfc1459`.
    #[error("unsupported casemapping: {0}")]
    Unsupported(String),
}

/// Errors encountered when matching hostmasks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MaskError {
    /// The mask uses extended-ban syntax (`$`), which is not supported.
    #[error("extended bans are not supported: {0}")]
    UnsupportedMask(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::NotIrcProtocol {
            line: "+".to_string(),
        };
        assert_eq!(format!("{}", err), "line is not IRC protocol: \"+\"");

        let err = ComposeError::EmbeddedSpace { index: 0 };
        assert_eq!(
            format!("{}", err),
            "only the last argument may contain spaces (argument 0)"
        );

        assert_eq!(format!("{}", ModeError::UnknownMode('_')), "unknown mode: _");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = MaskError::UnsupportedMask("$a:foo".to_string()).into();
        match err {
            Error::Mask(MaskError::UnsupportedMask(ref mask)) => assert_eq!(mask, "$a:foo"),
            _ => panic!("Expected Mask variant"),
        }

        // transparent errors keep the inner message
        let err: Error = CaseMappingError::Unsupported("foobar".to_string()).into();
        assert_eq!(err.to_string(), "unsupported casemapping: foobar");
    }

    #[test]
    fn test_question_mark_chaining() {
        fn compose_then_mode() -> Result<()> {
            Err(ComposeError::MissingCommand)?;
            Ok(())
        }

        assert_eq!(
            compose_then_mode(),
            Err(Error::Compose(ComposeError::MissingCommand))
        );
    }
}
