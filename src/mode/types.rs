//! Mode change and CHANMODES class types.

use std::collections::BTreeSet;
use std::fmt;

/// The four CHANMODES classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeClass {
    /// List modes (bans, exceptions). Always take an argument.
    A,
    /// Always take an argument (channel key).
    B,
    /// Take an argument only when set (user limit).
    C,
    /// Never take an argument.
    D,
}

/// Channel mode classification, as advertised by `CHANMODES`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChanModes {
    /// Class A (list) modes.
    pub a: BTreeSet<char>,
    /// Class B (always-argument) modes.
    pub b: BTreeSet<char>,
    /// Class C (argument-on-set) modes.
    pub c: BTreeSet<char>,
    /// Class D (flag) modes.
    pub d: BTreeSet<char>,
}

impl ChanModes {
    /// Build a table from the four class strings.
    pub fn new(a: &str, b: &str, c: &str, d: &str) -> Self {
        Self {
            a: a.chars().collect(),
            b: b.chars().collect(),
            c: c.chars().collect(),
            d: d.chars().collect(),
        }
    }

    /// Parse a `CHANMODES` value such as `eIbq,k,flj,CFLMPQcgimnprstz`.
    ///
    /// Missing classes are empty; classes beyond the fourth are ignored.
    pub fn parse(value: &str) -> Self {
        let mut parts = value.split(',');
        let a = parts.next().unwrap_or_default();
        let b = parts.next().unwrap_or_default();
        let c = parts.next().unwrap_or_default();
        let d = parts.next().unwrap_or_default();
        Self::new(a, b, c, d)
    }

    /// Return the class `mode` belongs to, if any.
    ///
    /// Classes are checked in A, B, C, D order.
    pub fn class_of(&self, mode: char) -> Option<ModeClass> {
        if self.a.contains(&mode) {
            Some(ModeClass::A)
        } else if self.b.contains(&mode) {
            Some(ModeClass::B)
        } else if self.c.contains(&mode) {
            Some(ModeClass::C)
        } else if self.d.contains(&mode) {
            Some(ModeClass::D)
        } else {
            None
        }
    }
}

impl Default for ChanModes {
    fn default() -> Self {
        Self::new("b", "k", "l", "imnpstr")
    }
}

impl fmt::Display for ChanModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<char>| set.iter().collect::<String>();
        write!(
            f,
            "{},{},{},{}",
            join(&self.a),
            join(&self.b),
            join(&self.c),
            join(&self.d)
        )
    }
}

/// Argument carried by a channel mode change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeArg {
    /// Numeric argument (class C).
    Int(u64),
    /// Opaque argument (classes A and B, and PREFIX modes).
    Str(String),
}

impl ModeArg {
    /// The argument as a string slice, if it is opaque.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// The argument as an integer, if it is numeric.
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for ModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ModeArg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<u64> for ModeArg {
    fn from(n: u64) -> Self {
        Self::Int(n)
    }
}

/// A single mode being set or unset.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeChange {
    /// The mode letter.
    pub mode: char,
    /// `true` for `+`, `false` for `-`.
    pub set: bool,
    /// The mode's argument, if its class takes one.
    pub argument: Option<ModeArg>,
}

impl ModeChange {
    /// A mode change without an argument.
    pub fn new(mode: char, set: bool) -> Self {
        Self {
            mode,
            set,
            argument: None,
        }
    }

    /// A mode change with an argument.
    pub fn with_arg(mode: char, set: bool, argument: impl Into<ModeArg>) -> Self {
        Self {
            mode,
            set,
            argument: Some(argument.into()),
        }
    }
}

impl fmt::Display for ModeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.set { '+' } else { '-' };
        match &self.argument {
            Some(arg) => write!(f, "{}{} {}", sign, self.mode, arg),
            None => write!(f, "{}{}", sign, self.mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chanmodes_parse() {
        let modes = ChanModes::parse("eIbq,k,flj,CFLMPQcgimnprstz");
        assert_eq!(modes.class_of('b'), Some(ModeClass::A));
        assert_eq!(modes.class_of('k'), Some(ModeClass::B));
        assert_eq!(modes.class_of('j'), Some(ModeClass::C));
        assert_eq!(modes.class_of('z'), Some(ModeClass::D));
        assert_eq!(modes.class_of('o'), None);
        assert_eq!(modes.to_string(), "Ibeq,k,fjl,CFLMPQcgimnprstz");
    }

    #[test]
    fn test_chanmodes_short_value() {
        let modes = ChanModes::parse("b,k");
        assert!(modes.c.is_empty());
        assert!(modes.d.is_empty());
        assert_eq!(modes.class_of('k'), Some(ModeClass::B));
    }

    #[test]
    fn test_mode_change_display() {
        assert_eq!(ModeChange::new('i', true).to_string(), "+i");
        assert_eq!(ModeChange::with_arg('l', false, 5u64).to_string(), "-l 5");
        assert_eq!(
            ModeChange::with_arg('k', true, "secret").to_string(),
            "+k secret"
        );
    }
}
