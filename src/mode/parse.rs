//! Mode string parsing, condensing and diffing.

use crate::error::ModeError;
use crate::util::{is_word_char, leading_u64};

use super::types::{ChanModes, ModeArg, ModeChange, ModeClass};

/// Parse a mode string like `+i-m` into individual changes.
///
/// Each `[+-]` followed by one or more word characters forms a group whose
/// letters all inherit that sign. Anything outside such groups is ignored.
/// The returned changes never carry arguments.
///
/// ```
/// use slirc_support::mode::{parse_modes, ModeChange};
///
/// assert_eq!(
///     parse_modes("+i-m"),
///     vec![ModeChange::new('i', true), ModeChange::new('m', false)]
/// );
/// ```
pub fn parse_modes(modes: &str) -> Vec<ModeChange> {
    let mut res = Vec::new();
    let mut chars = modes.chars().peekable();

    while let Some(c) = chars.next() {
        let set = match c {
            '+' => true,
            '-' => false,
            _ => continue,
        };
        while let Some(&mode) = chars.peek() {
            if !is_word_char(mode) {
                break;
            }
            res.push(ModeChange::new(mode, set));
            chars.next();
        }
    }

    res
}

/// Parse a channel mode string and its positional arguments.
///
/// Class A and B modes consume the next argument as an opaque string, class C
/// modes consume the next argument as an integer when being set, and class D
/// modes consume nothing. A mode whose argument is missing gets `None`.
///
/// ```
/// use slirc_support::mode::{parse_channel_modes, ChanModes, ModeChange};
///
/// let changes = parse_channel_modes("+i+k+l", &["secret", "5"], &ChanModes::default()).unwrap();
/// assert_eq!(
///     changes,
///     vec![
///         ModeChange::new('i', true),
///         ModeChange::with_arg('k', true, "secret"),
///         ModeChange::with_arg('l', true, 5u64),
///     ]
/// );
/// ```
pub fn parse_channel_modes<S: AsRef<str>>(
    modes: &str,
    args: &[S],
    chanmodes: &ChanModes,
) -> Result<Vec<ModeChange>, ModeError> {
    parse_channel_modes_with_prefixes(modes, args, chanmodes, &[])
}

/// Like [`parse_channel_modes`], but also accepts the membership modes
/// advertised in `PREFIX` (e.g. `o`, `v`), which take a nickname argument.
pub fn parse_channel_modes_with_prefixes<S: AsRef<str>>(
    modes: &str,
    args: &[S],
    chanmodes: &ChanModes,
    prefix_modes: &[char],
) -> Result<Vec<ModeChange>, ModeError> {
    let mut args = args.iter().map(AsRef::as_ref);
    let mut res = Vec::new();

    for ModeChange { mode, set, .. } in parse_modes(modes) {
        let class = match chanmodes.class_of(mode) {
            Some(class) => class,
            None if prefix_modes.contains(&mode) => ModeClass::B,
            None => return Err(ModeError::UnknownMode(mode)),
        };

        let argument = match class {
            ModeClass::A | ModeClass::B => args.next().map(ModeArg::from),
            ModeClass::C if set => args.next().map(|a| ModeArg::Int(leading_u64(a))),
            ModeClass::C | ModeClass::D => None,
        };

        res.push(ModeChange {
            mode,
            set,
            argument,
        });
    }

    Ok(res)
}

/// Collapse a mode string into canonical form.
///
/// Repeated signs are dropped, letters under the same sign are grouped, and a
/// trailing sign with no letters is trimmed.
///
/// ```
/// use slirc_support::mode::condense_modes;
///
/// assert_eq!(condense_modes("+o-v-o-o+v-o+o+o"), "+o-voo+v-o+oo");
/// ```
pub fn condense_modes(modes: &str) -> String {
    let mut action = None;
    let mut result = String::with_capacity(modes.len());

    for c in modes.chars() {
        if c == '+' || c == '-' {
            if action != Some(c) {
                result.push(c);
                action = Some(c);
            }
            continue;
        }
        result.push(c);
    }

    if result.ends_with(['+', '-']) {
        result.pop();
    }
    result
}

/// Compute the mode string that turns `before` into `after`.
///
/// Letters only in `before` are removed, letters only in `after` are added.
///
/// ```
/// use slirc_support::mode::diff_modes;
///
/// assert_eq!(diff_modes("ailowz", "i"), "-alowz");
/// assert_eq!(diff_modes("i", "alowz"), "-i+alowz");
/// ```
pub fn diff_modes(before: &str, after: &str) -> String {
    let mut result = String::new();
    for c in before.chars().filter(|c| !after.contains(*c)) {
        result.push('-');
        result.push(c);
    }
    for c in after.chars().filter(|c| !before.contains(*c)) {
        result.push('+');
        result.push(c);
    }
    condense_modes(&result)
}
