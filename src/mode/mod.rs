//! IRC mode parsing.
//!
//! Channel modes are classified by the server's `CHANMODES` token into four
//! classes that decide whether a mode letter consumes an argument. See
//! [`ChanModes`] for the table and [`parse_channel_modes`] for the parser.

mod parse;
mod types;

pub use self::parse::{
    condense_modes, diff_modes, parse_channel_modes, parse_channel_modes_with_prefixes,
    parse_modes,
};
pub use self::types::{ChanModes, ModeArg, ModeChange, ModeClass};
