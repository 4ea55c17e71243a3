//! Fuzz target for mode string parsing

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_support::mode::{
    condense_modes, diff_modes, parse_channel_modes_with_prefixes, parse_modes, ChanModes,
};
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };

    let mut parts = input.split(' ');
    let modes = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let _ = parse_modes(modes);
    let _ = condense_modes(modes);
    let _ = diff_modes(modes, args.first().copied().unwrap_or_default());

    let chanmodes = ChanModes::new("beI", "k", "l", "imnpst");
    let _ = parse_channel_modes_with_prefixes(modes, &args, &chanmodes, &['o', 'v']);
});
