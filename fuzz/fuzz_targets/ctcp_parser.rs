//! Fuzz target for CTCP and DCC payload handling

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_support::ctcp::dcc::parse_dcc;
use slirc_support::ctcp::{ctcp_dequote, low_dequote, low_quote, split_payload};
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };

    assert_eq!(low_dequote(&low_quote(input)), input);

    if let Some(chunks) = ctcp_dequote(input) {
        for payload in &chunks.ctcp {
            if let Some(("DCC", Some(args))) = split_payload(payload) {
                let (dcc_type, rest) = args.split_once(' ').unwrap_or((args, ""));
                let _ = parse_dcc(dcc_type, rest.trim_start_matches(' '));
            }
        }
    }
});
