//! Fuzz target for line decomposition and message decoding
//!
//! Every input line is fed through one parser so that ISUPPORT and CAP
//! state built up by earlier lines shapes how later ones are decoded.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_support::{compose, decompose, Parser};
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };

    let mut parser = Parser::new();
    for raw in input.split('\n').take(64) {
        // Decoding should never panic
        let _ = parser.parse(raw);

        // Anything that decomposes must compose back to an equivalent line
        if let Ok(line) = decompose(raw) {
            let composed = compose(&line).expect("decomposed line composes");
            assert_eq!(decompose(&composed).expect("composed line decomposes"), line);
        }
    }
});
