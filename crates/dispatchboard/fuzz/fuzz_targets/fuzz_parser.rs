//! Fuzz target for the upload parser.
//!
//! The parser must never panic on malformed uploads, whatever the
//! delimiter situation looks like.

#![no_main]

use dispatchboard::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    let _ = parser.parse_upload(data, None);
});
