//! Fuzz target for the full ingestion path: parse, then normalize.
//!
//! Malformed uploads must either come back as a clean error or a valid
//! table; dateless rows disappear without taking the pipeline down.

#![no_main]

use dispatchboard::{Normalizer, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok((raw, _)) = parser.parse_upload(data, None) {
        let _ = Normalizer::new().normalize(&raw);
    }
});
