//! Fuzz target for date-cell parsing.

#![no_main]

use dispatchboard::normalize::parse_date_cell;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if data.len() > 1_000 {
        return;
    }

    let _ = parse_date_cell(data);
});
