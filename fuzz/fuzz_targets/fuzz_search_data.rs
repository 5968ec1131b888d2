#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary input must never panic, only parse or return an error
    if let Ok(entries) = symdex::payload::parse_search_data(data) {
        let _ = symdex::index::SymbolIndex::from_entries(entries);
    }
});
