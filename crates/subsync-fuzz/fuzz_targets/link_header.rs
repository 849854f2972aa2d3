#![no_main]
use libfuzzer_sys::fuzz_target;
use subsync_core::http::parse_next_link;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = std::str::from_utf8(data) {
        if let Some(next) = parse_next_link(header) {
            // The target is always a substring of the header
            assert!(header.contains(next.as_str()));
        }
    }
});
