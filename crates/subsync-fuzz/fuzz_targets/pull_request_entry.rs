#![no_main]
use libfuzzer_sys::fuzz_target;
use subsync_core::http::pulls::parse_pull_request;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    if let Ok(pr) = parse_pull_request(&value) {
        assert!(pr.number > 0);
        assert!(!pr.head_sha.is_empty());
    }
});
