#![no_main]
use libfuzzer_sys::fuzz_target;
use subsync_core::{AssignmentFilter, AssignmentLoader};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(assignments) = AssignmentLoader::parse(content) {
            for assignment in &assignments {
                let _ = assignment.locator();
            }
            let _ = AssignmentFilter::default().apply(assignments);
        }
    }
});
