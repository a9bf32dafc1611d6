//! Fuzz target for record redaction.
//!
//! Feeds arbitrary JSON documents through the default filter. Processing must
//! never panic, and no top-level sensitive field may survive unredacted.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lf_redact::{LogFilter, PLACEHOLDER};

fuzz_target!(|data: &[u8]| {
    let Ok(record) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let filter = LogFilter::default();
    let out = filter.process_json(&record);

    if let Some(input) = record.as_object() {
        for key in input.keys() {
            if filter.is_on_blacklist(key) {
                assert_eq!(out[key.as_str()], PLACEHOLDER);
            }
        }
    } else {
        assert!(out.is_empty());
    }
});
