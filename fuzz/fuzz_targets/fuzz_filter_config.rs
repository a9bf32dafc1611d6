//! Fuzz target for filter.json configuration parsing.
//!
//! Tests that config parsing and validation handle arbitrary input without
//! panicking, and that any parsed config builds a working filter.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lf_config::{validate_config, FilterConfig};
use lf_redact::LogFilter;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = FilterConfig::parse_json(text) {
        let _ = validate_config(&config);
        let filter = LogFilter::from_config(&config);
        let _ = filter.process_json(&serde_json::json!({"password": "x"}));
    }
});
