//! Fuzz target for title normalization.
//!
//! Normalization must never panic, never leave doubled or edge whitespace,
//! and must be idempotent.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lpconflate::normalize_title;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let normalized = normalize_title(raw);
        assert_eq!(normalized.trim(), normalized);
        assert!(!normalized.contains("  "));
        assert_eq!(normalize_title(&normalized), normalized);
    }
});
