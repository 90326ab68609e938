//! Fuzz target for the structural validator.
//!
//! Any JSON value, however malformed as LPF, must be reported on rather
//! than panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lpconflate::{SchemaValidator, ValidatorConfig};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(document) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = SchemaValidator::default().validate(&document);
        let strict = SchemaValidator::new(ValidatorConfig {
            citation_required_on_names: true,
        });
        let _ = strict.validate(&document);
    }
});
