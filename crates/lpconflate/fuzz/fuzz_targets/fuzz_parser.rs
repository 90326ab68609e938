//! Fuzz target for the record parser and ingest.
//!
//! Arbitrary bytes must either fail with an error or ingest cleanly.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lpconflate::{NullSink, Parser, RecordIngest};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    for delimiter in [b',', b'\t', b';'] {
        if let Ok(table) = Parser::new().parse_bytes(data, delimiter) {
            let _ = RecordIngest::new().ingest_all(table.records(), &NullSink);
        }
    }
});
