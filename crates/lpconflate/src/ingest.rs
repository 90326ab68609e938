//! Record ingest: one named-field record becomes one [`Event`].
//!
//! Ingest never fails on a single record. Bad coordinates are dropped with a
//! [`DiagnosticKind::MalformedCoordinate`] warning; everything else is kept as
//! text.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::{ConflateError, Result};
use crate::geo::Coordinate;
use crate::input::Record;
use crate::title::normalize_title;

/// Recognized input field names.
pub mod fields {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const START: &str = "start";
    pub const CCODES: &str = "ccodes";
    pub const AAT_TYPES: &str = "aat_types";
    pub const LON: &str = "lon";
    pub const LAT: &str = "lat";
    pub const DESCRIPTION: &str = "description";

    pub const RECOGNIZED: [&str; 8] = [ID, TITLE, START, CCODES, AAT_TYPES, LON, LAT, DESCRIPTION];
}

/// Separator between years in the `start` field.
pub const YEAR_SEPARATOR: char = ';';

/// One input record after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Zero-based position in the input.
    pub row: usize,
    /// Source identifier; not guaranteed unique.
    pub source_id: String,
    pub raw_title: String,
    /// Matching key, see [`normalize_title`].
    pub normalized_title: String,
    /// Raw year text, possibly several `;`-separated years.
    pub year: String,
    pub country_code: String,
    pub type_identifier: String,
    /// `None` when missing or invalid; never defaulted to zero.
    pub coordinates: Option<Coordinate>,
    pub description: String,
}

impl Event {
    /// Individual years mentioned in the `year` field, trimmed, blanks dropped.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.year
            .split(YEAR_SEPARATOR)
            .map(str::trim)
            .filter(|y| !y.is_empty())
    }
}

/// Maps records to events.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordIngest;

impl RecordIngest {
    pub fn new() -> Self {
        Self
    }

    /// Convert one record. `row` is its zero-based input position.
    pub fn ingest(&self, row: usize, record: &Record, sink: &dyn DiagnosticSink) -> Event {
        let field = |name: &str| record.get(name).map(|v| v.trim()).unwrap_or("");

        let source_id = field(fields::ID).to_string();
        let raw_title = field(fields::TITLE).to_string();

        if raw_title.is_empty() {
            sink.warn(
                Diagnostic::new(DiagnosticKind::MissingTitle, format!("row {} has no title", row + 1))
                    .with_record(&source_id),
            );
        }

        let coordinates = match Coordinate::parse_pair(field(fields::LON), field(fields::LAT)) {
            Ok(coordinates) => coordinates,
            Err(e) => {
                sink.warn(
                    Diagnostic::new(
                        DiagnosticKind::MalformedCoordinate,
                        format!("row {}: {}; treating location as absent", row + 1, e),
                    )
                    .with_record(&source_id),
                );
                None
            }
        };

        Event {
            row,
            normalized_title: normalize_title(&raw_title),
            raw_title,
            source_id,
            year: field(fields::START).to_string(),
            country_code: clean_country_code(field(fields::CCODES)),
            type_identifier: field(fields::AAT_TYPES).to_string(),
            coordinates,
            description: clean_description(field(fields::DESCRIPTION)),
        }
    }

    /// Convert every record in order.
    ///
    /// No records at all is the one hard stop of a run.
    pub fn ingest_all<I>(&self, records: I, sink: &dyn DiagnosticSink) -> Result<Vec<Event>>
    where
        I: IntoIterator<Item = Record>,
    {
        let events: Vec<Event> = records
            .into_iter()
            .enumerate()
            .map(|(row, record)| self.ingest(row, &record, sink))
            .collect();

        if events.is_empty() {
            return Err(ConflateError::EmptyInput("no records to conflate".to_string()));
        }
        Ok(events)
    }
}

/// Collapse a doubled code such as "MLML" to "ML".
pub fn clean_country_code(raw: &str) -> String {
    let code = raw.trim();
    if code.len() == 4 && code.is_ascii() && code[..2] == code[2..] {
        return code[..2].to_string();
    }
    code.to_string()
}

/// Strip list-literal artifacts (`[`, `]`, `'`) from both ends of a description.
///
/// Interior apostrophes ("King's army") are part of the text.
pub fn clean_description(raw: &str) -> String {
    raw.trim_matches(|c: char| matches!(c, '[' | ']' | '\'') || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_ingest_full_record() {
        let sink = CollectingSink::new();
        let rec = record(&[
            ("id", "1"),
            ("title", "Siege of Alpha (FR)"),
            ("start", "1842"),
            ("ccodes", "FR"),
            ("aat_types", "300008570"),
            ("lon", "10.0"),
            ("lat", "20.0"),
            ("description", "['First account']"),
        ]);
        let event = RecordIngest::new().ingest(0, &rec, &sink);

        assert_eq!(event.source_id, "1");
        assert_eq!(event.raw_title, "Siege of Alpha (FR)");
        assert_eq!(event.normalized_title, "Siege of Alpha");
        assert_eq!(event.coordinates, Some(Coordinate::new(10.0, 20.0).unwrap()));
        assert_eq!(event.description, "First account");
        assert_eq!(event.type_identifier, "300008570");
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_blank_coordinates_are_absent_without_warning() {
        let sink = CollectingSink::new();
        let rec = record(&[("id", "3"), ("title", "Alpha"), ("lon", ""), ("lat", "")]);
        let event = RecordIngest::new().ingest(0, &rec, &sink);

        assert_eq!(event.coordinates, None);
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_malformed_coordinates_warn() {
        let sink = CollectingSink::new();
        let rec = record(&[("id", "4"), ("title", "Alpha"), ("lon", "east"), ("lat", "20")]);
        let event = RecordIngest::new().ingest(0, &rec, &sink);

        assert_eq!(event.coordinates, None);
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, DiagnosticKind::MalformedCoordinate);
        assert_eq!(warnings[0].record_id.as_deref(), Some("4"));
    }

    #[test]
    fn test_out_of_range_coordinates_warn() {
        let sink = CollectingSink::new();
        let rec = record(&[("title", "Alpha"), ("lon", "200"), ("lat", "20")]);
        let event = RecordIngest::new().ingest(0, &rec, &sink);

        assert_eq!(event.coordinates, None);
        assert_eq!(sink.count(DiagnosticKind::MalformedCoordinate), 1);
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        let sink = CollectingSink::new();
        let event = RecordIngest::new().ingest(5, &record(&[("title", "Alpha")]), &sink);

        assert_eq!(event.row, 5);
        assert_eq!(event.source_id, "");
        assert_eq!(event.year, "");
        assert_eq!(event.country_code, "");
        assert_eq!(event.coordinates, None);
    }

    #[test]
    fn test_missing_title_warns() {
        let sink = CollectingSink::new();
        RecordIngest::new().ingest(0, &record(&[("id", "9")]), &sink);
        assert_eq!(sink.count(DiagnosticKind::MissingTitle), 1);
    }

    #[test]
    fn test_years() {
        let sink = CollectingSink::new();
        let event = RecordIngest::new().ingest(0, &record(&[("title", "A"), ("start", "1842; 1843;")]), &sink);
        assert_eq!(event.years().collect::<Vec<_>>(), vec!["1842", "1843"]);
    }

    #[test]
    fn test_clean_country_code() {
        assert_eq!(clean_country_code("MLML"), "ML");
        assert_eq!(clean_country_code(" FR "), "FR");
        assert_eq!(clean_country_code("MLFR"), "MLFR");
        assert_eq!(clean_country_code(""), "");
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(clean_description("['A hard fight']"), "A hard fight");
        assert_eq!(clean_description("The King's army"), "The King's army");
        assert_eq!(clean_description("[]"), "");
    }

    #[test]
    fn test_ingest_all_rejects_empty_input() {
        let err = RecordIngest::new().ingest_all(Vec::<Record>::new(), &CollectingSink::new()).unwrap_err();
        assert!(matches!(err, ConflateError::EmptyInput(_)));
    }
}
