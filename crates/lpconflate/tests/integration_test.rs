//! Integration tests for lpconflate.

use std::io::Write;
use tempfile::NamedTempFile;

use lpconflate::{
    CollectingSink, ConflateConfig, ConflationEngine, DiagnosticKind, FeatureBuilder, MatchPolicy, NullSink,
    Pipeline, PlaceholderPolicy, Record, RecordIngest, SchemaValidator, ValidatorConfig, ViolationKind,
    load_document, title_counts,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Build a record from the eight recognized fields, in order
/// id, title, start, ccodes, aat_types, lon, lat, description.
fn row(values: [&str; 8]) -> Record {
    ["id", "title", "start", "ccodes", "aat_types", "lon", "lat", "description"]
        .iter()
        .zip(values)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn run(rows: Vec<Record>, config: ConflateConfig) -> lpconflate::RunResult {
    Pipeline::new(config)
        .run_with_sink(rows, &NullSink)
        .expect("run failed")
}

// =============================================================================
// Conflation Scenarios
// =============================================================================

#[test]
fn test_close_accounts_become_one_place() {
    let rows = vec![
        row(["1", "Siege of Alpha", "1842", "FR", "bf1", "10.0", "20.0", "First account"]),
        row(["2", "Siege of Alpha", "1843", "FR", "bf1", "10.001", "20.001", "Second account"]),
    ];
    let events = RecordIngest::new().ingest_all(rows, &NullSink).unwrap();
    let clusters = ConflationEngine::new(1.0).conflate(&events, &NullSink);

    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].timespans, vec!["1842", "1843"]);
    assert_eq!(clusters[0].event_count, 2);
    assert_eq!(clusters[0].descriptions.len(), 2);
    assert_ne!(clusters[0].descriptions[0], clusters[0].descriptions[1]);
}

#[test]
fn test_distant_accounts_stay_apart() {
    let rows = vec![
        row(["1", "Siege of Alpha", "1842", "FR", "bf1", "10.0", "20.0", "First account"]),
        row(["2", "Siege of Alpha", "1843", "FR", "bf1", "50.0", "60.0", "Second account"]),
    ];
    let events = RecordIngest::new().ingest_all(rows, &NullSink).unwrap();
    let clusters = ConflationEngine::new(1.0).conflate(&events, &NullSink);

    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].event_count, 1);
    assert_eq!(clusters[1].event_count, 1);
}

#[test]
fn test_blank_coordinates_use_placeholder() {
    let result = run(
        vec![row(["7", "Skirmish at Gamma", "1901", "ML", "bf1", "", "", "Unlocated report"])],
        ConflateConfig::default(),
    );

    let feature = &result.collection.features[0];
    assert_eq!(feature.geometry.coordinates, Some([0.0, 0.0]));
    assert_eq!(
        feature.descriptions[0].value,
        "Unlocated report (1901) (Number of battles: 1)"
    );
    assert_eq!(result.summary.malformed_coordinates, 0);
}

#[test]
fn test_doubled_country_code() {
    let result = run(
        vec![row(["1", "Battle of Delta", "1990", "MLML", "bf1", "-4.0", "17.0", "x"])],
        ConflateConfig::default(),
    );

    assert_eq!(result.collection.features[0].properties.ccodes, vec!["ML"]);
    let value = result.collection.to_value();
    assert_eq!(value["features"][0]["properties"]["ccodes"][0], "ML");
}

#[test]
fn test_unlocated_rows_merge_under_title_only() {
    let rows = vec![
        row(["1", "Alpha", "1842", "", "bf1", "", "", "Report"]),
        row(["2", "Alpha (FR)", "1842", "", "bf1", "", "", "Report"]),
    ];
    let result = run(rows, ConflateConfig::default().with_match_policy(MatchPolicy::TitleOnly));

    assert_eq!(result.summary.clusters, 1);
    // Unlocated reports always count and always keep their description.
    assert_eq!(
        result.collection.features[0].descriptions[0].value,
        "Report (1842); Report (1842) (Number of battles: 2)"
    );
    assert_eq!(result.collection.features[0].names.len(), 2);
}

#[test]
fn test_unparseable_year_kept_verbatim() {
    let rows = vec![
        row(["1", "Alpha", "1843", "", "bf1", "1.0", "1.0", ""]),
        row(["2", "Alpha", "early spring", "", "bf1", "1.0", "1.0", ""]),
        row(["3", "Alpha", "1066", "", "bf1", "1.0", "1.0", ""]),
    ];
    let result = run(rows, ConflateConfig::default());

    let years: Vec<&str> = result.collection.features[0]
        .when
        .timespans
        .iter()
        .map(|t| t.start.within.as_str())
        .collect();
    assert_eq!(years, vec!["1066", "1843", "early spring"]);
}

#[test]
fn test_reject_policy_drops_unlocated() {
    let rows = vec![
        row(["1", "Alpha", "1842", "", "bf1", "", "", ""]),
        row(["2", "Beta", "1842", "", "bf1", "2.0", "2.0", ""]),
    ];
    let result = run(rows, ConflateConfig::default().with_placeholder(PlaceholderPolicy::Reject));

    assert_eq!(result.summary.clusters, 2);
    assert_eq!(result.summary.features_written, 1);
    assert_eq!(result.rejected.len(), 1);
    assert!(result.diagnostics.iter().any(|d| d.kind == DiagnosticKind::RejectedCluster));
}

#[test]
fn test_omit_policy_still_validates() {
    let rows = vec![row(["1", "Alpha", "1842", "", "bf1", "", "", ""])];
    let result = run(rows, ConflateConfig::default().with_placeholder(PlaceholderPolicy::Omit));

    assert!(result.is_valid(), "{:?}", result.violations);
    assert!(result.collection.to_value()["features"][0]["geometry"].get("coordinates").is_none());
}

// =============================================================================
// Validation Round Trip
// =============================================================================

#[test]
fn test_built_document_validates_clean() {
    let rows = vec![
        row(["1", "Siege of Alpha", "1842", "FR", "bf1", "10.0", "20.0", "First"]),
        row(["2", "Siege of Alpha (FR)", "1843", "FR", "bf1", "10.001", "20.001", "Second"]),
        row(["3", "Battle of Beta", "1700;1701", "MLML", "bf1", "-3.0", "15.0", "['Third']"]),
        row(["4", "Battle of Gamma", "1066", "", "bf1", "", "", ""]),
    ];
    let events = RecordIngest::new().ingest_all(rows, &NullSink).unwrap();
    let clusters = ConflationEngine::new(1.0).conflate(&events, &NullSink);
    let report = FeatureBuilder::default().build_collection(&clusters, &NullSink);

    let violations = SchemaValidator::default().validate(&report.collection.to_value());
    assert!(violations.is_empty(), "{:?}", violations);
}

#[test]
fn test_removed_title_reports_exactly_one_violation() {
    let rows = vec![
        row(["1", "Siege of Alpha", "1842", "FR", "bf1", "10.0", "20.0", "First"]),
        row(["2", "Battle of Beta", "1843", "FR", "bf1", "11.0", "21.0", "Second"]),
    ];
    let result = run(rows, ConflateConfig::default());
    let mut document = result.collection.to_value();
    document["features"][1]["properties"]
        .as_object_mut()
        .unwrap()
        .remove("title");

    let violations = SchemaValidator::default().validate(&document);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].feature, Some(1));
    assert_eq!(violations[0].field, "properties.title");
}

#[test]
fn test_same_name_distant_places_flagged_as_duplicate_titles() {
    let rows = vec![
        row(["1", "Battle of Springfield", "1780", "US", "bf1", "-74.3", "40.7", ""]),
        row(["2", "Battle of Springfield", "1861", "US", "bf1", "-93.3", "37.2", ""]),
    ];
    let result = run(rows, ConflateConfig::default());

    assert_eq!(result.summary.clusters, 2);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ViolationKind::DuplicateTitle);

    let counts = title_counts(&result.collection.to_value());
    assert_eq!(counts["Battle of Springfield"], 2);
}

#[test]
fn test_citation_rule_is_opt_in() {
    let rows = vec![row(["1", "Alpha", "1842", "", "bf1", "1.0", "1.0", ""])];
    let document = run(rows, ConflateConfig::default()).collection.to_value();

    assert!(SchemaValidator::default().validate(&document).is_empty());

    let strict = SchemaValidator::new(ValidatorConfig {
        citation_required_on_names: true,
    });
    let violations = strict.validate(&document);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::MissingCitation);

    let rows = vec![row(["1", "Alpha", "1842", "", "bf1", "1.0", "1.0", ""])];
    let result = run(rows, ConflateConfig::default().with_citations_required(true));
    assert!(!result.is_valid());
    assert_eq!(result.violations[0].kind, ViolationKind::MissingCitation);
}

// =============================================================================
// File Round Trip
// =============================================================================

#[test]
fn test_csv_to_saved_document() {
    let content = "id,title,start,ccodes,aat_types,lon,lat,description\n\
                   1,Siege of Alpha,1842,FR,bf1,10.0,20.0,First account\n\
                   2,Siege of Alpha (FR),1843,FR,bf1,10.001,20.001,\"Second, longer account\"\n\
                   3,Battle of Beta,1700,MLML,bf1,north,15.0,Desert fight\n";
    let file = create_test_file(content);
    let sink = CollectingSink::new();

    let result = Pipeline::default()
        .convert_file_with_sink(file.path(), &sink)
        .expect("conversion failed");

    assert_eq!(result.summary.rows_read, 3);
    assert_eq!(result.summary.clusters, 2);
    assert_eq!(sink.count(DiagnosticKind::MalformedCoordinate), 1);

    let out = NamedTempFile::new().unwrap();
    result.collection.save(out.path()).unwrap();
    let loaded = load_document(out.path()).unwrap();

    assert_eq!(loaded, result.collection.to_value());
    assert!(SchemaValidator::default().validate(&loaded).is_empty());
    assert_eq!(
        loaded["features"][0]["descriptions"][0]["value"],
        "First account (1842); Second, longer account (1843) (Number of battles: 2)"
    );
}

#[test]
fn test_tsv_input() {
    let content = "id\ttitle\tstart\tlon\tlat\n1\tAlpha\t1842\t1.0\t1.0\n";
    let file = create_test_file(content);

    let result = Pipeline::default()
        .convert_file_with_sink(file.path(), &NullSink)
        .unwrap();
    assert_eq!(result.source.unwrap().format, "tsv");
    assert_eq!(result.summary.features_written, 1);
}

#[test]
fn test_config_file_drives_run() {
    let config_file = create_test_file("proximity_threshold_km = 0.05\nannotate_descriptions_with_year = false\n");
    let config = ConflateConfig::load(config_file.path()).unwrap();

    let rows = vec![
        row(["1", "Alpha", "1842", "", "bf1", "10.0", "20.0", "First"]),
        row(["2", "Alpha", "1843", "", "bf1", "10.001", "20.001", "Second"]),
    ];
    let result = run(rows, config);

    // ~150 m apart: outside a 50 m radius.
    assert_eq!(result.summary.clusters, 2);
    assert_eq!(
        result.collection.features[0].descriptions[0].value,
        "First (Number of battles: 1)"
    );
}
