//! Conflation performance benchmarks.
//!
//! Measures parsing, conflation and validation across input sizes and
//! title repetition rates.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lpconflate::{
    ConflationEngine, FeatureBuilder, NullSink, Parser, RecordIngest, SchemaValidator, input::ParserConfig,
};

/// Generate synthetic battle CSV data.
///
/// `distinct` controls how many titles exist; rows cycle through them with
/// small coordinate jitter so repeats usually merge.
fn generate_battle_csv(rows: usize, distinct: usize) -> String {
    let mut data = String::from("id,title,start,ccodes,aat_types,lon,lat,description\n");

    for row in 0..rows {
        let place = row % distinct;
        let lon = (place as f64 * 0.37) % 340.0 - 170.0 + (row % 7) as f64 * 0.0001;
        let lat = (place as f64 * 0.13) % 160.0 - 80.0 + (row % 5) as f64 * 0.0001;
        // Every 50th row is unlocated.
        let (lon, lat) = if row % 50 == 0 {
            (String::new(), String::new())
        } else {
            (format!("{:.5}", lon), format!("{:.5}", lat))
        };
        data.push_str(&format!(
            "{},Battle of Place {},{},FR,bf1,{},{},Account number {}\n",
            row,
            place,
            1500 + row % 400,
            lon,
            lat,
            row % 3
        ));
    }

    data
}

fn ingest(data: &str) -> Vec<lpconflate::Event> {
    let table = Parser::new().parse_bytes(data.as_bytes(), b',').unwrap();
    RecordIngest::new().ingest_all(table.records(), &NullSink).unwrap()
}

/// Benchmark parsing plus ingest.
fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_battle_csv(*rows, rows / 4);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(ingest(data)))
        });
    }

    group.finish();
}

/// Benchmark conflation with a fixed repeat rate.
fn bench_conflate(c: &mut Criterion) {
    let mut group = c.benchmark_group("conflate");
    let engine = ConflationEngine::default();

    for rows in [100, 1_000, 10_000].iter() {
        let events = ingest(&generate_battle_csv(*rows, rows / 4));
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &events, |b, events| {
            b.iter(|| black_box(engine.conflate(events, &NullSink)))
        });
    }

    group.finish();
}

/// Benchmark how many rows share a title. Heavier repetition means longer
/// candidate lists per title.
fn bench_repeat_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("repeat_scaling");
    let engine = ConflationEngine::default();
    let rows = 5_000;

    for distinct in [5_000, 500, 50, 5].iter() {
        let events = ingest(&generate_battle_csv(rows, *distinct));
        group.bench_with_input(BenchmarkId::new("distinct_titles", distinct), &events, |b, events| {
            b.iter(|| black_box(engine.conflate(events, &NullSink)))
        });
    }

    group.finish();
}

/// Benchmark rendering plus structural validation.
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let builder = FeatureBuilder::default();
    let validator = SchemaValidator::default();

    for rows in [100, 1_000, 10_000].iter() {
        let events = ingest(&generate_battle_csv(*rows, rows / 4));
        let clusters = ConflationEngine::default().conflate(&events, &NullSink);
        let document = builder.build_collection(&clusters, &NullSink).collection.to_value();

        group.throughput(Throughput::Elements(clusters.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &document, |b, document| {
            b.iter(|| black_box(validator.validate(document)))
        });
    }

    group.finish();
}

/// Benchmark row caps on the parser.
fn bench_parse_capped(c: &mut Criterion) {
    let data = generate_battle_csv(10_000, 2_500);
    let parser = Parser::with_config(ParserConfig {
        max_rows: Some(1_000),
        ..ParserConfig::default()
    });

    c.bench_function("parse_capped_1000", |b| {
        b.iter(|| black_box(parser.parse_bytes(data.as_bytes(), b',').unwrap()))
    });
}

criterion_group!(
    benches,
    bench_ingest,
    bench_conflate,
    bench_repeat_scaling,
    bench_validate,
    bench_parse_capped,
);
criterion_main!(benches);
