//! lpconflate: conflate tabular battle records into Linked Places documents.
//!
//! Source tables list the same battlefield several times, under titles that
//! differ by a short qualifier, with years split across rows and coordinates a
//! few hundred metres apart. This crate turns such a table into one
//! [Linked Places](https://github.com/LinkedPasts/linked-places-format)
//! `FeatureCollection` with one feature per real-world place.
//!
//! # Pipeline
//!
//! - [`ingest`]: one record (named string fields) becomes an [`Event`]
//! - [`conflation`]: events are grouped into [`PlaceCluster`]s by normalized
//!   title and great-circle proximity
//! - [`feature`]: each cluster is rendered as a [`Feature`]
//! - [`validation`]: the finished document is checked structurally
//!
//! # Example
//!
//! ```no_run
//! use lpconflate::{ConflateConfig, Pipeline};
//!
//! let pipeline = Pipeline::new(ConflateConfig::default());
//! let result = pipeline.convert_file("battles.csv").unwrap();
//!
//! println!("Features: {}", result.collection.features.len());
//! println!("Violations: {}", result.violations.len());
//! ```

pub mod config;
pub mod conflation;
pub mod diagnostics;
pub mod error;
pub mod feature;
pub mod geo;
pub mod ingest;
pub mod input;
pub mod title;
pub mod validation;

mod pipeline;

pub use crate::pipeline::{Pipeline, RunResult, RunSummary};
pub use config::{ConflateConfig, MatchPolicy, PlaceholderPolicy};
pub use conflation::{ConflationEngine, PlaceCluster};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, NullSink, TracingSink};
pub use error::{ConflateError, Result};
pub use feature::{Feature, FeatureBuilder, FeatureCollection, load_document};
pub use geo::Coordinate;
pub use ingest::{Event, RecordIngest};
pub use input::{Parser, Record, RecordTable, SourceMetadata};
pub use title::normalize_title;
pub use validation::{SchemaValidator, ValidatorConfig, Violation, ViolationKind, title_counts};
