//! One conflation run from records to a validated document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConflateConfig;
use crate::conflation::{ClusterKey, ConflationEngine};
use crate::diagnostics::{CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, Tee, TracingSink};
use crate::error::Result;
use crate::feature::{FeatureBuilder, FeatureCollection};
use crate::ingest::{RecordIngest, fields};
use crate::input::{Parser, ParserConfig, Record, SourceMetadata};
use crate::validation::{SchemaValidator, ValidatorConfig, Violation};

/// Result of one run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Source file metadata, when the run started from a file.
    pub source: Option<SourceMetadata>,
    pub collection: FeatureCollection,
    /// Clusters dropped by the `reject` placeholder policy.
    pub rejected: Vec<ClusterKey>,
    /// Structural violations in `collection`.
    pub violations: Vec<Violation>,
    /// Recoverable problems seen while ingesting and rendering.
    pub diagnostics: Vec<Diagnostic>,
    pub summary: RunSummary,
}

impl RunResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Counts describing a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rows_read: usize,
    pub clusters: usize,
    pub features_written: usize,
    pub rejected_clusters: usize,
    pub malformed_coordinates: usize,
    pub missing_titles: usize,
    pub violations: usize,
}

impl RunSummary {
    /// Rows folded into another row's feature.
    pub fn rows_conflated(&self) -> usize {
        self.rows_read.saturating_sub(self.clusters)
    }
}

/// Chains ingest, conflation, rendering and validation.
pub struct Pipeline {
    config: ConflateConfig,
    parser: Parser,
    ingest: RecordIngest,
    engine: ConflationEngine,
    builder: FeatureBuilder,
    validator: SchemaValidator,
}

impl Pipeline {
    pub fn new(config: ConflateConfig) -> Self {
        Self::with_parser_config(config, ParserConfig::default())
    }

    pub fn with_parser_config(config: ConflateConfig, parser: ParserConfig) -> Self {
        Self {
            parser: Parser::with_config(parser),
            ingest: RecordIngest::new(),
            engine: ConflationEngine::from_config(&config),
            builder: FeatureBuilder::new(&config),
            validator: SchemaValidator::new(ValidatorConfig::from(&config)),
            config,
        }
    }

    pub fn config(&self) -> &ConflateConfig {
        &self.config
    }

    /// Parse a delimited file and run it, logging diagnostics via `tracing`.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<RunResult> {
        self.convert_file_with_sink(path, &TracingSink)
    }

    pub fn convert_file_with_sink(&self, path: impl AsRef<Path>, sink: &dyn DiagnosticSink) -> Result<RunResult> {
        let (table, source) = self.parser.parse_file(path)?;
        for column in fields::RECOGNIZED {
            if !table.has_column(column) {
                tracing::debug!(column, file = %source.file, "column absent; reading as empty");
            }
        }
        let mut result = self.run_with_sink(table.records(), sink)?;
        result.source = Some(source);
        Ok(result)
    }

    /// Run in-memory records, logging diagnostics via `tracing`.
    pub fn run<I>(&self, records: I) -> Result<RunResult>
    where
        I: IntoIterator<Item = Record>,
    {
        self.run_with_sink(records, &TracingSink)
    }

    /// Run in-memory records. Diagnostics go to `sink` and are also returned
    /// in the result.
    pub fn run_with_sink<I>(&self, records: I, sink: &dyn DiagnosticSink) -> Result<RunResult>
    where
        I: IntoIterator<Item = Record>,
    {
        self.config.validate()?;

        let collected = CollectingSink::new();
        let tee = Tee::new(sink, &collected);

        let events = self.ingest.ingest_all(records, &tee)?;
        let clusters = self.engine.conflate(&events, &tee);
        let report = self.builder.build_collection(&clusters, &tee);
        let violations = self.validator.validate(&report.collection.to_value());

        let summary = RunSummary {
            rows_read: events.len(),
            clusters: clusters.len(),
            features_written: report.collection.features.len(),
            rejected_clusters: report.rejected.len(),
            malformed_coordinates: collected.count(DiagnosticKind::MalformedCoordinate),
            missing_titles: collected.count(DiagnosticKind::MissingTitle),
            violations: violations.len(),
        };

        tracing::info!(
            rows = summary.rows_read,
            clusters = summary.clusters,
            features = summary.features_written,
            violations = summary.violations,
            "conflation run complete"
        );

        Ok(RunResult {
            source: None,
            collection: report.collection,
            rejected: report.rejected,
            violations,
            diagnostics: collected.into_warnings(),
            summary,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ConflateConfig::default())
    }
}
