//! Error types for the lpconflate library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lpconflate operations.
///
/// Per-record problems (bad coordinates, odd years) never surface here; they
/// degrade the record and are reported through a [`DiagnosticSink`]. Schema
/// problems are returned as [`Violation`] data. This enum only covers failures
/// that stop a run.
///
/// [`DiagnosticSink`]: crate::diagnostics::DiagnosticSink
/// [`Violation`]: crate::validation::Violation
#[derive(Debug, Error)]
pub enum ConflateError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the input header.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// No records to conflate.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed TOML configuration file.
    #[error("Config file error: {0}")]
    TomlConfig(#[from] toml::de::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error saving or loading a document.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for lpconflate operations.
pub type Result<T> = std::result::Result<T, ConflateError>;
