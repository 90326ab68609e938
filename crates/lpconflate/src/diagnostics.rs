//! Run-scoped diagnostics.
//!
//! The library never installs a global logger. Components that need to report
//! recoverable problems take a `&dyn DiagnosticSink` for the duration of one
//! run; the caller decides whether diagnostics go to `tracing`, to memory, or
//! nowhere.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

/// What kind of recoverable problem was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A record's lon/lat failed to parse or is out of range.
    MalformedCoordinate,
    /// A normalized title matched open clusters, none close enough.
    AmbiguousMerge,
    /// A record has no title.
    MissingTitle,
    /// A cluster was dropped because its coordinates are absent.
    RejectedCluster,
}

impl DiagnosticKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::MalformedCoordinate => "Malformed Coordinate",
            DiagnosticKind::AmbiguousMerge => "Ambiguous Merge",
            DiagnosticKind::MissingTitle => "Missing Title",
            DiagnosticKind::RejectedCluster => "Rejected Cluster",
        }
    }
}

/// One recoverable problem, tied to the source record it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Source record id, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            record_id: None,
            message: message.into(),
        }
    }

    pub fn with_record(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }
}

/// Receiver for diagnostics produced during one run.
pub trait DiagnosticSink {
    /// A problem the caller probably wants to see.
    fn warn(&self, diagnostic: Diagnostic);

    /// Expected steady-state behaviour worth tracing.
    fn debug(&self, diagnostic: Diagnostic) {
        let _ = diagnostic;
    }
}

/// Forwards diagnostics to `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = diagnostic.kind.label(),
            record = diagnostic.record_id.as_deref().unwrap_or("-"),
            "{}",
            diagnostic.message
        );
    }

    fn debug(&self, diagnostic: Diagnostic) {
        tracing::debug!(
            kind = diagnostic.kind.label(),
            record = diagnostic.record_id.as_deref().unwrap_or("-"),
            "{}",
            diagnostic.message
        );
    }
}

/// Keeps warnings in memory; debug diagnostics are dropped.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything collected so far, in arrival order.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.warnings.borrow().clone()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.warnings.borrow().iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_warnings(self) -> Vec<Diagnostic> {
        self.warnings.into_inner()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, diagnostic: Diagnostic) {
        self.warnings.borrow_mut().push(diagnostic);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&self, _diagnostic: Diagnostic) {}
}

/// Fans out to two sinks, e.g. `tracing` plus a collector for counting.
pub struct Tee<'a> {
    first: &'a dyn DiagnosticSink,
    second: &'a dyn DiagnosticSink,
}

impl<'a> Tee<'a> {
    pub fn new(first: &'a dyn DiagnosticSink, second: &'a dyn DiagnosticSink) -> Self {
        Self { first, second }
    }
}

impl DiagnosticSink for Tee<'_> {
    fn warn(&self, diagnostic: Diagnostic) {
        self.first.warn(diagnostic.clone());
        self.second.warn(diagnostic);
    }

    fn debug(&self, diagnostic: Diagnostic) {
        self.first.debug(diagnostic.clone());
        self.second.debug(diagnostic);
    }
}
