//! Violation types for structural document problems.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type of structural problem detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required member is absent.
    MissingField,
    /// A required member is present but empty.
    EmptyField,
    /// A member has the wrong JSON type or tag value.
    WrongType,
    /// The document has no `features` array.
    MissingFeatures,
    /// A coordinate value lies outside the WGS84 range.
    OutOfRange,
    /// `coordinates` is not a pair of numbers.
    MalformedCoordinates,
    /// A name entry lacks `citations`.
    MissingCitation,
    /// A title already used by an earlier feature.
    DuplicateTitle,
}

impl ViolationKind {
    /// Get a human-readable label for the violation kind.
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "Missing Field",
            ViolationKind::EmptyField => "Empty Field",
            ViolationKind::WrongType => "Wrong Type",
            ViolationKind::MissingFeatures => "Missing Features",
            ViolationKind::OutOfRange => "Out Of Range",
            ViolationKind::MalformedCoordinates => "Malformed Coordinates",
            ViolationKind::MissingCitation => "Missing Citation",
            ViolationKind::DuplicateTitle => "Duplicate Title",
        }
    }
}

/// One structural non-conformance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    /// Zero-based feature index; `None` for document-level problems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<usize>,
    /// Dotted path of the offending member, e.g. `properties.title`.
    pub field: String,
    pub message: String,
    /// The offending value, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Violation {
    /// A document-level violation.
    pub fn document(kind: ViolationKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            feature: None,
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// A violation scoped to one feature.
    pub fn feature(index: usize, kind: ViolationKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            feature: Some(index),
            ..Self::document(kind, field, message)
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.feature {
            Some(index) => write!(f, "feature {}: {}: {}", index, self.field, self.message),
            None => write!(f, "document: {}: {}", self.field, self.message),
        }
    }
}
