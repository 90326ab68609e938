//! The subset of the Linked Places format this crate writes.

use serde::{Deserialize, Serialize};

/// Root of an LPF document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Always `"FeatureCollection"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "@context")]
    pub context: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            context: context.into(),
            features: Vec::new(),
        }
    }

    /// The document as a JSON tree, the form the validator reads.
    pub fn to_value(&self) -> serde_json::Value {
        // A derived Serialize over strings, floats and vectors cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// One place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "@id")]
    pub id: String,
    /// Always `"Feature"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: Properties,
    pub when: When,
    pub types: Vec<TypeEntry>,
    pub names: Vec<Name>,
    pub geometry: Geometry,
    pub descriptions: Vec<DescriptionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub title: String,
    pub ccodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct When {
    pub timespans: Vec<Timespan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timespan {
    pub start: TimePoint,
}

/// A point in time; `in` holds a year or other display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    #[serde(rename = "in")]
    pub within: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub identifier: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub toponym: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub label: String,
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A GeoJSON point. `coordinates` is absent under the `omit` placeholder policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f64; 2]>,
}

impl Geometry {
    pub fn point(coordinates: Option<[f64; 2]>) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionEntry {
    pub value: String,
}
