//! Validators for checking documents against the LPF subset we write.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::config::ConflateConfig;

use super::violation::{Violation, ViolationKind};

/// Trait for validators.
pub trait Validator {
    /// Inspect the document and return every violation found. Must not panic
    /// on any JSON value.
    fn validate(&self, document: &Value) -> Vec<Violation>;
}

/// Feature entries of a document, with their index. Empty when `features` is
/// missing or not an array; [`RootValidator`] reports that case.
fn features(document: &Value) -> impl Iterator<Item = (usize, &Value)> {
    document
        .get("features")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .enumerate()
}

/// Feature entries that are JSON objects. Non-objects are reported once by
/// [`IdentityValidator`] and skipped everywhere else.
fn feature_objects(document: &Value) -> impl Iterator<Item = (usize, &Map<String, Value>)> {
    features(document).filter_map(|(i, f)| f.as_object().map(|o| (i, o)))
}

fn missing(index: usize, field: &str) -> Violation {
    Violation::feature(index, ViolationKind::MissingField, field, "required field missing")
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Checks the collection wrapper: type tag, context, features array.
pub struct RootValidator;

impl Validator for RootValidator {
    fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        let Some(root) = document.as_object() else {
            violations.push(
                Violation::document(ViolationKind::WrongType, "$", "document root must be an object")
                    .with_value(json_type(document)),
            );
            return violations;
        };

        match root.get("type") {
            Some(Value::String(t)) if t == "FeatureCollection" => {}
            Some(other) => violations.push(
                Violation::document(ViolationKind::WrongType, "type", "root type must be 'FeatureCollection'")
                    .with_value(other.clone()),
            ),
            None => violations.push(Violation::document(
                ViolationKind::MissingField,
                "type",
                "required field missing",
            )),
        }

        match root.get("@context") {
            Some(Value::String(c)) if !c.trim().is_empty() => {}
            Some(Value::String(_)) => violations.push(Violation::document(
                ViolationKind::EmptyField,
                "@context",
                "context identifier is empty",
            )),
            Some(other) => violations.push(
                Violation::document(ViolationKind::WrongType, "@context", "context identifier must be a string")
                    .with_value(json_type(other)),
            ),
            None => violations.push(Violation::document(
                ViolationKind::MissingField,
                "@context",
                "required field missing",
            )),
        }

        match root.get("features") {
            Some(Value::Array(_)) => {}
            Some(other) => violations.push(
                Violation::document(ViolationKind::MissingFeatures, "features", "'features' must be an array")
                    .with_value(json_type(other)),
            ),
            None => violations.push(Violation::document(
                ViolationKind::MissingFeatures,
                "features",
                "'features' element is missing",
            )),
        }

        violations
    }
}

/// Checks that each feature is an object with `@id` and `type == "Feature"`.
pub struct IdentityValidator;

impl Validator for IdentityValidator {
    fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, feature) in features(document) {
            let Some(feature) = feature.as_object() else {
                violations.push(
                    Violation::feature(index, ViolationKind::WrongType, "$", "feature must be an object")
                        .with_value(json_type(feature)),
                );
                continue;
            };

            match feature.get("@id") {
                None => violations.push(missing(index, "@id")),
                Some(id) if is_blank(id) => violations.push(Violation::feature(
                    index,
                    ViolationKind::EmptyField,
                    "@id",
                    "identifier is empty",
                )),
                Some(_) => {}
            }

            match feature.get("type") {
                Some(Value::String(t)) if t == "Feature" => {}
                Some(other) => violations.push(
                    Violation::feature(index, ViolationKind::WrongType, "type", "feature type must be 'Feature'")
                        .with_value(other.clone()),
                ),
                None => violations.push(missing(index, "type")),
            }
        }

        violations
    }
}

/// Checks `properties.title` and the shape of `properties.ccodes`.
pub struct PropertiesValidator;

impl Validator for PropertiesValidator {
    fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, feature) in feature_objects(document) {
            let properties = match feature.get("properties") {
                Some(Value::Object(p)) => p,
                Some(other) => {
                    violations.push(
                        Violation::feature(index, ViolationKind::WrongType, "properties", "properties must be an object")
                            .with_value(json_type(other)),
                    );
                    continue;
                }
                None => {
                    violations.push(missing(index, "properties"));
                    continue;
                }
            };

            match properties.get("title") {
                None => violations.push(missing(index, "properties.title")),
                Some(Value::String(t)) if t.trim().is_empty() => violations.push(Violation::feature(
                    index,
                    ViolationKind::EmptyField,
                    "properties.title",
                    "title is empty",
                )),
                Some(Value::String(_)) => {}
                Some(other) => violations.push(
                    Violation::feature(index, ViolationKind::WrongType, "properties.title", "title must be a string")
                        .with_value(json_type(other)),
                ),
            }

            if let Some(ccodes) = properties.get("ccodes") {
                if !ccodes.is_array() {
                    violations.push(
                        Violation::feature(index, ViolationKind::WrongType, "properties.ccodes", "'ccodes' should be a list")
                            .with_value(ccodes.clone()),
                    );
                }
            }
        }

        violations
    }
}

/// Checks that each feature has `when` with at least one timespan.
pub struct TemporalValidator;

impl Validator for TemporalValidator {
    fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, feature) in feature_objects(document) {
            let Some(when) = feature.get("when") else {
                violations.push(missing(index, "when"));
                continue;
            };

            match when.get("timespans") {
                Some(Value::Array(spans)) if spans.is_empty() => violations.push(Violation::feature(
                    index,
                    ViolationKind::EmptyField,
                    "when.timespans",
                    "at least one timespan is required",
                )),
                Some(Value::Array(_)) => {}
                Some(other) => violations.push(
                    Violation::feature(index, ViolationKind::WrongType, "when.timespans", "timespans must be a list")
                        .with_value(json_type(other)),
                ),
                None => violations.push(missing(index, "when.timespans")),
            }
        }

        violations
    }
}

/// Checks that each feature has a geometry and that present coordinates are
/// a valid position. Longitude and latitude are reported separately.
pub struct GeometryValidator;

impl Validator for GeometryValidator {
    fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, feature) in feature_objects(document) {
            let geometry = match feature.get("geometry") {
                Some(Value::Object(g)) => g,
                Some(other) => {
                    violations.push(
                        Violation::feature(index, ViolationKind::WrongType, "geometry", "geometry must be an object")
                            .with_value(json_type(other)),
                    );
                    continue;
                }
                None => {
                    violations.push(missing(index, "geometry"));
                    continue;
                }
            };

            let Some(coordinates) = geometry.get("coordinates") else {
                continue;
            };

            let pair = coordinates
                .as_array()
                .filter(|a| a.len() == 2)
                .and_then(|a| Some((a[0].as_f64()?, a[1].as_f64()?)));

            let Some((lon, lat)) = pair else {
                violations.push(
                    Violation::feature(
                        index,
                        ViolationKind::MalformedCoordinates,
                        "geometry.coordinates",
                        "coordinates must be a [longitude, latitude] pair of numbers",
                    )
                    .with_value(coordinates.clone()),
                );
                continue;
            };

            if !(-180.0..=180.0).contains(&lon) {
                violations.push(
                    Violation::feature(
                        index,
                        ViolationKind::OutOfRange,
                        "geometry.coordinates[0]",
                        "longitude out of range [-180, 180]",
                    )
                    .with_value(lon),
                );
            }
            if !(-90.0..=90.0).contains(&lat) {
                violations.push(
                    Violation::feature(
                        index,
                        ViolationKind::OutOfRange,
                        "geometry.coordinates[1]",
                        "latitude out of range [-90, 90]",
                    )
                    .with_value(lat),
                );
            }
        }

        violations
    }
}

/// Checks that each feature has at least one name, and optionally that every
/// name entry carries `citations`.
#[derive(Debug, Default)]
pub struct NamesValidator {
    pub citation_required: bool,
}

impl Validator for NamesValidator {
    fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, feature) in feature_objects(document) {
            let names = match feature.get("names") {
                Some(Value::Array(names)) if names.is_empty() => {
                    violations.push(Violation::feature(
                        index,
                        ViolationKind::EmptyField,
                        "names",
                        "at least one name is required",
                    ));
                    continue;
                }
                Some(Value::Array(names)) => names,
                Some(other) => {
                    violations.push(
                        Violation::feature(index, ViolationKind::WrongType, "names", "names must be a list")
                            .with_value(json_type(other)),
                    );
                    continue;
                }
                None => {
                    violations.push(missing(index, "names"));
                    continue;
                }
            };

            if !self.citation_required {
                continue;
            }

            for (name_index, name) in names.iter().enumerate() {
                if name.get("citations").is_none() {
                    let mut violation = Violation::feature(
                        index,
                        ViolationKind::MissingCitation,
                        format!("names[{}].citations", name_index),
                        "name entry has no citations",
                    );
                    if let Some(toponym) = name.get("toponym") {
                        violation = violation.with_value(toponym.clone());
                    }
                    violations.push(violation);
                }
            }
        }

        violations
    }
}

/// Reports every feature whose title repeats an earlier feature's title.
pub struct TitleUniquenessValidator;

impl Validator for TitleUniquenessValidator {
    fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut first_seen: IndexMap<&str, usize> = IndexMap::new();
        let mut violations = Vec::new();

        for (index, title) in titles(document) {
            match first_seen.get(title) {
                Some(&first) => violations.push(
                    Violation::feature(
                        index,
                        ViolationKind::DuplicateTitle,
                        "properties.title",
                        format!("duplicate title found: {} (first used by feature {})", title, first),
                    )
                    .with_value(title),
                ),
                None => {
                    first_seen.insert(title, index);
                }
            }
        }

        violations
    }
}

/// Non-empty string titles with their feature index.
fn titles(document: &Value) -> impl Iterator<Item = (usize, &str)> {
    feature_objects(document).filter_map(|(index, feature)| {
        feature
            .get("properties")
            .and_then(|p| p.get("title"))
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .map(|t| (index, t))
    })
}

/// Titles used by more than one feature, with their counts, in first-seen order.
pub fn title_counts(document: &Value) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for (_, title) in titles(document) {
        *counts.entry(title.to_string()).or_insert(0) += 1;
    }
    counts.retain(|_, count| *count > 1);
    counts
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Policy switches for [`SchemaValidator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorConfig {
    pub citation_required_on_names: bool,
}

impl From<&ConflateConfig> for ValidatorConfig {
    fn from(config: &ConflateConfig) -> Self {
        Self {
            citation_required_on_names: config.citation_required_on_names,
        }
    }
}

/// Runs every validator over a document.
pub struct SchemaValidator {
    validators: Vec<Box<dyn Validator>>,
}

impl SchemaValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            validators: vec![
                Box::new(RootValidator),
                Box::new(IdentityValidator),
                Box::new(PropertiesValidator),
                Box::new(TemporalValidator),
                Box::new(GeometryValidator),
                Box::new(NamesValidator {
                    citation_required: config.citation_required_on_names,
                }),
                Box::new(TitleUniquenessValidator),
            ],
        }
    }

    /// Run all validators and collect violations. Document-level violations
    /// come first, then features in index order. Empty iff conformant.
    pub fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut all_violations: Vec<Violation> = self
            .validators
            .iter()
            .flat_map(|validator| validator.validate(document))
            .collect();

        // Stable: per-feature order follows validator order.
        all_violations.sort_by_key(|v| v.feature);

        all_violations
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}
