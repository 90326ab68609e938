//! Rendering place clusters as LPF features.

use crate::config::{ConflateConfig, PlaceholderPolicy};
use crate::conflation::{ClusterKey, PlaceCluster};
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};

use super::document::{
    DescriptionEntry, Feature, FeatureCollection, Geometry, Name, Properties, TimePoint, Timespan, TypeEntry, When,
};

/// Position rendered for unlocated clusters under `zero-fallback`.
///
/// This is a known precision loss, not a real location.
pub const ZERO_PLACEHOLDER: [f64; 2] = [0.0, 0.0];

/// Output of rendering a whole run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub collection: FeatureCollection,
    /// Clusters dropped under the `reject` placeholder policy.
    pub rejected: Vec<ClusterKey>,
}

/// Renders clusters as features.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    placeholder: PlaceholderPolicy,
    context_uri: String,
    type_label: String,
}

impl FeatureBuilder {
    pub fn new(config: &ConflateConfig) -> Self {
        Self {
            placeholder: config.coordinate_placeholder_policy,
            context_uri: config.context_uri.clone(),
            type_label: config.type_label.clone(),
        }
    }

    /// Render one cluster. `None` only when the cluster has no coordinates and
    /// the placeholder policy is `reject`.
    pub fn build(&self, cluster: &PlaceCluster) -> Option<Feature> {
        let coordinates = match (cluster.coordinates, self.placeholder) {
            (Some(c), _) => Some(c.to_array()),
            (None, PlaceholderPolicy::ZeroFallback) => Some(ZERO_PLACEHOLDER),
            (None, PlaceholderPolicy::Omit) => None,
            (None, PlaceholderPolicy::Reject) => return None,
        };

        let ccodes = if cluster.country_code.is_empty() {
            Vec::new()
        } else {
            vec![cluster.country_code.clone()]
        };

        let timespans = cluster
            .timespans
            .iter()
            .map(|year| Timespan {
                start: TimePoint { within: year.clone() },
            })
            .collect();

        let names = cluster
            .toponyms
            .iter()
            .map(|toponym| Name {
                toponym: toponym.clone(),
                citations: Vec::new(),
            })
            .collect();

        Some(Feature {
            id: cluster.id.clone(),
            kind: "Feature".to_string(),
            properties: Properties {
                title: cluster.canonical_title.clone(),
                ccodes,
            },
            when: When { timespans },
            types: vec![TypeEntry {
                identifier: cluster.type_identifier.clone(),
                label: self.type_label.clone(),
            }],
            names,
            geometry: Geometry::point(coordinates),
            descriptions: vec![DescriptionEntry {
                value: describe(cluster),
            }],
        })
    }

    /// Render every cluster into one collection, in cluster order.
    pub fn build_collection(&self, clusters: &[PlaceCluster], sink: &dyn DiagnosticSink) -> BuildReport {
        let mut collection = FeatureCollection::new(self.context_uri.clone());
        let mut rejected = Vec::new();

        for cluster in clusters {
            match self.build(cluster) {
                Some(feature) => collection.features.push(feature),
                None => {
                    sink.warn(
                        Diagnostic::new(
                            DiagnosticKind::RejectedCluster,
                            format!("'{}' has no valid coordinates; feature not written", cluster.canonical_title),
                        )
                        .with_record(&cluster.id),
                    );
                    rejected.push(cluster.key.clone());
                }
            }
        }

        BuildReport { collection, rejected }
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new(&ConflateConfig::default())
    }
}

/// `"a; b (Number of battles: N)"`
fn describe(cluster: &PlaceCluster) -> String {
    let count = format!("(Number of battles: {})", cluster.event_count);
    if cluster.descriptions.is_empty() {
        count
    } else {
        format!("{} {}", cluster.descriptions.join("; "), count)
    }
}
