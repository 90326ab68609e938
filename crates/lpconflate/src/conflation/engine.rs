//! The conflation engine.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::cluster::{ClusterKey, PlaceCluster};
use crate::config::{ConflateConfig, MatchPolicy};
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, NullSink};
use crate::geo::are_close;
use crate::ingest::Event;

/// Groups events into place clusters.
///
/// Matching is scoped to clusters that share a match key (the normalized
/// title, or the exact location under [`MatchPolicy::ExactLocation`]), so a
/// run costs O(n·k) with k the number of open clusters per key.
#[derive(Debug, Clone)]
pub struct ConflationEngine {
    threshold_km: f64,
    policy: MatchPolicy,
    annotate_years: bool,
}

impl ConflationEngine {
    /// Title-and-proximity matching with the given radius.
    pub fn new(threshold_km: f64) -> Self {
        Self {
            threshold_km,
            policy: MatchPolicy::TitleProximity,
            annotate_years: true,
        }
    }

    pub fn from_config(config: &ConflateConfig) -> Self {
        Self {
            threshold_km: config.proximity_threshold_km,
            policy: config.match_policy,
            annotate_years: config.annotate_descriptions_with_year,
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_year_annotations(mut self, annotate: bool) -> Self {
        self.annotate_years = annotate;
        self
    }

    /// Conflate events in input order. Clusters come back finalized, in the
    /// order their first event appeared.
    pub fn conflate(&self, events: &[Event], sink: &dyn DiagnosticSink) -> Vec<PlaceCluster> {
        let mut clusters: IndexMap<ClusterKey, PlaceCluster> = IndexMap::new();
        // match key -> positions in `clusters`
        let mut open: HashMap<String, Vec<usize>> = HashMap::new();

        for event in events {
            let match_key = self.match_key(event);
            let candidates = match_key.as_ref().and_then(|k| open.get(k));

            let target = candidates.and_then(|positions| {
                positions.iter().copied().find(|&pos| {
                    clusters
                        .get_index(pos)
                        .is_some_and(|(_, cluster)| self.matches(cluster, event))
                })
            });

            if let Some(pos) = target {
                if let Some((_, cluster)) = clusters.get_index_mut(pos) {
                    cluster.absorb(event, self.annotate_years);
                }
                continue;
            }

            if let Some(positions) = candidates {
                sink.debug(
                    Diagnostic::new(
                        DiagnosticKind::AmbiguousMerge,
                        format!(
                            "'{}' matches {} open cluster(s), none within {} km; opening a new one",
                            event.normalized_title,
                            positions.len(),
                            self.threshold_km
                        ),
                    )
                    .with_record(&event.source_id),
                );
            }

            let key = self.cluster_key(event, &clusters);
            let cluster = PlaceCluster::open(key.clone(), event, self.annotate_years);
            let (pos, _) = clusters.insert_full(key, cluster);
            if let Some(k) = match_key {
                open.entry(k).or_default().push(pos);
            }
        }

        clusters
            .into_values()
            .map(|mut cluster| {
                cluster.finalize();
                cluster
            })
            .collect()
    }

    /// The key under which candidate clusters are looked up. `None` means the
    /// event can never join an existing cluster.
    fn match_key(&self, event: &Event) -> Option<String> {
        match self.policy {
            MatchPolicy::TitleProximity | MatchPolicy::TitleOnly => Some(event.normalized_title.clone()),
            MatchPolicy::ExactLocation => event.coordinates.map(|c| c.to_string()),
        }
    }

    fn matches(&self, cluster: &PlaceCluster, event: &Event) -> bool {
        match self.policy {
            MatchPolicy::TitleProximity => are_close(cluster.coordinates, event.coordinates, self.threshold_km),
            MatchPolicy::TitleOnly => true,
            MatchPolicy::ExactLocation => event.coordinates.is_some() && cluster.coordinates == event.coordinates,
        }
    }

    /// Key for a new cluster: the event's own location tells it apart from
    /// same-titled clusters; unlocated events fall back to their input row.
    fn cluster_key(&self, event: &Event, existing: &IndexMap<ClusterKey, PlaceCluster>) -> ClusterKey {
        let disambiguator = match event.coordinates {
            Some(c) => c.to_string(),
            None => format!("row-{}", event.row),
        };
        let key = ClusterKey::new(event.normalized_title.clone(), disambiguator);
        if existing.contains_key(&key) {
            // Same title and location but the policy refused the merge.
            return ClusterKey::new(event.normalized_title.clone(), format!("{}#row-{}", key.disambiguator, event.row));
        }
        key
    }
}

impl Default for ConflationEngine {
    fn default() -> Self {
        Self::from_config(&ConflateConfig::default())
    }
}

/// Conflate with title-and-proximity matching and no diagnostics.
pub fn conflate(events: &[Event], threshold_km: f64) -> Vec<PlaceCluster> {
    ConflationEngine::new(threshold_km).conflate(events, &NullSink)
}
