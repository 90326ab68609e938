//! Place clusters and their per-field merge rules.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::ingest::Event;

/// Identity of a cluster inside one run: the matching title plus something
/// that tells same-titled clusters apart (their first location, or the input
/// row when there was none).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterKey {
    pub title: String,
    pub disambiguator: String,
}

impl ClusterKey {
    pub fn new(title: impl Into<String>, disambiguator: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            disambiguator: disambiguator.into(),
        }
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.title, self.disambiguator)
    }
}

/// One canonical place being assembled from matching events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCluster {
    pub key: ClusterKey,
    /// Source id of the first event.
    pub id: String,
    /// Raw title of the first event.
    pub canonical_title: String,
    pub country_code: String,
    pub type_identifier: String,
    /// First valid coordinate seen; never replaced once set.
    pub coordinates: Option<Coordinate>,
    /// Distinct years, sorted once the cluster is finalized.
    pub timespans: Vec<String>,
    /// Distinct descriptions in arrival order.
    pub descriptions: Vec<String>,
    /// Distinct raw titles in arrival order.
    pub toponyms: Vec<String>,
    /// Geographically distinct contributing events.
    pub event_count: usize,
    /// Input rows merged into this cluster.
    pub source_rows: Vec<usize>,
    /// Every distinct coordinate absorbed so far.
    #[serde(skip)]
    absorbed: Vec<Coordinate>,
}

impl PlaceCluster {
    /// Start a cluster from its first event.
    pub fn open(key: ClusterKey, event: &Event, annotate_years: bool) -> Self {
        let mut cluster = Self {
            key,
            id: event.source_id.clone(),
            canonical_title: event.raw_title.clone(),
            country_code: String::new(),
            type_identifier: String::new(),
            coordinates: None,
            timespans: Vec::new(),
            descriptions: Vec::new(),
            toponyms: Vec::new(),
            event_count: 0,
            source_rows: Vec::new(),
            absorbed: Vec::new(),
        };
        cluster.absorb(event, annotate_years);
        cluster
    }

    /// Merge one event.
    ///
    /// Scalars are first-non-empty-wins, coordinates first-valid-wins, the
    /// list fields are append-if-absent. An event without coordinates always
    /// counts and always contributes its description: there is no location to
    /// tell it apart from a duplicate row.
    pub fn absorb(&mut self, event: &Event, annotate_years: bool) {
        self.source_rows.push(event.row);

        fill_if_empty(&mut self.country_code, &event.country_code);
        fill_if_empty(&mut self.type_identifier, &event.type_identifier);
        if self.coordinates.is_none() {
            self.coordinates = event.coordinates;
        }

        for year in event.years() {
            push_unique(&mut self.timespans, year);
        }

        if !event.raw_title.is_empty() {
            push_unique(&mut self.toponyms, &event.raw_title);
        }

        let description = format_description(event, annotate_years);

        match event.coordinates {
            None => {
                self.event_count += 1;
                if let Some(text) = description {
                    self.descriptions.push(text);
                }
            }
            Some(coord) => {
                if !self.absorbed.contains(&coord) {
                    self.absorbed.push(coord);
                    self.event_count += 1;
                }
                if let Some(text) = description {
                    push_unique(&mut self.descriptions, &text);
                }
            }
        }
    }

    /// Put the cluster in its read-only shape: years in chronological order.
    pub fn finalize(&mut self) {
        self.timespans.sort_by(|a, b| compare_years(a, b));
    }
}

fn fill_if_empty(slot: &mut String, value: &str) {
    if slot.is_empty() && !value.is_empty() {
        *slot = value.to_string();
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

fn format_description(event: &Event, annotate_years: bool) -> Option<String> {
    if event.description.is_empty() {
        return None;
    }
    let year = event.year.trim();
    if annotate_years && !year.is_empty() {
        Some(format!("{} ({})", event.description, year))
    } else {
        Some(event.description.clone())
    }
}

/// Leading signed integer of a year string: "1842" → 1842, "1642-1646" →
/// 1642, "-44" → -44, "c. 1200" → None.
fn leading_year(value: &str) -> Option<i64> {
    let value = value.trim();
    let digits_start = usize::from(value.starts_with('-'));
    let end = value[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value.len(), |i| i + digits_start);
    if end == digits_start {
        return None;
    }
    value[..end].parse().ok()
}

/// Numeric years ascending; text that does not start with a year sorts after
/// them, keeping its arrival order.
fn compare_years(a: &str, b: &str) -> Ordering {
    match (leading_year(a), leading_year(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
