//! Conflation: grouping events that describe the same place.
//!
//! Events are matched on normalized title and great-circle proximity (or an
//! alternative [`MatchPolicy`](crate::MatchPolicy)), then merged field by
//! field into a [`PlaceCluster`].

mod cluster;
mod engine;

pub use cluster::{ClusterKey, PlaceCluster};
pub use engine::{ConflationEngine, conflate};
