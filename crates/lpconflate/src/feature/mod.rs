//! Linked Places output: document types, rendering, persistence.

mod builder;
mod document;
mod persistence;

pub use builder::{BuildReport, FeatureBuilder};
pub use document::{
    Citation, DescriptionEntry, Feature, FeatureCollection, Geometry, Name, Properties, TimePoint, Timespan,
    TypeEntry, When,
};
pub use persistence::load_document;
