//! Run configuration.
//!
//! Every tunable of a run lives in [`ConflateConfig`]. Values come from
//! `Default`, optionally a TOML file, then CLI overrides.
//!
//! ```toml
//! proximity_threshold_km = 1.0
//! coordinate_placeholder_policy = "zero-fallback"
//! citation_required_on_names = false
//! match_policy = "title-proximity"
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConflateError, Result};

/// Default context of a Linked Places document.
pub const LPF_CONTEXT: &str = "https://linkedpasts.org/assets/linkedplaces-context-v1.jsonld";

/// Default matching radius.
///
/// Source rows for one battlefield are typically a few hundred metres to a mile
/// apart; 1 km merges those while keeping neighbouring engagements apart.
pub const DEFAULT_PROXIMITY_KM: f64 = 1.0;

/// How a cluster with no valid coordinates is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderPolicy {
    /// Render `[0.0, 0.0]`. Loses precision but keeps every feature.
    #[default]
    ZeroFallback,
    /// Render the geometry without a `coordinates` member.
    Omit,
    /// Drop the feature and report the cluster as rejected.
    Reject,
}

/// Which rows are considered the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Same normalized title and within the proximity threshold.
    #[default]
    TitleProximity,
    /// Same normalized title, wherever it is.
    TitleOnly,
    /// Identical coordinates, whatever the title.
    ExactLocation,
}

impl FromStr for PlaceholderPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "zero-fallback" | "zero" => Ok(PlaceholderPolicy::ZeroFallback),
            "omit" => Ok(PlaceholderPolicy::Omit),
            "reject" => Ok(PlaceholderPolicy::Reject),
            _ => Err(format!(
                "Unknown placeholder policy: {}. Use zero-fallback, omit, or reject.",
                s
            )),
        }
    }
}

impl fmt::Display for PlaceholderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderPolicy::ZeroFallback => write!(f, "zero-fallback"),
            PlaceholderPolicy::Omit => write!(f, "omit"),
            PlaceholderPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "title-proximity" | "proximity" => Ok(MatchPolicy::TitleProximity),
            "title-only" | "title" => Ok(MatchPolicy::TitleOnly),
            "exact-location" | "location" => Ok(MatchPolicy::ExactLocation),
            _ => Err(format!(
                "Unknown match policy: {}. Use title-proximity, title-only, or exact-location.",
                s
            )),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::TitleProximity => write!(f, "title-proximity"),
            MatchPolicy::TitleOnly => write!(f, "title-only"),
            MatchPolicy::ExactLocation => write!(f, "exact-location"),
        }
    }
}

/// Configuration for one conflation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConflateConfig {
    /// Maximum great-circle distance (km) for two rows to be the same place.
    pub proximity_threshold_km: f64,
    /// Rendering of clusters without coordinates.
    pub coordinate_placeholder_policy: PlaceholderPolicy,
    /// Require a `citations` member on every name entry during validation.
    pub citation_required_on_names: bool,
    /// Suffix each description with its originating year, `"text (1842)"`.
    pub annotate_descriptions_with_year: bool,
    /// Matching strategy.
    pub match_policy: MatchPolicy,
    /// `@context` written to the document root.
    pub context_uri: String,
    /// Label attached to each feature's type entry.
    pub type_label: String,
}

impl Default for ConflateConfig {
    fn default() -> Self {
        Self {
            proximity_threshold_km: DEFAULT_PROXIMITY_KM,
            coordinate_placeholder_policy: PlaceholderPolicy::default(),
            citation_required_on_names: false,
            annotate_descriptions_with_year: true,
            match_policy: MatchPolicy::default(),
            context_uri: LPF_CONTEXT.to_string(),
            type_label: "battlefield".to_string(),
        }
    }
}

impl ConflateConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ConflateConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConflateError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !self.proximity_threshold_km.is_finite() || self.proximity_threshold_km < 0.0 {
            return Err(ConflateError::Config(format!(
                "proximity_threshold_km must be a non-negative number, got {}",
                self.proximity_threshold_km
            )));
        }
        if self.context_uri.trim().is_empty() {
            return Err(ConflateError::Config("context_uri must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn with_threshold(mut self, km: f64) -> Self {
        self.proximity_threshold_km = km;
        self
    }

    pub fn with_placeholder(mut self, policy: PlaceholderPolicy) -> Self {
        self.coordinate_placeholder_policy = policy;
        self
    }

    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    pub fn with_citations_required(mut self, required: bool) -> Self {
        self.citation_required_on_names = required;
        self
    }

    pub fn with_year_annotations(mut self, annotate: bool) -> Self {
        self.annotate_descriptions_with_year = annotate;
        self
    }
}
