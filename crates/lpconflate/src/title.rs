//! Title normalization for matching.
//!
//! The same battle shows up as "Battle of Lewes" in one row and
//! "Battle of Lewes (UK)" in another. Normalized titles are the primary
//! matching key of the conflation engine; they are never rendered.

use once_cell::sync::Lazy;
use regex::Regex;

// Compiled once on first use.
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SHORT_QUALIFIERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\s*\([^()]{0,3}\))+\s*$").unwrap());

/// Canonicalize a raw title.
///
/// Drops trailing parentheticals of at most three characters (stacked ones
/// included), trims, and collapses interior whitespace runs to a single
/// space. Longer qualifiers such as "(1066)" or "(second)" are part of the
/// title and kept.
pub fn normalize_title(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    let stripped = SHORT_QUALIFIERS.replace(&collapsed, "");
    stripped.trim().to_string()
}
