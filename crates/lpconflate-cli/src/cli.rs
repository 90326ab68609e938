//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use lpconflate::{MatchPolicy, PlaceholderPolicy};
use std::path::PathBuf;

/// lpconflate: merge battle records into a Linked Places document
#[derive(Parser)]
#[command(name = "lpconflate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Conflate a CSV/TSV battle table into an LPF FeatureCollection
    Convert {
        /// Path to the battle table (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>.lpf.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Merge radius in kilometres
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Rendering for places without coordinates (zero-fallback, omit, reject)
        #[arg(long)]
        placeholder: Option<PlaceholderPolicy>,

        /// Which rows count as the same place (title-proximity, title-only, exact-location)
        #[arg(long)]
        match_policy: Option<MatchPolicy>,

        /// Do not append "(year)" to descriptions
        #[arg(long)]
        no_year_suffix: bool,

        /// Exit successfully even when the written document has violations
        #[arg(long)]
        allow_invalid: bool,
    },

    /// Check an LPF document for structural problems
    Validate {
        /// Path to the LPF JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Require a citation on every name entry
        #[arg(long)]
        require_citations: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List titles used by more than one feature
    Titles {
        /// Path to the LPF JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
