//! Convert command - conflate a battle table into an LPF document.

use std::path::PathBuf;

use colored::Colorize;
use lpconflate::{ConflateConfig, MatchPolicy, Pipeline, PlaceholderPolicy};

pub struct ConvertArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub threshold: Option<f64>,
    pub placeholder: Option<PlaceholderPolicy>,
    pub match_policy: Option<MatchPolicy>,
    pub no_year_suffix: bool,
    pub allow_invalid: bool,
}

/// Start from the config file (or defaults) and apply flag overrides.
fn resolve_config(args: &ConvertArgs) -> Result<ConflateConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ConflateConfig::load(path)?,
        None => ConflateConfig::default(),
    };

    if let Some(km) = args.threshold {
        config = config.with_threshold(km);
    }
    if let Some(policy) = args.placeholder {
        config = config.with_placeholder(policy);
    }
    if let Some(policy) = args.match_policy {
        config = config.with_match_policy(policy);
    }
    if args.no_year_suffix {
        config = config.with_year_annotations(false);
    }

    config.validate()?;
    Ok(config)
}

pub fn run(args: ConvertArgs, verbose: bool) -> Result<bool, Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let pipeline = Pipeline::new(resolve_config(&args)?);
    let config = pipeline.config();
    tracing::debug!(?config, "resolved configuration");

    println!(
        "{} {}",
        "Conflating".cyan().bold(),
        args.file.display().to_string().white()
    );

    if verbose {
        println!();
        println!("{}", "Settings:".yellow().bold());
        println!("  {:22} {} km", "proximity threshold", config.proximity_threshold_km);
        println!("  {:22} {}", "match policy", config.match_policy);
        println!("  {:22} {}", "placeholder policy", config.coordinate_placeholder_policy);
        println!("  {:22} {}", "year suffix", config.annotate_descriptions_with_year);
        println!();
    }

    let result = pipeline.convert_file(&args.file)?;
    let summary = &result.summary;

    println!(
        "Read {} rows into {} places ({} merged)",
        summary.rows_read.to_string().white().bold(),
        summary.clusters.to_string().white().bold(),
        summary.rows_conflated().to_string().cyan()
    );
    if summary.malformed_coordinates > 0 || summary.missing_titles > 0 {
        println!(
            "Skipped {} malformed coordinate pairs, {} rows without a title",
            summary.malformed_coordinates.to_string().yellow(),
            summary.missing_titles.to_string().yellow()
        );
    }
    if summary.rejected_clusters > 0 {
        println!(
            "Rejected {} places without coordinates",
            summary.rejected_clusters.to_string().red()
        );
        if verbose {
            for key in &result.rejected {
                println!("  {}", key.to_string().dimmed());
            }
        }
    }

    let output_path = args.output.clone().unwrap_or_else(|| {
        let mut p = args.file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.lpf.json", stem));
        p
    });

    result.collection.save(&output_path)?;

    println!();
    println!(
        "{} {} features to {}",
        "Wrote".green().bold(),
        summary.features_written,
        output_path.display().to_string().white()
    );

    if result.is_valid() {
        println!("{}", "Document is structurally valid".green());
        return Ok(true);
    }

    println!();
    println!(
        "{} {} violations",
        "Found".red().bold(),
        result.violations.len().to_string().white().bold()
    );
    for violation in &result.violations {
        println!("  {} {}", violation.kind.label().red(), violation);
    }

    Ok(args.allow_invalid)
}
