//! Validate command - check an LPF document for structural problems.

use std::collections::BTreeMap;
use std::path::PathBuf;

use colored::Colorize;
use lpconflate::{ConflateConfig, SchemaValidator, ValidatorConfig, load_document};

pub fn run(
    file: PathBuf,
    require_citations: bool,
    json_output: bool,
    verbose: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let document = load_document(&file)?;
    let config = ConflateConfig::default().with_citations_required(require_citations);
    let validator = SchemaValidator::new(ValidatorConfig::from(&config));
    let violations = validator.validate(&document);

    let feature_count = document
        .get("features")
        .and_then(|f| f.as_array())
        .map(|f| f.len())
        .unwrap_or(0);

    if json_output {
        let status = serde_json::json!({
            "file": file.display().to_string(),
            "features": feature_count,
            "valid": violations.is_empty(),
            "violations": violations,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(violations.is_empty());
    }

    println!(
        "{} {} ({} features)",
        "Validating".cyan().bold(),
        file.display().to_string().white(),
        feature_count
    );
    println!();

    if violations.is_empty() {
        println!("{}", "No violations - document is structurally valid".green());
        return Ok(true);
    }

    let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for violation in &violations {
        *by_kind.entry(violation.kind.label()).or_default() += 1;
    }

    println!(
        "Found {} violations",
        violations.len().to_string().red().bold()
    );
    for (label, count) in &by_kind {
        println!("  {:24} {}", label, count.to_string().white().bold());
    }

    println!();
    for violation in &violations {
        match (&violation.value, verbose) {
            (Some(value), true) => println!("  {} (value: {})", violation, value.to_string().dimmed()),
            _ => println!("  {}", violation),
        }
    }

    Ok(false)
}
