//! Titles command - list titles shared by several features.

use std::path::PathBuf;

use colored::Colorize;
use lpconflate::{load_document, title_counts};

pub fn run(file: PathBuf, json_output: bool, _verbose: bool) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let document = load_document(&file)?;
    let counts = title_counts(&document);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(true);
    }

    if counts.is_empty() {
        println!("{}", "Every title is unique".green());
        return Ok(true);
    }

    println!(
        "{} titles appear more than once",
        counts.len().to_string().yellow().bold()
    );
    println!();
    for (title, count) in &counts {
        println!("  {:>4}  {}", count.to_string().white().bold(), title);
    }

    Ok(true)
}
