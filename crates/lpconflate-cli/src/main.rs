//! lpconflate CLI - battle records to Linked Places.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info, or debug with --verbose.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert {
            file,
            output,
            config,
            threshold,
            placeholder,
            match_policy,
            no_year_suffix,
            allow_invalid,
        } => commands::convert::run(
            commands::convert::ConvertArgs {
                file,
                output,
                config,
                threshold,
                placeholder,
                match_policy,
                no_year_suffix,
                allow_invalid,
            },
            cli.verbose,
        ),

        Commands::Validate {
            file,
            require_citations,
            json,
        } => commands::validate::run(file, require_citations, json, cli.verbose),

        Commands::Titles { file, json } => commands::titles::run(file, json, cli.verbose),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
