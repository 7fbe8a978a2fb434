//! ldsmith CLI — the main entry point.
//!
//! Commands:
//! - `profiles` — List the profile catalog or show one profile
//! - `validate` — Score a JSON document against a profile
//! - `build`    — Assemble a document from a JSON field map

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "ldsmith",
    about = "ldsmith — structured-metadata profiles for search engines and LLMs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the profile catalog, or show one profile in full
    Profiles {
        /// Show a single profile's rules
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,
    },

    /// Validate a JSON document against a profile
    Validate {
        /// Path to the JSON document
        file: PathBuf,

        /// Profile type to validate against
        #[arg(short, long)]
        profile: String,
    },

    /// Build a finalized document from a JSON field map
    Build {
        /// Path to a JSON object of field values
        file: PathBuf,

        /// Profile type to build
        #[arg(short, long)]
        profile: String,

        /// Output mode: strict-seo, split-channels, or standards-header
        #[arg(short, long, default_value = "strict-seo")]
        mode: String,

        /// Clean values before storing them
        #[arg(long)]
        sanitize: bool,

        /// Skip the validation gate
        #[arg(long)]
        no_validate: bool,

        /// Emit warnings instead of failing on missing required fields
        #[arg(long)]
        lenient: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Profiles { type_name } => commands::profiles::run(type_name)?,
        Commands::Validate { file, profile } => commands::validate::run(&file, &profile)?,
        Commands::Build { file, profile, mode, sanitize, no_validate, lenient } => {
            commands::build::run(&file, &profile, &mode, sanitize, no_validate, lenient)?
        }
    }

    Ok(())
}
