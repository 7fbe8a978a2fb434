//! CLI command for scoring a document file against a profile.

use ldsmith_core::Document;
use ldsmith_profiles::ProfileRegistry;
use std::path::Path;

/// Validate the JSON document at `file` against `profile_type` and print
/// the report. Exits non-zero when the document is invalid.
pub fn run(file: &Path, profile_type: &str) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ProfileRegistry::builtin()?;
    let profile = registry.lookup(profile_type)?;

    let raw = std::fs::read_to_string(file)?;
    let document: Document = serde_json::from_str(&raw)?;

    let report = ldsmith_validate::validate(&document, &profile);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.valid {
        std::process::exit(1);
    }
    Ok(())
}
