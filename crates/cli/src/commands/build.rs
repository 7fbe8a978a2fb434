//! CLI command for assembling a document from a JSON field map.

use ldsmith_builder::{DocumentBuilder, FinalizeOptions};
use ldsmith_core::{CONTEXT_KEY, Mode, TYPE_KEY};
use ldsmith_profiles::ProfileRegistry;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Build the field map in `file` as `profile_type` under `mode` and print
/// the finalized output.
pub fn run(
    file: &Path,
    profile_type: &str,
    mode: &str,
    sanitize: bool,
    no_validate: bool,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode: Mode = mode.parse()?;
    let registry = ProfileRegistry::builtin()?;

    let raw = std::fs::read_to_string(file)?;
    let fields: Value = serde_json::from_str(&raw)?;
    let Value::Object(fields) = fields else {
        return Err("input file must contain a JSON object of field values".into());
    };

    let mut builder = DocumentBuilder::new(&registry, profile_type, mode, sanitize)?;
    for (name, value) in fields {
        // The builder owns the reserved keys.
        if name == CONTEXT_KEY || name == TYPE_KEY {
            continue;
        }
        builder = builder.set(&name, value);
    }

    let finalized = builder.finalize(FinalizeOptions {
        validate: !no_validate,
        throw_on_error: !lenient,
    })?;

    println!("{}", serde_json::to_string_pretty(&finalized.output)?);

    for warning in &finalized.warnings {
        warn!(field = %warning.field, importance = ?warning.importance, "{}", warning.reason);
    }
    if let Some(hints) = finalized.link_hints {
        eprintln!("HTML: {}", hints.html_link);
        eprintln!("Link: {}", hints.http_header);
    }
    Ok(())
}
