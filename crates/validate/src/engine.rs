//! The scoring pass.

use crate::report::{FieldIssue, FieldWarning, Importance, Scores, ValidationResult};
use ldsmith_core::Document;
use ldsmith_profiles::{ProfileDefinition, satisfies};
use tracing::debug;

/// Cap on the optional-field suggestion list.
pub const MAX_SUGGESTIONS: usize = 5;

/// Walk `document` against `profile` and produce a full report.
///
/// Presence is what scores: a present value that fails its rule still
/// counts toward completion but earns a shape warning, because assembly is
/// permissive and strictness lives here, not in the builder.
pub fn validate(document: &Document, profile: &ProfileDefinition) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();

    let mut required_present = 0usize;
    for (field, rule) in &profile.required {
        if !document.contains(field) {
            errors.push(FieldIssue {
                field: field.clone(),
                reason: "missing required field".into(),
            });
            continue;
        }
        required_present += 1;
        if let Some(value) = document.get(field) {
            if !satisfies(value, rule) {
                warnings.push(FieldWarning {
                    field: field.clone(),
                    reason: "value does not match the expected shape".into(),
                    importance: Importance::Important,
                });
            }
        }
    }

    let mut recommended_present = 0usize;
    for (field, rule) in &profile.recommended {
        if !document.contains(field) {
            let critical = profile.is_rich_result_field(field);
            warnings.push(FieldWarning {
                field: field.clone(),
                reason: if critical {
                    "missing recommended field (search-engine rich results)".into()
                } else {
                    "missing recommended field".into()
                },
                importance: if critical {
                    Importance::Important
                } else {
                    Importance::Helpful
                },
            });
            continue;
        }
        recommended_present += 1;
        if let Some(value) = document.get(field) {
            if !satisfies(value, rule) {
                warnings.push(FieldWarning {
                    field: field.clone(),
                    reason: "value does not match the expected shape".into(),
                    importance: if profile.is_rich_result_field(field) {
                        Importance::Important
                    } else {
                        Importance::Helpful
                    },
                });
            }
        }
    }

    for (field, rule) in &profile.optional {
        if !document.contains(field) {
            if suggestions.len() < MAX_SUGGESTIONS {
                suggestions.push(FieldIssue {
                    field: field.clone(),
                    reason: "optional field available for this profile".into(),
                });
            }
            continue;
        }
        if let Some(value) = document.get(field) {
            if !satisfies(value, rule) {
                warnings.push(FieldWarning {
                    field: field.clone(),
                    reason: "value does not match the expected shape".into(),
                    importance: Importance::Helpful,
                });
            }
        }
    }

    let required_total = profile.required.len();
    let recommended_total = profile.recommended.len();
    let scores = Scores {
        required: percentage(required_present, required_total),
        recommended: percentage(recommended_present, recommended_total),
        overall: percentage(
            required_present + recommended_present,
            required_total + recommended_total,
        ),
    };

    let valid = required_present == required_total;
    debug!(
        profile = %profile.type_name,
        valid,
        required = scores.required,
        recommended = scores.recommended,
        overall = scores.overall,
        "validated document"
    );

    ValidationResult { valid, scores, errors, warnings, suggestions }
}

/// Floored integer percentage; an empty denominator counts as complete.
fn percentage(present: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((present * 100) / total) as u8
}
