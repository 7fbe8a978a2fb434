//! The validation report shape.

use serde::{Deserialize, Serialize};

/// How much a warned-about field matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    /// Search-engine-critical: the field appears in the profile's rich
    /// results list, or is a required field with a bad value.
    Important,
    /// Nice to have.
    Helpful,
}

/// A missing required field (error) or an absent optional field (suggestion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub reason: String,
}

/// A missing recommended field or a present field with the wrong shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWarning {
    pub field: String,
    pub reason: String,
    pub importance: Importance,
}

/// Completion percentages, floored to whole numbers so a score of 100
/// always means fully complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub overall: u8,
    pub required: u8,
    pub recommended: u8,
}

/// The outcome of one validation pass. Derived, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff every required field is present.
    pub valid: bool,
    pub scores: Scores,
    /// Missing required fields.
    pub errors: Vec<FieldIssue>,
    /// Missing recommended fields and shape mismatches.
    pub warnings: Vec<FieldWarning>,
    /// Absent optional fields worth considering, capped.
    pub suggestions: Vec<FieldIssue>,
}
