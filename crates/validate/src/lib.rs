//! Validation and scoring engine.
//!
//! Walks a document against its profile definition, buckets missing fields
//! by importance, and computes completion scores. Pure: every call derives
//! the result from the current document contents alone, so adding a missing
//! field can never make a later score worse.

mod engine;
mod report;

pub use engine::{MAX_SUGGESTIONS, validate};
pub use report::{FieldIssue, FieldWarning, Importance, Scores, ValidationResult};
