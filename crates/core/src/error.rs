//! Error types for the ldsmith domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Registry and mode
//! failures are configuration-level: they mean the caller named something
//! that does not exist, and retrying cannot fix that.

use thiserror::Error;

/// The top-level error type for all ldsmith operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A profile type name that no loaded catalog knows about.
    #[error("unknown profile type: {0}")]
    UnknownProfileType(String),

    /// An output mode name outside the fixed mode set.
    #[error("unknown output mode: {0} (expected strict-seo, split-channels, or standards-header)")]
    UnknownMode(String),

    /// A profile record that failed catalog-load validation.
    #[error("invalid profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    /// A profile catalog that could not be parsed at all.
    #[error("profile catalog error: {0}")]
    Catalog(String),

    /// Raised by finalize when validation is requested, required fields are
    /// missing, and the caller asked for a hard failure.
    #[error("document for profile '{profile}' is missing required fields: {}", fields.join(", "))]
    MissingRequiredFields { profile: String, fields: Vec<String> },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
