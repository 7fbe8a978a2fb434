//! Profile catalog — declarative field rules for structured-metadata
//! document types.
//!
//! A profile names a document type (Article, Event, JobPosting, ...) and
//! carries three field-rule maps (`required`, `recommended`, `optional`)
//! plus two importance lists: the recommended fields that matter for
//! search-engine rich results and the fields that matter most for language
//! models. Profiles are declarative data deserialized from TOML; the only
//! executable part is the rule evaluator in [`rules`].
//!
//! # Example profile record
//!
//! ```toml
//! type = "Article"
//! category = "content"
//! schema_type = "https://schema.org/Article"
//! profile_url = "https://ldsmith.dev/profiles/content/article/v1"
//! description = "News articles, blog posts, and editorial content."
//!
//! google_rich_results = ["image", "dateModified", "publisher"]
//! llm_optimized = ["headline", "description", "articleBody"]
//!
//! [required.headline]
//! type = "string"
//! min_length = 1
//! max_length = 110
//!
//! [required.author]
//! any_of = [
//!     { type = "string", min_length = 1 },
//!     { type = "object", shape = "Person" },
//! ]
//! ```

mod model;
mod registry;
pub mod rules;

pub use model::{
    AnyOfRule, ConstRule, FieldRule, FieldTier, ProfileDefinition, ShapeRule, ValueFamily,
    ValueFormat,
};
pub use registry::ProfileRegistry;
pub use rules::satisfies;

/// Version tag stamped into decoration keys and profile metadata.
pub const PROFILE_VERSION: &str = "v1";
