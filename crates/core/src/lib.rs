//! # ldsmith Core
//!
//! Domain types and error definitions for the ldsmith structured-metadata
//! engine. This crate defines the shapes the other crates implement against:
//! the JSON-LD [`Document`], the output [`Mode`] capability table, the error
//! taxonomy, and the [`Sanitizer`] seam for input cleaning.
//!
//! ## Design Philosophy
//!
//! Everything here is synchronous, in-memory data. The engine crates
//! (profiles, validate, builder) depend inward on core and never on each
//! other's internals. Input sanitation is a trait so the default
//! implementation can be swapped without touching the builder.

pub mod document;
pub mod error;
pub mod mode;
pub mod sanitize;

// Re-export key types at crate root for ergonomics
pub use document::{CONTEXT_KEY, Document, SCHEMA_ORG_CONTEXT, TYPE_KEY};
pub use error::{Error, Result};
pub use mode::{Mode, ModeCapabilities};
pub use sanitize::{BasicSanitizer, NumberBounds, Sanitizer};
