//! Document assembly.
//!
//! A [`DocumentBuilder`] accumulates field values permissively ("collect
//! first, validate on demand") and finalizes them under an output mode.
//! Finalize itself is a pure transform from (field map, mode) to output, so
//! rebuilding under a different mode can never carry stale decoration.

mod builder;
mod output;

pub use builder::{DocumentBuilder, FinalizeOptions, Finalized};
pub use output::{
    ALIAS_KEY, DECORATION_KEYS, FinalizedDocument, IDENTIFIER_KEY, LinkHints,
    PROPERTY_VALUE_KEY, VERSION_KEY, assemble,
};
