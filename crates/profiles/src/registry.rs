//! The profile registry.
//!
//! Loaded once from declarative records and never mutated afterwards, so it
//! can be shared across threads without locking. Lookup failures are
//! configuration errors, not runtime conditions.

use crate::model::ProfileDefinition;
use ldsmith_core::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// The builtin catalog, embedded at compile time.
const BUILTIN_CATALOG: [&str; 9] = [
    include_str!("catalog/article.toml"),
    include_str!("catalog/event.toml"),
    include_str!("catalog/job_posting.toml"),
    include_str!("catalog/recipe.toml"),
    include_str!("catalog/product.toml"),
    include_str!("catalog/course.toml"),
    include_str!("catalog/faq_page.toml"),
    include_str!("catalog/local_business.toml"),
    include_str!("catalog/software_application.toml"),
];

/// Read-only catalog of profile definitions, keyed by normalized type name.
///
/// `Article`, `article`, and even `job-posting` vs `JobPosting` all resolve
/// to the same entry: lookup strips `-`/`_` and ignores case.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<String, Arc<ProfileDefinition>>,
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl ProfileRegistry {
    /// Build the registry from the embedded catalog.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::default();
        for record in BUILTIN_CATALOG {
            registry.add(ProfileDefinition::from_toml(record)?)?;
        }
        info!(profiles = registry.len(), "loaded builtin profile catalog");
        Ok(registry)
    }

    /// Build a registry from already-parsed definitions.
    pub fn from_definitions(defs: Vec<ProfileDefinition>) -> Result<Self> {
        let mut registry = Self::default();
        for def in defs {
            registry.add(def)?;
        }
        Ok(registry)
    }

    /// Register one definition, validating it first.
    pub fn add(&mut self, def: ProfileDefinition) -> Result<()> {
        def.validate()?;
        let key = normalize(&def.type_name);
        debug!(profile = %def.type_name, category = %def.category, "registered profile");
        if self.profiles.insert(key, Arc::new(def)).is_some() {
            // Re-registration replaces; callers building custom catalogs
            // rely on last-one-wins.
            debug!("replaced existing profile definition");
        }
        Ok(())
    }

    /// Resolve a profile by type name.
    pub fn lookup(&self, type_name: &str) -> Result<Arc<ProfileDefinition>> {
        self.profiles
            .get(&normalize(type_name))
            .cloned()
            .ok_or_else(|| Error::UnknownProfileType(type_name.to_string()))
    }

    /// Iterate all registered profiles (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProfileDefinition>> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
