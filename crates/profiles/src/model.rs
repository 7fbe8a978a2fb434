//! Profile data model — the types that define per-document-type field rules.

use ldsmith_core::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A declarative constraint on one field's acceptable value shape.
///
/// Rules are data, never code: the evaluator in [`crate::rules`] is the
/// only place they are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRule {
    /// The value must equal a fixed constant.
    Const(ConstRule),
    /// The value must satisfy at least one alternative, tried in order.
    AnyOf(AnyOfRule),
    /// The value must belong to a primitive family and meet its constraints.
    Shape(ShapeRule),
}

/// Exact-equality rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstRule {
    #[serde(rename = "const")]
    pub value: Value,
}

/// Ordered shape alternatives. Alternatives are expected to be mutually
/// distinguishable (string vs object), so first-success is unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyOfRule {
    pub any_of: Vec<FieldRule>,
}

/// Primitive-family rule with optional constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeRule {
    #[serde(rename = "type")]
    pub family: ValueFamily,

    /// Minimum length — characters for strings, items for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum length — characters for strings, items for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Numeric lower bound (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Numeric upper bound (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// String format predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,

    /// Declared nested shape name for object values (e.g. "Organization").
    /// Checked shallowly: the value must be an object, and when it carries
    /// an `@type` it must agree. Nested required fields are never validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl ShapeRule {
    /// A bare family gate with no constraints.
    pub fn of(family: ValueFamily) -> Self {
        Self {
            family,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            format: None,
            shape: None,
        }
    }
}

/// The JSON primitive families a shape rule can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFamily {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// String format predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueFormat {
    /// `YYYY-MM-DD`.
    Date,
    /// RFC 3339 date-time.
    DateTime,
    /// Parseable absolute URI.
    Uri,
}

/// Which rule map a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTier {
    Required,
    Recommended,
    Optional,
}

/// One document type's rules and importance lists.
///
/// Immutable after catalog load; shared read-only by every builder of the
/// type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDefinition {
    /// Canonical Schema.org type name, e.g. `Article`.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Catalog category (content, business, interaction, technology).
    pub category: String,

    /// Canonical vocabulary URI, e.g. `https://schema.org/Article`.
    pub schema_type: String,

    /// Where this profile's definition is published.
    pub profile_url: String,

    /// Human description of what the profile covers.
    #[serde(default)]
    pub description: String,

    /// Fields a document must carry to be valid.
    #[serde(default)]
    pub required: BTreeMap<String, FieldRule>,

    /// Fields that improve the document when present.
    #[serde(default)]
    pub recommended: BTreeMap<String, FieldRule>,

    /// Fields that are purely optional.
    #[serde(default)]
    pub optional: BTreeMap<String, FieldRule>,

    /// Recommended fields that matter for search-engine rich results.
    #[serde(default)]
    pub google_rich_results: Vec<String>,

    /// Fields that matter most for language-model consumption.
    #[serde(default)]
    pub llm_optimized: Vec<String>,
}

impl ProfileDefinition {
    /// Parse a single profile record from TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self, Error> {
        let def: ProfileDefinition =
            toml::from_str(toml_str).map_err(|e| Error::Catalog(e.to_string()))?;
        def.validate()?;
        Ok(def)
    }

    /// Validate that the record is well-formed.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |reason: &str| Error::InvalidProfile {
            name: if self.type_name.is_empty() {
                "(empty)".into()
            } else {
                self.type_name.clone()
            },
            reason: reason.into(),
        };

        if self.type_name.is_empty() {
            return Err(invalid("profile type name cannot be empty"));
        }
        if self.category.is_empty() {
            return Err(invalid("category cannot be empty"));
        }
        if !self.schema_type.starts_with("http") {
            return Err(invalid("schema_type must be a vocabulary URI"));
        }
        if self.profile_url.is_empty() {
            return Err(invalid("profile_url cannot be empty"));
        }
        for field in &self.google_rich_results {
            if !self.recommended.contains_key(field) {
                return Err(Error::InvalidProfile {
                    name: self.type_name.clone(),
                    reason: format!(
                        "google_rich_results entry '{field}' is not a recommended field"
                    ),
                });
            }
        }
        for field in &self.llm_optimized {
            if self.rule_for(field).is_none() {
                return Err(Error::InvalidProfile {
                    name: self.type_name.clone(),
                    reason: format!("llm_optimized entry '{field}' has no field rule"),
                });
            }
        }
        Ok(())
    }

    /// Look up the rule for a field across all three tiers.
    pub fn rule_for(&self, field: &str) -> Option<(&FieldRule, FieldTier)> {
        if let Some(rule) = self.required.get(field) {
            return Some((rule, FieldTier::Required));
        }
        if let Some(rule) = self.recommended.get(field) {
            return Some((rule, FieldTier::Recommended));
        }
        self.optional
            .get(field)
            .map(|rule| (rule, FieldTier::Optional))
    }

    /// Whether a recommended field is search-engine-critical.
    pub fn is_rich_result_field(&self, field: &str) -> bool {
        self.google_rich_results.iter().any(|f| f == field)
    }
}
