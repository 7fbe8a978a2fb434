//! The fluent document builder.
//!
//! Setters are permissive: a value that fails its field rule is stored
//! anyway and surfaces later as a validation warning. The only operation
//! that can halt progress is `finalize` with validation enabled.

use crate::output::{FinalizedDocument, LinkHints, assemble};
use ldsmith_core::{BasicSanitizer, Document, Error, Mode, NumberBounds, Result, Sanitizer};
use ldsmith_profiles::{FieldRule, ProfileDefinition, ProfileRegistry};
use ldsmith_validate::{FieldWarning, Importance, ValidationResult, validate};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Options for [`DocumentBuilder::finalize`].
#[derive(Debug, Clone, Copy)]
pub struct FinalizeOptions {
    /// Run the validation engine before assembling (default true).
    pub validate: bool,
    /// Fail hard on missing required fields instead of downgrading them to
    /// warnings (default true).
    pub throw_on_error: bool,
}

impl Default for FinalizeOptions {
    fn default() -> Self {
        Self { validate: true, throw_on_error: true }
    }
}

/// A finalized build: the output document(s), link hints when the mode
/// exposes them, and any warnings collected by a non-fatal validation pass.
#[derive(Debug, Clone)]
pub struct Finalized {
    pub output: FinalizedDocument,
    /// Present only under `standards-header` mode.
    pub link_hints: Option<LinkHints>,
    pub warnings: Vec<FieldWarning>,
}

/// Accumulates field values for one profile type and finalizes them under
/// an output mode.
///
/// The internal document is private; `finalize` consumes the builder and
/// hands back an independent snapshot.
pub struct DocumentBuilder {
    profile: Arc<ProfileDefinition>,
    mode: Mode,
    sanitize: bool,
    sanitizer: Arc<dyn Sanitizer>,
    fields: Document,
}

impl DocumentBuilder {
    /// Start a document for the named profile type.
    ///
    /// The registry is injected rather than global; an unknown type is a
    /// configuration error.
    pub fn new(
        registry: &ProfileRegistry,
        profile_type: &str,
        mode: Mode,
        sanitize: bool,
    ) -> Result<Self> {
        let profile = registry.lookup(profile_type)?;
        let fields = Document::new(&profile.type_name);
        debug!(profile = %profile.type_name, %mode, sanitize, "builder created");
        Ok(Self {
            profile,
            mode,
            sanitize,
            sanitizer: Arc::new(BasicSanitizer),
            fields,
        })
    }

    /// Substitute the sanitizer implementation.
    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// The profile this builder targets.
    pub fn profile(&self) -> &ProfileDefinition {
        &self.profile
    }

    /// The profile's catalog category.
    pub fn category(&self) -> &str {
        &self.profile.category
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    // ── Semantic setters ───────────────────────────────────────────

    pub fn name(self, value: &str) -> Self {
        self.set_text("name", value)
    }

    pub fn headline(self, value: &str) -> Self {
        self.set_text("headline", value)
    }

    pub fn title(self, value: &str) -> Self {
        self.set_text("title", value)
    }

    pub fn description(self, value: &str) -> Self {
        self.set_text("description", value)
    }

    pub fn url(self, value: &str) -> Self {
        self.set_link("url", value)
    }

    pub fn image(self, value: &str) -> Self {
        self.set_link("image", value)
    }

    pub fn date_published(self, value: &str) -> Self {
        self.set_date("datePublished", value)
    }

    pub fn date_modified(self, value: &str) -> Self {
        self.set_date("dateModified", value)
    }

    pub fn start_date(self, value: &str) -> Self {
        self.set_date("startDate", value)
    }

    pub fn end_date(self, value: &str) -> Self {
        self.set_date("endDate", value)
    }

    /// Author: a plain name or a Person object.
    pub fn author(self, value: Value) -> Self {
        self.set_polymorphic("author", "Person", value)
    }

    /// Publisher: a plain name or an Organization object.
    pub fn publisher(self, value: Value) -> Self {
        self.set_polymorphic("publisher", "Organization", value)
    }

    /// Location: a plain name or a Place object.
    pub fn location(self, value: Value) -> Self {
        self.set_polymorphic("location", "Place", value)
    }

    pub fn keywords(self, value: Value) -> Self {
        self.set_polymorphic("keywords", "", value)
    }

    // ── Typed setters ──────────────────────────────────────────────

    /// Store a field that accepts either a plain string or a structured
    /// sub-object of the declared shape.
    pub fn set_polymorphic(self, field: &str, shape: &str, value: Value) -> Self {
        match value {
            Value::String(s) => self.set_text(field, &s),
            other => self.set_structured(field, shape, other),
        }
    }

    /// Store a free-text field.
    pub fn set_text(mut self, field: &str, value: &str) -> Self {
        let cleaned = if self.sanitize {
            self.sanitizer.sanitize_string(value)
        } else {
            value.to_string()
        };
        self.fields.set(field, Value::String(cleaned));
        self
    }

    /// Store a URL field. When sanitizing, a value the sanitizer rejects is
    /// dropped rather than stored.
    pub fn set_link(mut self, field: &str, value: &str) -> Self {
        if self.sanitize {
            match self.sanitizer.sanitize_url(value) {
                Some(cleaned) => self.fields.set(field, Value::String(cleaned)),
                None => debug!(field, "dropped unsanitizable url"),
            }
        } else {
            self.fields.set(field, Value::String(value.to_string()));
        }
        self
    }

    /// Store a date or date-time field.
    pub fn set_date(mut self, field: &str, value: &str) -> Self {
        let cleaned = if self.sanitize {
            self.sanitizer.sanitize_date(value)
        } else {
            value.to_string()
        };
        self.fields.set(field, Value::String(cleaned));
        self
    }

    /// Store a numeric field, clamped to the field rule's bounds when
    /// sanitizing. A value the sanitizer rejects is dropped.
    pub fn set_number(mut self, field: &str, value: f64) -> Self {
        let cleaned = if self.sanitize {
            let bounds = self.bounds_for(field);
            self.sanitizer.sanitize_number(value, bounds)
        } else {
            Some(value)
        };
        match cleaned.and_then(number_value) {
            Some(n) => self.fields.set(field, n),
            None => debug!(field, "dropped unsanitizable number"),
        }
        self
    }

    /// Store a structured sub-value of the named shape.
    pub fn set_structured(mut self, field: &str, shape: &str, value: Value) -> Self {
        let cleaned = if self.sanitize {
            self.sanitizer.sanitize_structured(value, shape)
        } else {
            value
        };
        self.fields.set(field, cleaned);
        self
    }

    /// Generic escape hatch: store a value verbatim under any field name.
    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.fields.set(field, value);
        self
    }

    /// Append one item to a list-valued field, creating the list on first
    /// use.
    pub fn add_item(mut self, field: &str, item: Value) -> Self {
        let cleaned = if self.sanitize {
            self.sanitizer.sanitize_structured(item, "")
        } else {
            item
        };
        self.fields.push_item(field, cleaned);
        self
    }

    // ── Validation & finalize ──────────────────────────────────────

    /// Run the scoring engine against the current field set.
    pub fn validate(&self) -> ValidationResult {
        validate(&self.fields, &self.profile)
    }

    /// Finalize under the builder's own mode.
    pub fn finalize(self, options: FinalizeOptions) -> Result<Finalized> {
        let mode = self.mode;
        self.finalize_as(mode, options)
    }

    /// Finalize under a different mode. The transform strips decoration
    /// first, so nothing from the builder's original mode leaks through.
    pub fn finalize_as(self, mode: Mode, options: FinalizeOptions) -> Result<Finalized> {
        let mut warnings = Vec::new();
        if options.validate {
            let report = self.validate();
            if !report.valid && options.throw_on_error {
                return Err(Error::MissingRequiredFields {
                    profile: self.profile.type_name.clone(),
                    fields: report.errors.into_iter().map(|e| e.field).collect(),
                });
            }
            if !report.valid {
                warn!(
                    profile = %self.profile.type_name,
                    missing = report.errors.len(),
                    "finalizing an incomplete document"
                );
            }
            warnings = report.warnings;
            // Downgraded errors join the warning collection.
            warnings.extend(report.errors.into_iter().map(|e| FieldWarning {
                field: e.field,
                reason: e.reason,
                importance: Importance::Important,
            }));
        }

        let link_hints = mode
            .capabilities()
            .exposes_link_hints
            .then(|| LinkHints::for_profile(&self.profile));

        let output = assemble(self.fields, &self.profile, mode);
        Ok(Finalized { output, link_hints, warnings })
    }

    // ── Internal ───────────────────────────────────────────────────

    /// Numeric bounds declared by the field's rule, if any.
    fn bounds_for(&self, field: &str) -> NumberBounds {
        let Some((rule, _)) = self.profile.rule_for(field) else {
            return NumberBounds::default();
        };
        match rule {
            FieldRule::Shape(shape) => NumberBounds { min: shape.min, max: shape.max },
            _ => NumberBounds::default(),
        }
    }
}

/// Whole numbers in i64 range are stored integer-tagged so they satisfy
/// integer-family field rules; everything else stays a float.
fn number_value(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        return Some(Value::from(n as i64));
    }
    serde_json::Number::from_f64(n).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ProfileRegistry {
        ProfileRegistry::builtin().unwrap()
    }

    fn finalize_doc(finalized: Finalized) -> Document {
        match finalized.output {
            FinalizedDocument::Single(doc) => doc,
            FinalizedDocument::Split { .. } => panic!("expected single document"),
        }
    }

    #[test]
    fn chained_build_produces_a_valid_article() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "article", Mode::StrictSeo, false)
            .unwrap()
            .headline("Breaking News")
            .author(json!("Jane Doe"))
            .date_published("2024-06-15T09:00:00Z");

        let report = builder.validate();
        assert!(report.valid);

        let doc = finalize_doc(builder.finalize(FinalizeOptions::default()).unwrap());
        assert_eq!(doc.get("headline"), Some(&json!("Breaking News")));
        assert_eq!(doc.schema_type(), Some("Article"));
    }

    #[test]
    fn later_setter_calls_overwrite() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "event", Mode::StandardsHeader, false)
            .unwrap()
            .name("First")
            .name("Second");
        let report = builder.validate();
        assert!(!report.valid); // startDate/location still missing
        let doc = finalize_doc(
            builder
                .finalize(FinalizeOptions { validate: false, throw_on_error: false })
                .unwrap(),
        );
        assert_eq!(doc.get("name"), Some(&json!("Second")));
    }

    #[test]
    fn finalize_gates_on_required_fields() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "article", Mode::StrictSeo, false)
            .unwrap()
            .headline("Breaking News");

        let err = builder.finalize(FinalizeOptions::default()).unwrap_err();
        let Error::MissingRequiredFields { profile, fields } = err else {
            panic!("expected MissingRequiredFields");
        };
        assert_eq!(profile, "Article");
        assert_eq!(fields, vec!["author", "datePublished"]);
    }

    #[test]
    fn throw_on_error_false_downgrades_to_warnings() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "article", Mode::StrictSeo, false)
            .unwrap()
            .headline("Breaking News");

        let finalized = builder
            .finalize(FinalizeOptions { validate: true, throw_on_error: false })
            .unwrap();
        let downgraded: Vec<&str> = finalized
            .warnings
            .iter()
            .filter(|w| w.reason.contains("required"))
            .map(|w| w.field.as_str())
            .collect();
        assert_eq!(downgraded, vec!["author", "datePublished"]);
    }

    #[test]
    fn sanitize_cleans_text_and_urls() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "article", Mode::StrictSeo, true)
            .unwrap()
            .headline("  Breaking News\u{0000}  ")
            .url("javascript:alert(1)")
            .image("https://example.com/photo.jpg");

        let doc = finalize_doc(
            builder
                .finalize(FinalizeOptions { validate: false, throw_on_error: false })
                .unwrap(),
        );
        assert_eq!(doc.get("headline"), Some(&json!("Breaking News")));
        assert!(!doc.contains("url")); // rejected by the sanitizer
        assert_eq!(doc.get("image"), Some(&json!("https://example.com/photo.jpg")));
    }

    #[test]
    fn sanitize_structured_fills_declared_shape() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "article", Mode::StrictSeo, true)
            .unwrap()
            .author(json!({"name": "  Jane Doe "}));
        let report = builder.validate();
        // The cleaned object now carries @type Person and satisfies the rule.
        assert!(!report.warnings.iter().any(|w| w.field == "author"));
    }

    #[test]
    fn set_number_clamps_to_rule_bounds() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "event", Mode::StrictSeo, true)
            .unwrap()
            .set_number("maximumAttendeeCapacity", -5.0);
        // Rule says min = 1; the sanitizer clamps up to it.
        let doc = finalize_doc(
            builder
                .finalize(FinalizeOptions { validate: false, throw_on_error: false })
                .unwrap(),
        );
        assert_eq!(doc.get("maximumAttendeeCapacity"), Some(&json!(1)));
    }

    #[test]
    fn set_number_satisfies_integer_family_rules() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "event", Mode::StrictSeo, true)
            .unwrap()
            .name("Tech Talk")
            .start_date("2024-06-15T09:00:00Z")
            .location(json!("Hall A"))
            .set_number("maximumAttendeeCapacity", 5.0);

        let report = builder.validate();
        assert!(
            !report
                .warnings
                .iter()
                .any(|w| w.field == "maximumAttendeeCapacity"),
            "whole numbers must pass integer-family rules"
        );

        let doc = finalize_doc(builder.finalize(FinalizeOptions::default()).unwrap());
        assert_eq!(doc.get("maximumAttendeeCapacity"), Some(&json!(5)));
    }

    #[test]
    fn set_number_keeps_fractions_as_floats() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "article", Mode::StrictSeo, false)
            .unwrap()
            .set_number("wordCount", 1200.0)
            .set_number("somethingFractional", 2.5);
        let doc = finalize_doc(
            builder
                .finalize(FinalizeOptions { validate: false, throw_on_error: false })
                .unwrap(),
        );
        assert_eq!(doc.get("wordCount"), Some(&json!(1200)));
        assert_eq!(doc.get("somethingFractional"), Some(&json!(2.5)));
    }

    #[test]
    fn add_item_accumulates_lazily() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "recipe", Mode::StrictSeo, false)
            .unwrap()
            .name("Bread")
            .add_item("recipeIngredient", json!("flour"))
            .add_item("recipeIngredient", json!("water"))
            .add_item("recipeInstructions", json!("mix"))
            .add_item("recipeInstructions", json!("bake"));

        assert!(builder.validate().valid);
    }

    #[test]
    fn unknown_profile_type_fails_construction() {
        let reg = registry();
        let Err(err) = DocumentBuilder::new(&reg, "podcast", Mode::StrictSeo, false) else {
            panic!("unknown profile type must fail construction");
        };
        assert!(matches!(err, Error::UnknownProfileType(_)));
    }

    #[test]
    fn standards_header_finalize_exposes_link_hints() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "event", Mode::StandardsHeader, false)
            .unwrap()
            .name("Tech Talk")
            .start_date("2024-06-15T09:00:00Z")
            .location(json!("Hall A"));

        let finalized = builder.finalize(FinalizeOptions::default()).unwrap();
        let hints = finalized.link_hints.expect("standards-header exposes hints");
        assert!(hints.http_header.contains("rel=\"profile\""));
    }

    #[test]
    fn other_modes_expose_no_link_hints() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "event", Mode::StrictSeo, false)
            .unwrap()
            .name("Tech Talk")
            .start_date("2024-06-15T09:00:00Z")
            .location(json!("Hall A"));
        let finalized = builder.finalize(FinalizeOptions::default()).unwrap();
        assert!(finalized.link_hints.is_none());
    }

    #[test]
    fn category_comes_from_the_profile() {
        let reg = registry();
        let builder = DocumentBuilder::new(&reg, "job-posting", Mode::StrictSeo, false).unwrap();
        assert_eq!(builder.category(), "business");
    }
}
