//! The finalize transform: mode decoration, channel splitting, link hints.

use ldsmith_core::{CONTEXT_KEY, Document, Mode, SCHEMA_ORG_CONTEXT};
use ldsmith_profiles::{PROFILE_VERSION, ProfileDefinition};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

/// Type-alias decoration key.
pub const ALIAS_KEY: &str = "additionalType";

/// Version decoration key.
pub const VERSION_KEY: &str = "schemaVersion";

/// Identifier decoration key.
pub const IDENTIFIER_KEY: &str = "identifier";

/// PropertyValue metadata block key.
pub const PROPERTY_VALUE_KEY: &str = "additionalProperty";

/// Every key a mode may add. The transform strips these from its input
/// before decorating, so mode switches never inherit another mode's keys.
pub const DECORATION_KEYS: [&str; 4] =
    [ALIAS_KEY, VERSION_KEY, IDENTIFIER_KEY, PROPERTY_VALUE_KEY];

/// A finalized document: flat, or split into two channels.
///
/// Serialize-only: the split form flattens to `{"primary": ..,
/// "alternate": ..}` and a flat JSON object would be ambiguous to parse
/// back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FinalizedDocument {
    Single(Document),
    Split { primary: Document, alternate: Document },
}

impl FinalizedDocument {
    /// The primary document regardless of shape.
    pub fn primary(&self) -> &Document {
        match self {
            FinalizedDocument::Single(doc) => doc,
            FinalizedDocument::Split { primary, .. } => primary,
        }
    }
}

/// Discovery hints for the `standards-header` mode: point consumers at the
/// profile from HTML or HTTP instead of decorating the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkHints {
    /// An HTML `<link>` element for the page head.
    pub html_link: String,
    /// A `Link` header value.
    pub http_header: String,
}

impl LinkHints {
    pub fn for_profile(profile: &ProfileDefinition) -> Self {
        Self {
            html_link: format!("<link rel=\"profile\" href=\"{}\">", profile.profile_url),
            http_header: format!("<{}>; rel=\"profile\"", profile.profile_url),
        }
    }
}

/// Pure transform from (field map, mode) to finalized output.
///
/// Strips any decoration keys present in the input, applies the active
/// mode's capability set, and duplicates into channels when asked. The
/// input document is consumed; the output shares nothing with the builder
/// that produced it.
pub fn assemble(fields: Document, profile: &ProfileDefinition, mode: Mode) -> FinalizedDocument {
    let mut doc = fields;
    for key in DECORATION_KEYS {
        doc.remove(key);
    }

    let caps = mode.capabilities();
    debug!(profile = %profile.type_name, mode = %mode, "assembling document");

    if caps.uses_alias {
        doc.set(ALIAS_KEY, Value::String(profile.profile_url.clone()));
    }
    if caps.uses_version {
        doc.set(VERSION_KEY, Value::String(PROFILE_VERSION.into()));
    }
    if caps.uses_identifier {
        doc.set(IDENTIFIER_KEY, property_value(profile));
    }
    if caps.uses_property_value {
        doc.set(PROPERTY_VALUE_KEY, property_value(profile));
    }

    if !caps.splits_channels {
        return FinalizedDocument::Single(doc);
    }

    let mut alternate = doc.clone();
    if caps.includes_profile_metadata {
        alternate.set(
            CONTEXT_KEY,
            json!([
                SCHEMA_ORG_CONTEXT,
                { "profile": profile.profile_url, "version": PROFILE_VERSION }
            ]),
        );
    }
    FinalizedDocument::Split { primary: doc, alternate }
}

fn property_value(profile: &ProfileDefinition) -> Value {
    json!({
        "@type": "PropertyValue",
        "propertyID": "profile",
        "value": profile.profile_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldsmith_core::TYPE_KEY;
    use ldsmith_profiles::ProfileRegistry;
    use serde_json::json;

    fn article_fields() -> (Document, std::sync::Arc<ProfileDefinition>) {
        let profile = ProfileRegistry::builtin().unwrap().lookup("article").unwrap();
        let mut doc = Document::new(&profile.type_name);
        doc.set("headline", json!("Breaking News"));
        (doc, profile)
    }

    #[test]
    fn strict_seo_adds_three_decoration_keys() {
        let (doc, profile) = article_fields();
        let FinalizedDocument::Single(out) = assemble(doc, &profile, Mode::StrictSeo) else {
            panic!("strict-seo must not split");
        };
        assert_eq!(out.get(ALIAS_KEY), Some(&json!(profile.profile_url)));
        assert_eq!(out.get(VERSION_KEY), Some(&json!(PROFILE_VERSION)));
        assert_eq!(
            out.get(IDENTIFIER_KEY).unwrap()["propertyID"],
            json!("profile")
        );
        assert!(!out.contains(PROPERTY_VALUE_KEY));
    }

    #[test]
    fn split_channels_yields_exactly_two_channels() {
        let (doc, profile) = article_fields();
        let out = assemble(doc, &profile, Mode::SplitChannels);
        let value = serde_json::to_value(&out).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["primary", "alternate"]);
    }

    #[test]
    fn alternate_channel_carries_profile_metadata_in_context() {
        let (doc, profile) = article_fields();
        let FinalizedDocument::Split { primary, alternate } =
            assemble(doc, &profile, Mode::SplitChannels)
        else {
            panic!("split-channels must split");
        };
        assert_eq!(primary.get(CONTEXT_KEY), Some(&json!(SCHEMA_ORG_CONTEXT)));
        let ctx = alternate.get(CONTEXT_KEY).unwrap();
        assert_eq!(ctx[0], json!(SCHEMA_ORG_CONTEXT));
        assert_eq!(ctx[1]["profile"], json!(profile.profile_url));
        // Both channels carry the PropertyValue block.
        assert!(primary.contains(PROPERTY_VALUE_KEY));
        assert!(alternate.contains(PROPERTY_VALUE_KEY));
    }

    #[test]
    fn standards_header_leaves_the_body_undecorated() {
        let (doc, profile) = article_fields();
        let FinalizedDocument::Single(out) = assemble(doc, &profile, Mode::StandardsHeader)
        else {
            panic!("standards-header must not split");
        };
        for key in DECORATION_KEYS {
            assert!(!out.contains(key), "unexpected {key}");
        }
        assert_eq!(out.get(TYPE_KEY), Some(&json!("Article")));
    }

    #[test]
    fn stale_decoration_is_stripped_before_redecorating() {
        let (mut doc, profile) = article_fields();
        // Simulate fields re-ingested from a strict-seo finalize.
        doc.set(ALIAS_KEY, json!(profile.profile_url));
        doc.set(VERSION_KEY, json!(PROFILE_VERSION));
        doc.set(IDENTIFIER_KEY, json!({"@type": "PropertyValue"}));

        let FinalizedDocument::Split { primary, alternate } =
            assemble(doc, &profile, Mode::SplitChannels)
        else {
            panic!("split-channels must split");
        };
        for channel in [&primary, &alternate] {
            assert!(!channel.contains(ALIAS_KEY));
            assert!(!channel.contains(VERSION_KEY));
            assert!(!channel.contains(IDENTIFIER_KEY));
        }
    }

    #[test]
    fn assemble_is_idempotent_per_mode() {
        let (doc, profile) = article_fields();
        let first = assemble(doc, &profile, Mode::StrictSeo);
        let FinalizedDocument::Single(out) = first.clone() else { panic!() };
        let second = assemble(out, &profile, Mode::StrictSeo);
        assert_eq!(first, second);
    }

    #[test]
    fn link_hints_point_at_the_profile() {
        let profile = ProfileRegistry::builtin().unwrap().lookup("article").unwrap();
        let hints = LinkHints::for_profile(&profile);
        assert!(hints.html_link.contains(&profile.profile_url));
        assert!(hints.html_link.starts_with("<link rel=\"profile\""));
        assert!(hints.http_header.ends_with("rel=\"profile\""));
    }
}
