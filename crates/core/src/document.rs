//! The JSON-LD document under construction.
//!
//! A [`Document`] is an ordered field map that always carries the two
//! reserved JSON-LD keys: the vocabulary context and the Schema.org type.
//! Field order is preserved so serialized output reads the way it was built.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved key naming the vocabulary context.
pub const CONTEXT_KEY: &str = "@context";

/// Reserved key naming the document's Schema.org type.
pub const TYPE_KEY: &str = "@type";

/// The vocabulary every builtin profile speaks.
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";

/// An ordered mapping from field name to JSON value.
///
/// Created empty (apart from the reserved keys) by a builder, mutated
/// through setters, and frozen into an independent snapshot at finalize
/// time. A `null` value counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Create a document carrying the standard vocabulary context and the
    /// given Schema.org type.
    pub fn new(schema_type: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(CONTEXT_KEY.into(), Value::String(SCHEMA_ORG_CONTEXT.into()));
        fields.insert(TYPE_KEY.into(), Value::String(schema_type.into()));
        Self { fields }
    }

    /// Wrap an existing field map.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Set a field, overwriting any earlier value under the same name.
    pub fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    /// Append one item to a list-valued field, creating the list on first
    /// use. A non-array value already stored under the name is folded into
    /// the new list as its first element.
    pub fn push_item(&mut self, name: &str, item: Value) {
        match self.fields.get_mut(name) {
            Some(Value::Array(items)) => items.push(item),
            Some(existing) => {
                let first = existing.take();
                self.fields
                    .insert(name.to_string(), Value::Array(vec![first, item]));
            }
            None => {
                self.fields.insert(name.to_string(), Value::Array(vec![item]));
            }
        }
    }

    /// Look up a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Remove a field, returning its value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    /// Whether a field is present with a non-null value.
    pub fn contains(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(v) if !v.is_null())
    }

    /// The document's Schema.org type, when set.
    pub fn schema_type(&self) -> Option<&str> {
        self.fields.get(TYPE_KEY).and_then(Value::as_str)
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Number of fields, reserved keys included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the document into its field map.
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc.fields)
    }
}
