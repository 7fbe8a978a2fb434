//! Input sanitation seam.
//!
//! The builder optionally cleans raw values before storing them. The
//! contract is fixed here as a trait; [`BasicSanitizer`] is the stock
//! implementation and callers may substitute their own.

use serde_json::Value;

/// Bounds handed to [`Sanitizer::sanitize_number`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Cleans raw input per semantic type before it enters a document.
pub trait Sanitizer: Send + Sync {
    /// Clean a free-text value.
    fn sanitize_string(&self, raw: &str) -> String;

    /// Normalize a URL, or reject it entirely.
    fn sanitize_url(&self, raw: &str) -> Option<String>;

    /// Normalize a date or date-time string (best effort — an
    /// unrecognizable input passes through trimmed).
    fn sanitize_date(&self, raw: &str) -> String;

    /// Clamp a number into bounds, rejecting non-finite input.
    fn sanitize_number(&self, raw: f64, bounds: NumberBounds) -> Option<f64>;

    /// Recursively clean a structured sub-value of the named shape.
    fn sanitize_structured(&self, raw: Value, shape: &str) -> Value;
}

/// The stock sanitizer: whitespace/control-character hygiene for strings,
/// http(s)-only URL normalization, RFC 3339 date normalization, numeric
/// clamping, and recursive string cleaning inside structured values.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicSanitizer;

impl Sanitizer for BasicSanitizer {
    fn sanitize_string(&self, raw: &str) -> String {
        raw.trim()
            .chars()
            .filter(|c| !c.is_control() || *c == '\n')
            .collect()
    }

    fn sanitize_url(&self, raw: &str) -> Option<String> {
        let parsed = url::Url::parse(raw.trim()).ok()?;
        match parsed.scheme() {
            "http" | "https" => Some(parsed.to_string()),
            _ => None,
        }
    }

    fn sanitize_date(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
            return dt.to_rfc3339();
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return date.format("%Y-%m-%d").to_string();
        }
        trimmed.to_string()
    }

    fn sanitize_number(&self, raw: f64, bounds: NumberBounds) -> Option<f64> {
        if !raw.is_finite() {
            return None;
        }
        let mut n = raw;
        if let Some(min) = bounds.min {
            n = n.max(min);
        }
        if let Some(max) = bounds.max {
            n = n.min(max);
        }
        Some(n)
    }

    fn sanitize_structured(&self, raw: Value, shape: &str) -> Value {
        match raw {
            Value::String(s) => Value::String(self.sanitize_string(&s)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.sanitize_structured(item, shape))
                    .collect(),
            ),
            Value::Object(mut map) => {
                // Fill in the declared shape when the caller left @type out.
                if !map.contains_key("@type") && !shape.is_empty() {
                    map.insert("@type".into(), Value::String(shape.to_string()));
                }
                let cleaned = map
                    .into_iter()
                    .map(|(k, v)| (k, self.sanitize_structured(v, "")))
                    .collect();
                Value::Object(cleaned)
            }
            other => other,
        }
    }
}
