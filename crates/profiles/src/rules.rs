//! The field-rule evaluator.
//!
//! `satisfies` judges a value that exists against a declarative rule.
//! Presence-checking belongs to the caller: absence never satisfies
//! anything here because nothing absent ever reaches this module.

use crate::model::{FieldRule, ShapeRule, ValueFamily, ValueFormat};
use serde_json::Value;
use tracing::trace;

/// Does `value` satisfy `rule`?
///
/// Constant rules require exact equality. Shape rules gate on the primitive
/// family and its declared constraints. `any_of` rules try alternatives in
/// declaration order and short-circuit on the first success.
pub fn satisfies(value: &Value, rule: &FieldRule) -> bool {
    match rule {
        FieldRule::Const(c) => value == &c.value,
        FieldRule::AnyOf(alternatives) => alternatives
            .any_of
            .iter()
            .any(|alt| satisfies(value, alt)),
        FieldRule::Shape(shape) => {
            let ok = shape_satisfies(value, shape);
            if !ok {
                trace!(family = ?shape.family, "value failed shape rule");
            }
            ok
        }
    }
}

fn shape_satisfies(value: &Value, rule: &ShapeRule) -> bool {
    match rule.family {
        ValueFamily::String => {
            let Some(s) = value.as_str() else { return false };
            length_ok(s.chars().count(), rule) && format_ok(s, rule.format)
        }
        ValueFamily::Number => value.as_f64().is_some_and(|n| bounds_ok(n, rule)),
        ValueFamily::Integer => {
            (value.is_i64() || value.is_u64())
                && value.as_f64().is_some_and(|n| bounds_ok(n, rule))
        }
        ValueFamily::Boolean => value.is_boolean(),
        // Container-level gate only: item shapes are never checked.
        ValueFamily::Array => value
            .as_array()
            .is_some_and(|items| length_ok(items.len(), rule)),
        ValueFamily::Object => value.as_object().is_some_and(|map| {
            // Shallow shape check: agree with @type when the object has one.
            match (&rule.shape, map.get("@type").and_then(Value::as_str)) {
                (Some(shape), Some(declared)) => shape == declared,
                _ => true,
            }
        }),
    }
}

fn length_ok(len: usize, rule: &ShapeRule) -> bool {
    rule.min_length.is_none_or(|min| len >= min)
        && rule.max_length.is_none_or(|max| len <= max)
}

fn bounds_ok(n: f64, rule: &ShapeRule) -> bool {
    rule.min.is_none_or(|min| n >= min) && rule.max.is_none_or(|max| n <= max)
}

fn format_ok(s: &str, format: Option<ValueFormat>) -> bool {
    match format {
        None => true,
        Some(ValueFormat::Date) => {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        }
        Some(ValueFormat::DateTime) => chrono::DateTime::parse_from_rfc3339(s).is_ok(),
        Some(ValueFormat::Uri) => url::Url::parse(s).is_ok(),
    }
}
