//! Structural equality and scalar coercion for row values.
//!
//! Rows may be recreated between sort and pagination passes, so identity is
//! defined by content: two items are equal when they have the same key set
//! and every value is equal, recursively. Key order never matters. Numbers
//! compare by numeric value, so `2` and `2.0` are the same.

use serde_json::Value;

use crate::types::{Item, SelectionPolicy};

/// Deep structural equality of two items
pub fn items_equal(a: &Item, b: &Item) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| values_equal(value, other)))
}

/// Deep structural equality of two values
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => items_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
                return x == y;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y).is_eq(),
                _ => false,
            }
        }
        _ => a == b,
    }
}

/// Whether two items denote the same logical row under `policy`.
///
/// With [`SelectionPolicy::KeyField`], items lacking the key never match.
pub fn same_row(policy: &SelectionPolicy, a: &Item, b: &Item) -> bool {
    match policy {
        SelectionPolicy::DeepEquality => items_equal(a, b),
        SelectionPolicy::KeyField(field) => match (a.get(field), b.get(field)) {
            (Some(x), Some(y)) => values_equal(x, y),
            _ => false,
        },
    }
}

/// Position of `needle` in `list`, matched under `policy`
pub fn find_item(policy: &SelectionPolicy, list: &[Item], needle: &Item) -> Option<usize> {
    list.iter().position(|item| same_row(policy, item, needle))
}

/// Numeric view of a scalar, with loose coercion: booleans are 0/1, null is
/// 0, strings are parsed after trimming (an empty string is 0).
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Truthiness of a value: null, false, 0, NaN and "" are falsy
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a scalar used for equality conditions
pub(crate) fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
