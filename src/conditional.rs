//! Conditional row classes.
//!
//! A header may carry a style rule `{ className, expectedValue, condition }`.
//! For each row, the rule of every header whose field is present is checked
//! as `row[field] <condition> expectedValue`; matching rules contribute their
//! class names in header order. Incomplete or malformed rules are skipped.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde_json::Value;

use crate::equality::{as_number, as_text, is_truthy};
use crate::types::{Header, Item};

/// Comparison operator of a style rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Equal,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(Condition::Equal),
            ">" => Ok(Condition::Greater),
            ">=" => Ok(Condition::GreaterOrEqual),
            "<" => Ok(Condition::Less),
            "<=" => Ok(Condition::LessOrEqual),
            other => Err(format!("unknown condition '{other}'")),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Condition::Equal => "=",
            Condition::Greater => ">",
            Condition::GreaterOrEqual => ">=",
            Condition::Less => "<",
            Condition::LessOrEqual => "<=",
        })
    }
}

impl Condition {
    /// Evaluate `actual <self> expected`.
    ///
    /// Equality compares text forms; the ordering operators compare numbers
    /// and are false when either side is not numeric.
    pub fn evaluate(self, actual: &Value, expected: &Value) -> bool {
        if self == Condition::Equal {
            return as_text(actual) == as_text(expected);
        }
        let (Some(a), Some(b)) = (as_number(actual), as_number(expected)) else {
            return false;
        };
        match self {
            Condition::Greater => a > b,
            Condition::GreaterOrEqual => a >= b,
            Condition::Less => a < b,
            Condition::LessOrEqual => a <= b,
            Condition::Equal => false,
        }
    }
}

/// Space-joined classes of every matching rule for `item`
pub fn row_classes(headers: &[Header], item: &Item) -> String {
    let mut classes: Vec<String> = Vec::new();
    for header in headers {
        let (Some(style), Some(value)) = (&header.style, item.get(&header.value)) else {
            continue;
        };
        let key = &header.value;
        let (Some(expected), Some(condition)) = (&style.expected_value, &style.condition) else {
            continue;
        };
        if !is_truthy(value) || !is_truthy(expected) {
            continue;
        }
        let condition = match condition.parse::<Condition>() {
            Ok(condition) => condition,
            Err(e) => {
                warn!("skipping style rule on '{key}': {e}");
                continue;
            }
        };
        if condition.evaluate(value, expected) {
            classes.push(style.class_name.joined());
        }
    }
    classes.join(" ")
}
