//! Common assertion helpers for the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridkit::{Row, TableEngine};
use serde_json::Value;

// Re-export fixtures for convenience
pub use super::fixtures::*;

/// Values of `field` for the rows currently on screen.
#[must_use]
pub fn visible_values(engine: &TableEngine, field: &str) -> Vec<Value> {
    engine
        .view()
        .iter()
        .map(|row| row.item.get(field).cloned().unwrap_or(Value::Null))
        .collect()
}

/// String values of `field` for the rows currently on screen.
#[must_use]
pub fn visible_strings(engine: &TableEngine, field: &str) -> Vec<String> {
    visible_values(engine, field)
        .into_iter()
        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
        .collect()
}

/// Checked flags of the whole dataset, in dataset order.
#[must_use]
pub fn checked_flags(engine: &TableEngine) -> Vec<bool> {
    engine.rows().iter().map(Row::is_checked).collect()
}

/// Assert that every row's `isChecked` flag matches selection membership.
pub fn assert_flags_match_selection(engine: &TableEngine) {
    for (i, row) in engine.rows().iter().enumerate() {
        assert_eq!(
            row.is_checked(),
            engine.selection().contains(&row.item),
            "row {i} flag disagrees with selection"
        );
    }
}
