//! Multi-field sort engine.
//!
//! Active sort keys form a priority list: the first entry is the primary
//! key, and a newly activated field is appended with the lowest priority.
//! Repeated toggles of one field cycle it through
//! `unsorted -> first -> reversed -> unsorted`, where `first` is ascending
//! unless an explicit initial direction was requested.
//!
//! In [`SortMode::Delegated`] the engine keeps the same key list and header
//! annotations but never reorders rows; the key list is handed to an
//! external data source instead.

use std::cmp::Ordering;

use log::debug;
use serde_json::Value;

use crate::equality::as_number;
use crate::types::{Header, Item, Row, SortDirection, SortableField};

/// Who performs the actual ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Rows are sorted in memory
    #[default]
    Local,
    /// Rows arrive already ordered from an external source
    Delegated,
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveKey {
    key: SortableField,
    first: SortDirection,
}

/// What a toggle did to one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortChange {
    Added(SortDirection),
    Reversed(SortDirection),
    Removed,
}

/// Ordered list of active sort keys
#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    keys: Vec<ActiveKey>,
    mode: SortMode,
}

impl SortEngine {
    pub fn new(mode: SortMode) -> Self {
        Self {
            keys: Vec::new(),
            mode,
        }
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SortMode) {
        self.mode = mode;
    }

    /// Advance `field` one step through its cycle
    pub fn toggle(&mut self, field: &str, initial: Option<SortDirection>) -> SortChange {
        let change = match self.keys.iter().position(|k| k.key.field == field) {
            Some(index) => {
                let Some(active) = self.keys.get_mut(index) else {
                    return SortChange::Removed;
                };
                if active.key.order == active.first {
                    active.key.order = active.first.reversed();
                    SortChange::Reversed(active.key.order)
                } else {
                    self.keys.remove(index);
                    SortChange::Removed
                }
            }
            None => {
                let first = initial.unwrap_or(SortDirection::Asc);
                self.keys.push(ActiveKey {
                    key: SortableField::new(field, first),
                    first,
                });
                SortChange::Added(first)
            }
        };
        debug!("sort toggle '{field}': {change:?}");
        change
    }

    /// Drop every active key
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Active keys in priority order
    pub fn keys(&self) -> impl Iterator<Item = &SortableField> {
        self.keys.iter().map(|k| &k.key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The active key for `field`
    pub fn key(&self, field: &str) -> Option<&SortableField> {
        self.keys().find(|k| k.field == field)
    }

    /// 1-based priority of `field`
    pub fn order_number(&self, field: &str) -> Option<usize> {
        self.keys().position(|k| k.field == field).map(|i| i + 1)
    }

    /// Icon class for `field`: `sort-up` or `sort-down`
    pub fn icon(&self, field: &str) -> Option<&'static str> {
        self.key(field).map(|k| k.order.icon())
    }

    /// Keys as signed tokens: `["name", "-price"]`
    pub fn to_signed_fields(&self) -> Vec<String> {
        self.keys().map(SortableField::signed).collect()
    }

    /// Keys in the form emitted to an external data source
    pub fn to_api_fields(&self) -> Vec<SortableField> {
        self.keys().cloned().collect()
    }

    /// Write icon, direction and priority annotations onto `headers`.
    ///
    /// Inactive headers have their annotations cleared.
    pub fn annotate(&self, headers: &mut [Header]) {
        for header in headers.iter_mut() {
            match self.keys().position(|k| k.field == header.value) {
                Some(index) => {
                    header.has_sortable_icon = true;
                    header.sort_direction = self.keys.get(index).map(|k| k.key.order);
                    header.sort_order_number = Some(index + 1);
                }
                None => header.clear_sort_annotation(),
            }
        }
    }

    /// Lexicographic comparison of two items across the active keys
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        compare_by_keys(self.keys(), a, b)
    }

    /// Sort rows in place; stable, and a no-op in delegated mode or with no
    /// active keys
    pub fn sort_rows(&self, rows: &mut [Row]) {
        if self.mode == SortMode::Delegated || self.keys.is_empty() {
            return;
        }
        rows.sort_by(|a, b| self.compare(&a.item, &b.item));
    }

    /// Dataset indices in sorted order.
    ///
    /// Delegated mode, or no active keys, gives the incoming order.
    pub fn sorted_indices(&self, rows: &[Row]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..rows.len()).collect();
        if self.mode == SortMode::Delegated || self.keys.is_empty() {
            return order;
        }
        order.sort_by(|&a, &b| match (rows.get(a), rows.get(b)) {
            (Some(a), Some(b)) => self.compare(&a.item, &b.item),
            _ => Ordering::Equal,
        });
        order
    }
}

/// Compare two items by a sequence of keys; the first non-equal key decides
pub fn compare_by_keys<'a>(
    keys: impl IntoIterator<Item = &'a SortableField>,
    a: &Item,
    b: &Item,
) -> Ordering {
    for key in keys {
        let ordering = compare_values(a.get(&key.field), b.get(&key.field));
        let ordering = match key.order {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Three-way ordinal comparison of two field values.
///
/// Two strings compare lexically. Any other pair of scalars compares
/// numerically after coercion (booleans as 0/1, null as 0, numeric strings
/// parsed). Missing values, nested values and pairs that do not coerce
/// compare equal, so they keep their relative order under a stable sort.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (Some(a), Some(b)) = (a, b) else {
        return Ordering::Equal;
    };
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return x.cmp(y);
    }
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}
