//! Selection reconciler.
//!
//! The selection is an ordered list of items (the two-way bound
//! `modelValue`). Membership is decided by the configured
//! [`SelectionPolicy`], never by reference identity, so a row recreated by a
//! re-sort or re-page still matches. After every change the engine-owned
//! `itemSettings.isChecked` flags of the dataset are brought in line with
//! membership.

use log::debug;

use crate::equality::{find_item, same_row};
use crate::types::{Item, Row, SelectionPolicy};

/// Selected items plus the rules for matching them
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: Vec<Item>,
    policy: SelectionPolicy,
    single_select: bool,
}

impl Selection {
    pub fn new(policy: SelectionPolicy, single_select: bool) -> Self {
        Self {
            selected: Vec::new(),
            policy,
            single_select,
        }
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    pub fn single_select(&self) -> bool {
        self.single_select
    }

    /// The current `modelValue`
    pub fn items(&self) -> &[Item] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, item: &Item) -> bool {
        find_item(&self.policy, &self.selected, item).is_some()
    }

    /// Replace the selection with a caller-supplied list.
    ///
    /// In single-select mode only the first item is kept.
    pub fn set_items(&mut self, mut items: Vec<Item>, dataset: &mut [Row]) {
        if self.single_select {
            items.truncate(1);
        }
        self.selected = items;
        self.sync_flags(dataset);
    }

    /// Select or deselect one item.
    ///
    /// A member is removed. A non-member replaces the selection in
    /// single-select mode and is appended otherwise.
    pub fn toggle(&mut self, item: &Item, dataset: &mut [Row]) {
        match find_item(&self.policy, &self.selected, item) {
            Some(index) => {
                self.selected.remove(index);
            }
            None if self.single_select => {
                self.selected = vec![item.clone()];
            }
            None => self.selected.push(item.clone()),
        }
        debug!("selection toggled: {} selected", self.selected.len());
        self.sync_flags(dataset);
    }

    /// Select every visible row, or clear the selection if all of them are
    /// already selected.
    ///
    /// `visible` holds dataset indices of the rows currently on screen.
    /// Rows selected on other pages are dropped.
    pub fn select_all_visible(&mut self, dataset: &mut [Row], visible: &[usize]) {
        let checked = !self.covers(dataset, visible);
        self.selected = if checked {
            visible
                .iter()
                .filter_map(|&i| dataset.get(i))
                .map(|row| row.item.clone())
                .collect()
        } else {
            Vec::new()
        };
        self.sync_flags(dataset);
        debug!(
            "select all visible: {} of {} selected",
            self.selected.len(),
            visible.len()
        );
    }

    /// Clear the selection
    pub fn clear(&mut self, dataset: &mut [Row]) {
        self.selected.clear();
        self.sync_flags(dataset);
    }

    /// Every row at `visible` is a member.
    ///
    /// True for an empty `visible` set.
    pub fn covers(&self, dataset: &[Row], visible: &[usize]) -> bool {
        visible
            .iter()
            .filter_map(|&i| dataset.get(i))
            .all(|row| self.contains(&row.item))
    }

    /// The selection size equals the visible row count.
    ///
    /// With no visible rows this holds only while the selection is empty.
    pub fn all_selected(&self, visible_count: usize) -> bool {
        visible_count == self.selected.len()
    }

    /// Something is selected but not everything visible
    pub fn some_unselected(&self, visible_count: usize) -> bool {
        !self.selected.is_empty() && !self.all_selected(visible_count)
    }

    /// Drop selected items that no longer match any dataset row.
    ///
    /// Returns true when the selection changed.
    pub fn retain_present(&mut self, dataset: &mut [Row]) -> bool {
        let before = self.selected.len();
        let policy = &self.policy;
        self.selected
            .retain(|item| dataset.iter().any(|row| same_row(policy, &row.item, item)));
        self.sync_flags(dataset);
        before != self.selected.len()
    }

    /// Set every row's `isChecked` to its membership
    pub fn sync_flags(&self, dataset: &mut [Row]) {
        for row in dataset.iter_mut() {
            row.item_settings.is_checked = self.contains(&row.item);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::item_from_value;
    use serde_json::{json, Value};

    fn dataset(values: Value) -> Vec<Row> {
        match values {
            Value::Array(list) => list
                .into_iter()
                .map(|v| Row::new(item_from_value(v)))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn item(v: Value) -> Item {
        item_from_value(v)
    }

    #[test]
    fn test_toggle_adds_and_removes_by_content() {
        let mut rows = dataset(json!([{ "name": "a" }, { "name": "b" }]));
        let mut selection = Selection::default();

        selection.toggle(&item(json!({ "name": "b" })), &mut rows);
        assert!(rows[1].is_checked());
        assert!(!rows[0].is_checked());

        // a freshly built copy of the same row deselects it
        selection.toggle(&item(json!({ "name": "b" })), &mut rows);
        assert!(selection.is_empty());
        assert!(!rows[1].is_checked());
    }

    #[test]
    fn test_single_select_replaces() {
        let mut rows = dataset(json!([{ "name": "a" }, { "name": "b" }]));
        let mut selection = Selection::new(SelectionPolicy::DeepEquality, true);
        selection.toggle(&rows[0].item.clone(), &mut rows);
        selection.toggle(&rows[1].item.clone(), &mut rows);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.items()[0], rows[1].item);
        assert!(!rows[0].is_checked());
        assert!(rows[1].is_checked());

        selection.set_items(vec![rows[0].item.clone(), rows[1].item.clone()], &mut rows);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_select_all_visible_toggles() {
        let mut rows = dataset(json!([{ "n": 1 }, { "n": 2 }, { "n": 3 }]));
        let mut selection = Selection::default();
        let visible = [2, 0];

        selection.select_all_visible(&mut rows, &visible);
        assert_eq!(selection.len(), 2);
        assert!(selection.all_selected(visible.len()));
        assert!(rows[0].is_checked() && rows[2].is_checked());
        assert!(!rows[1].is_checked());

        selection.select_all_visible(&mut rows, &visible);
        assert!(selection.is_empty());
        assert!(rows.iter().all(|r| !r.is_checked()));
    }

    #[test]
    fn test_partial_selection_flags() {
        let mut rows = dataset(json!([{ "n": 1 }, { "n": 2 }]));
        let mut selection = Selection::default();
        assert!(!selection.some_unselected(2));
        selection.toggle(&rows[0].item.clone(), &mut rows);
        assert!(selection.some_unselected(2));
        assert!(!selection.all_selected(2));

        // from partial, select-all selects everything
        selection.select_all_visible(&mut rows, &[0, 1]);
        assert!(selection.all_selected(2));
    }

    #[test]
    fn test_select_all_on_equal_sized_page() {
        let mut rows = dataset(json!([{ "n": 1 }, { "n": 2 }, { "n": 3 }, { "n": 4 }]));
        let mut selection = Selection::default();
        selection.select_all_visible(&mut rows, &[0, 1]);
        // same count as the next page, but none of its rows
        assert!(selection.all_selected(2));
        assert!(!selection.covers(&rows, &[2, 3]));

        selection.select_all_visible(&mut rows, &[2, 3]);
        assert_eq!(selection.len(), 2);
        assert!(selection.covers(&rows, &[2, 3]));
        assert!(!rows[0].is_checked() && !rows[1].is_checked());
        assert!(rows[2].is_checked() && rows[3].is_checked());
    }

    #[test]
    fn test_empty_dataset() {
        let mut rows: Vec<Row> = Vec::new();
        let mut selection = Selection::default();
        assert!(selection.all_selected(0));
        assert!(!selection.some_unselected(0));
        selection.select_all_visible(&mut rows, &[]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_key_field_policy() {
        let mut rows = dataset(json!([{ "id": 1, "qty": 5 }, { "id": 2, "qty": 7 }]));
        let mut selection = Selection::new(SelectionPolicy::KeyField("id".into()), false);
        selection.toggle(&item(json!({ "id": 2, "qty": 0 })), &mut rows);
        assert!(rows[1].is_checked());
        assert!(selection.contains(&rows[1].item));
    }

    #[test]
    fn test_retain_present() {
        let mut rows = dataset(json!([{ "n": 1 }, { "n": 2 }]));
        let mut selection = Selection::default();
        selection.select_all_visible(&mut rows, &[0, 1]);
        let mut next = dataset(json!([{ "n": 2 }, { "n": 3 }]));
        assert!(selection.retain_present(&mut next));
        assert_eq!(selection.len(), 1);
        assert!(next[0].is_checked());
        assert!(!next[1].is_checked());
    }
}
