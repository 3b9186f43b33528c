use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A caller-supplied row: field name to scalar or nested value
pub type Item = Map<String, Value>;

/// Engine-owned per-row state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSettings {
    #[serde(default)]
    pub is_checked: bool,
}

/// A dataset row together with its engine annotations.
///
/// The caller's fields live untouched in `item`; `item_settings` is stored
/// beside them and serialized under the `itemSettings` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(flatten)]
    pub item: Item,
    #[serde(default, rename = "itemSettings")]
    pub item_settings: ItemSettings,
}

impl Row {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            item_settings: ItemSettings::default(),
        }
    }

    /// Field value, if present
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.item.get(field)
    }

    pub fn is_checked(&self) -> bool {
        self.item_settings.is_checked
    }
}

impl From<Item> for Row {
    fn from(item: Item) -> Self {
        Self::new(item)
    }
}

/// Build an [`Item`] from a JSON object literal; non-objects yield an empty item.
pub fn item_from_value(value: Value) -> Item {
    match value {
        Value::Object(map) => map,
        _ => Item::new(),
    }
}
