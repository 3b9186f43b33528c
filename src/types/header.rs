use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SortDirection;

/// Content class of a column, used to pick its flexible track ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeClass {
    /// Numbers, short codes
    #[serde(alias = "number")]
    Numeric,
    /// Names, labels
    TextShort,
    /// Descriptions, free text
    TextLong,
    /// Any class string the engine does not know
    #[serde(other)]
    Other,
}

impl TypeClass {
    /// The `fr` ratio of a flexible track of this class.
    pub fn ratio(self) -> f32 {
        match self {
            TypeClass::Numeric | TypeClass::Other => 1.0,
            TypeClass::TextShort => 1.67,
            TypeClass::TextLong => 3.33,
        }
    }
}

/// Class name(s) applied to a row when a conditional rule matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassName {
    Single(String),
    Many(Vec<String>),
}

impl ClassName {
    /// Space-joined class attribute text
    pub fn joined(&self) -> String {
        match self {
            ClassName::Single(s) => s.clone(),
            ClassName::Many(list) => list.join(" "),
        }
    }
}

/// Conditional row styling rule attached to a header.
///
/// The operator is kept as raw text so that a malformed rule can be skipped
/// at evaluation time instead of failing the whole configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStyle {
    pub class_name: ClassName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Column configuration as supplied by the host.
///
/// `has_sortable_icon`, `sort_direction` and `sort_order_number` are written
/// by the sort engine; values supplied by the caller are overwritten on the
/// next sort toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(default)]
    pub text: String,
    /// Field name in each row; unique among headers
    pub value: String,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub resizable: bool,
    /// Explicit width such as `"120px"` or `"8rem"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Pinned during horizontal scroll
    #[serde(default)]
    pub fixed: bool,
    /// Checkbox column
    #[serde(default)]
    pub selectable: bool,
    #[serde(
        default,
        alias = "type",
        rename = "typeClass",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_class: Option<TypeClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<HeaderStyle>,

    #[serde(default)]
    pub has_sortable_icon: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order_number: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Header {
    /// Create a sortable, resizable header with no width or type class
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            sortable: true,
            resizable: true,
            width: None,
            fixed: false,
            selectable: false,
            type_class: None,
            default_sort: None,
            style: None,
            has_sortable_icon: false,
            sort_direction: None,
            sort_order_number: None,
        }
    }

    /// Clear the sort annotations written by the sort engine
    pub fn clear_sort_annotation(&mut self) {
        self.has_sortable_icon = false;
        self.sort_direction = None;
        self.sort_order_number = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_header_defaults_from_json() {
        let header: Header = serde_json::from_str(r#"{"text":"Name","value":"name"}"#).unwrap();
        assert!(header.sortable);
        assert!(header.resizable);
        assert!(!header.fixed);
        assert_eq!(header.type_class, None);
        assert_eq!(header.width, None);
    }

    #[test]
    fn test_type_class_aliases() {
        let header: Header =
            serde_json::from_str(r#"{"value":"qty","type":"number","width":"90px"}"#).unwrap();
        assert_eq!(header.type_class, Some(TypeClass::Numeric));

        let header: Header =
            serde_json::from_str(r#"{"value":"notes","typeClass":"text-long"}"#).unwrap();
        assert_eq!(header.type_class, Some(TypeClass::TextLong));
        assert_eq!(TypeClass::TextLong.ratio(), 3.33);
    }

    #[test]
    fn test_unknown_type_class_uses_unit_ratio() {
        let header: Header =
            serde_json::from_str(r#"{"value":"x","typeClass":"sparkline"}"#).unwrap();
        assert_eq!(header.type_class, Some(TypeClass::Other));
        assert_eq!(TypeClass::Other.ratio(), 1.0);
    }

    #[test]
    fn test_class_name_list() {
        let style: HeaderStyle = serde_json::from_str(
            r#"{"className":["warn","bold"],"expectedValue":10,"condition":">"}"#,
        )
        .unwrap();
        assert_eq!(style.class_name.joined(), "warn bold");
    }
}
