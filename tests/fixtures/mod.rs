//! Builders for table configurations used by the integration tests.
//!
//! ```rust,ignore
//! let engine = TableBuilder::new()
//!     .header(HeaderBuilder::new("name").type_class("text-short"))
//!     .header(HeaderBuilder::new("price").default_sort("desc"))
//!     .item(json!({ "name": "a", "price": 2 }))
//!     .paginate(10)
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridkit::{TableConfig, TableEngine};
use serde_json::{json, Map, Value};

// ============================================================================
// Header Builder
// ============================================================================

/// Fluent builder for one header object.
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
    fields: Map<String, Value>,
}

impl HeaderBuilder {
    /// Create a header for field `value`; its text is the value uppercased.
    #[must_use]
    pub fn new(value: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("text".into(), json!(value.to_uppercase()));
        fields.insert("value".into(), json!(value));
        Self { fields }
    }

    #[must_use]
    pub fn type_class(mut self, class: &str) -> Self {
        self.fields.insert("typeClass".into(), json!(class));
        self
    }

    #[must_use]
    pub fn width(mut self, width: &str) -> Self {
        self.fields.insert("width".into(), json!(width));
        self
    }

    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.fields.insert("fixed".into(), json!(true));
        self
    }

    #[must_use]
    pub fn unsortable(mut self) -> Self {
        self.fields.insert("sortable".into(), json!(false));
        self
    }

    #[must_use]
    pub fn not_resizable(mut self) -> Self {
        self.fields.insert("resizable".into(), json!(false));
        self
    }

    #[must_use]
    pub fn default_sort(mut self, direction: &str) -> Self {
        self.fields.insert("defaultSort".into(), json!(direction));
        self
    }

    /// Attach a conditional class rule.
    #[must_use]
    pub fn style(mut self, class_name: Value, condition: &str, expected: Value) -> Self {
        self.fields.insert(
            "style".into(),
            json!({ "className": class_name, "condition": condition, "expectedValue": expected }),
        );
        self
    }

    #[must_use]
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<&str> for HeaderBuilder {
    fn from(value: &str) -> Self {
        HeaderBuilder::new(value)
    }
}

// ============================================================================
// Table Builder
// ============================================================================

/// Fluent builder for a whole table configuration.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    headers: Vec<Value>,
    items: Vec<Value>,
    model_value: Vec<Value>,
    props: Map<String, Value>,
}

impl TableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn header(mut self, header: impl Into<HeaderBuilder>) -> Self {
        self.headers.push(header.into().build());
        self
    }

    #[must_use]
    pub fn headers(mut self, values: &[&str]) -> Self {
        for value in values {
            self.headers.push(HeaderBuilder::new(value).build());
        }
        self
    }

    #[must_use]
    pub fn item(mut self, item: Value) -> Self {
        self.items.push(item);
        self
    }

    /// Add every element of a JSON array as an item.
    #[must_use]
    pub fn items(mut self, items: Value) -> Self {
        if let Value::Array(list) = items {
            self.items.extend(list);
        }
        self
    }

    /// Add `count` items `{ "id": i, "name": "row-i" }` for i in 0..count.
    #[must_use]
    pub fn numbered_items(mut self, count: usize) -> Self {
        for i in 0..count {
            self.items.push(json!({ "id": i, "name": format!("row-{i}") }));
        }
        self
    }

    #[must_use]
    pub fn selected(mut self, item: Value) -> Self {
        self.model_value.push(item);
        self
    }

    #[must_use]
    pub fn prop(mut self, key: &str, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn paginate(self, per_page: usize) -> Self {
        self.prop("isPaginationModeEnabled", json!(true))
            .prop("paginationOptions", json!({ "perPage": per_page }))
    }

    #[must_use]
    pub fn show_select(self) -> Self {
        self.prop("showSelect", json!(true))
    }

    #[must_use]
    pub fn single_select(self) -> Self {
        self.prop("singleSelect", json!(true))
    }

    #[must_use]
    pub fn api_sorting(self) -> Self {
        self.prop("useApiSorting", json!(true))
    }

    /// The configuration as a JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut config = self.props.clone();
        config.insert("headers".into(), Value::Array(self.headers.clone()));
        config.insert("items".into(), Value::Array(self.items.clone()));
        config.insert("modelValue".into(), Value::Array(self.model_value.clone()));
        Value::Object(config)
    }

    #[must_use]
    pub fn config(&self) -> TableConfig {
        TableConfig::from_json(&self.to_json().to_string()).expect("valid table config")
    }

    /// Mount the engine, panicking on an invalid configuration.
    #[must_use]
    pub fn build(&self) -> TableEngine {
        TableEngine::new(self.config()).expect("engine mounts")
    }
}
