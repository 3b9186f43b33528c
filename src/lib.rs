//! gridkit - headless interaction state for data tables
//!
//! Owns everything a table widget decides besides painting:
//! - Column sizing: one shared track template with type-based ratios,
//!   explicit widths and drag resizing with frozen neighbours
//! - Pinned columns: sticky left offsets per header and body row
//! - Multi-field sorting, local or delegated to an external source
//! - Pagination windowing and pager buttons
//! - Row selection by content, with single-select mode
//! - Conditional row classes
//!
//! # Usage (Rust)
//!
//! ```
//! use gridkit::{TableConfig, TableEngine};
//!
//! let config = TableConfig::from_json(r#"{
//!     "headers": [{ "text": "Name", "value": "name" }],
//!     "items": [{ "name": "b" }, { "name": "a" }]
//! }"#).unwrap();
//! let mut table = TableEngine::new(config).unwrap();
//! table.do_sort("name", None);
//! assert_eq!(table.view()[0].item["name"], "a");
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridkit';
//! await init();
//! const grid = new GridView(tableElement, props);
//! grid.setEventCallback((name, payload) => emit(name, payload));
//! ```

pub mod conditional;
pub mod config;
pub mod equality;
pub mod error;
pub mod layout;
pub mod pagination;
pub mod registry;
pub mod selection;
pub mod sort;
pub mod types;
pub mod view;
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use config::TableConfig;
pub use error::{GridError, Result};
pub use view::{ComposedRow, StructuralChange, TableEngine, TableEvent, ViewSnapshot};
pub use wasm::GridView;

pub use types::*;

/// Compose the first page of a table from a JSON configuration and return
/// the render state as JSON
///
/// # Errors
/// Returns an error if the configuration is invalid.
#[wasm_bindgen]
pub fn compose_json(config: &str) -> std::result::Result<String, JsValue> {
    let config = TableConfig::from_json(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let engine = TableEngine::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&engine.snapshot())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
