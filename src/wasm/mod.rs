//! JavaScript facade.
//!
//! `GridView` wraps one [`TableEngine`] and forwards its events to a JS
//! callback as `(eventName, payload)`. Payloads travel as plain JS objects.
//!
//! ```javascript
//! import init, { GridView } from 'gridkit';
//! await init();
//! const grid = new GridView(table, { headers, items, showSelect: true });
//! grid.setEventCallback((name, payload) => emit(name, payload));
//! grid.doSort('price');
//! render(grid.view());
//! ```

#[cfg(target_arch = "wasm32")]
mod dom;

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::TableConfig;
use crate::layout::ResizeIntent;
use crate::types::{Header, Item, Row, SortDirection};
use crate::view::{TableEngine, TableEvent};

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid payload: {e}")))
}

/// Table engine exported to JavaScript
#[wasm_bindgen]
pub struct GridView {
    engine: TableEngine,
    event_callback: Option<Function>,
    frame_callback: Option<Function>,
    #[cfg(target_arch = "wasm32")]
    table: web_sys::Element,
}

impl GridView {
    /// Forward queued engine events to the JS listener
    fn flush_events(&mut self) {
        let events = self.engine.drain_events();
        let Some(callback) = self.event_callback.as_ref() else {
            return;
        };
        for event in events {
            let (name, payload) = match &event {
                TableEvent::UpdateModelValue(items) => ("update:modelValue", to_js(items)),
                TableEvent::HandleApiSorting(fields) => ("handle-api-sorting", to_js(fields)),
            };
            match payload {
                Ok(payload) => {
                    let _ = callback.call2(&JsValue::NULL, &JsValue::from_str(name), &payload);
                }
                Err(e) => log::warn!("dropping {name} event: {e:?}"),
            }
        }
    }
}

#[wasm_bindgen]
impl GridView {
    /// Mount a table on `table` from a props object.
    ///
    /// # Errors
    /// Fails on an invalid configuration.
    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen(constructor)]
    pub fn new(table: web_sys::Element, config: JsValue) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();
        let config: TableConfig = from_js(config)?;
        config.validate()?;
        let engine = TableEngine::new(config)?;
        let view = GridView {
            engine,
            event_callback: None,
            frame_callback: None,
            table,
        };
        dom::apply_template(&view.table, &view.engine.grid_template());
        Ok(view)
    }

    /// Mount a detached engine (no DOM) from a props object.
    ///
    /// # Errors
    /// Fails on an invalid configuration.
    #[cfg(not(target_arch = "wasm32"))]
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GridView, JsValue> {
        let config: TableConfig = from_js(config)?;
        config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let engine = TableEngine::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(GridView {
            engine,
            event_callback: None,
            frame_callback: None,
        })
    }

    /// Register the listener for `update:modelValue` and `handle-api-sorting`
    #[wasm_bindgen(js_name = "setEventCallback")]
    pub fn set_event_callback(&mut self, callback: Option<Function>) {
        self.event_callback = callback;
    }

    /// Register a JS callback that requests an animation frame
    #[wasm_bindgen(js_name = "setFrameCallback")]
    pub fn set_frame_callback(&mut self, callback: Option<Function>) {
        self.frame_callback = callback;
    }

    /// Render state: headers, composed rows, template, pager and selection flags.
    ///
    /// # Errors
    /// Fails only if serialization fails.
    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.snapshot())
    }

    #[wasm_bindgen(js_name = "gridTemplate")]
    pub fn grid_template(&self) -> String {
        self.engine.grid_template()
    }

    /// Toggle sorting on `field`; `direction` ("asc"/"desc") sets the first
    /// direction. Returns false when the field is not sortable.
    #[wasm_bindgen(js_name = "doSort")]
    pub fn do_sort(&mut self, field: &str, direction: Option<String>) -> bool {
        let initial = direction.and_then(|d| d.parse::<SortDirection>().ok());
        let changed = self.engine.do_sort(field, initial).is_some();
        self.flush_events();
        changed
    }

    #[wasm_bindgen(js_name = "clearSort")]
    pub fn clear_sort(&mut self) {
        self.engine.clear_sort();
        self.flush_events();
    }

    /// Active sort keys as signed tokens (`"name"`, `"-price"`)
    #[wasm_bindgen(js_name = "sortTokens")]
    pub fn sort_tokens(&self) -> Vec<String> {
        self.engine.sort_engine().to_signed_fields()
    }

    #[wasm_bindgen(js_name = "setPage")]
    pub fn set_page(&mut self, page: usize) -> usize {
        self.engine.set_page(page)
    }

    #[wasm_bindgen(js_name = "nextPage")]
    pub fn next_page(&mut self) -> usize {
        self.engine.next_page()
    }

    #[wasm_bindgen(js_name = "prevPage")]
    pub fn prev_page(&mut self) -> usize {
        self.engine.prev_page()
    }

    #[wasm_bindgen(js_name = "totalPages")]
    pub fn total_pages(&self) -> usize {
        self.engine.total_pages()
    }

    /// Toggle membership of a row object; false when it matches no row on
    /// screen.
    ///
    /// # Errors
    /// Fails if `item` is not a plain object.
    #[wasm_bindgen(js_name = "toggleRow")]
    pub fn toggle_row(&mut self, item: JsValue) -> Result<bool, JsValue> {
        let item: Item = from_js(item)?;
        let toggled = self.engine.toggle_row(&item);
        self.flush_events();
        Ok(toggled)
    }

    /// Toggle the row at `position` of the current view
    #[wasm_bindgen(js_name = "toggleVisible")]
    pub fn toggle_visible(&mut self, position: usize) -> bool {
        let toggled = self.engine.toggle_visible(position);
        self.flush_events();
        toggled
    }

    #[wasm_bindgen(js_name = "selectAllVisible")]
    pub fn select_all_visible(&mut self) {
        self.engine.select_all_visible();
        self.flush_events();
    }

    /// Push the host's `modelValue` into the engine.
    ///
    /// # Errors
    /// Fails if `items` is not an array of objects.
    #[wasm_bindgen(js_name = "setModelValue")]
    pub fn set_model_value(&mut self, items: JsValue) -> Result<(), JsValue> {
        let items: Vec<Item> = from_js(items)?;
        self.engine.set_model_value(items);
        Ok(())
    }

    /// Replace the dataset.
    ///
    /// # Errors
    /// Fails if `items` is not an array of objects.
    #[wasm_bindgen(js_name = "setItems")]
    pub fn set_items(&mut self, items: JsValue) -> Result<(), JsValue> {
        let rows: Vec<Row> = from_js(items)?;
        self.engine.set_items(rows);
        self.flush_events();
        Ok(())
    }

    /// Replace the headers.
    ///
    /// # Errors
    /// Fails on duplicate keys or invalid widths.
    #[wasm_bindgen(js_name = "setHeaders")]
    pub fn set_headers(&mut self, headers: JsValue) -> Result<(), JsValue> {
        let headers: Vec<Header> = from_js(headers)?;
        self.engine
            .set_headers(headers)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        #[cfg(target_arch = "wasm32")]
        dom::apply_template(&self.table, &self.engine.grid_template());
        Ok(())
    }

    /// Pointer move while dragging; requests a frame for the first move of
    /// a burst
    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, column: usize, client_x: f32, scroll_offset: f32, now_ms: f64) {
        let intent = ResizeIntent {
            target_column: column,
            client_x,
            scroll_offset,
        };
        if self.engine.pointer_move(intent, now_ms) {
            if let Some(callback) = self.frame_callback.as_ref() {
                let _ = callback.call0(&JsValue::NULL);
            }
        }
    }

    #[wasm_bindgen(js_name = "releaseResize")]
    pub fn release_resize(&mut self) -> Option<usize> {
        self.engine.release_resize()
    }

    /// Abandon a drag on window blur or visibility change
    #[wasm_bindgen(js_name = "cancelResize")]
    pub fn cancel_resize(&mut self) -> Option<usize> {
        self.engine.cancel_resize()
    }

    #[wasm_bindgen(js_name = "expireResize")]
    pub fn expire_resize(&mut self, now_ms: f64) -> bool {
        self.engine.expire_resize(now_ms)
    }
}

// ============================================================================
// DOM-bound operations
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Pointer-down on header cell `column`
    #[wasm_bindgen(js_name = "grabResize")]
    pub fn grab_resize(&mut self, column: usize) -> bool {
        let has_handle = dom::has_resize_handle(&self.table, column);
        self.engine.grab_resize(column, has_handle, dom::now_ms())
    }

    /// Animation-frame callback: apply the latest drag position
    #[wasm_bindgen(js_name = "onAnimationFrame")]
    pub fn on_animation_frame(&mut self) -> bool {
        let measure = dom::measure_header(&self.table);
        let changed = self.engine.on_animation_frame(&measure);
        if changed {
            dom::apply_template(&self.table, &self.engine.grid_template());
        }
        changed
    }

    /// Header style or column set changed: re-measure and re-pin everything
    #[wasm_bindgen(js_name = "onColumnsChanged")]
    pub fn on_columns_changed(&mut self) {
        let measure = dom::measure_header(&self.table);
        self.engine
            .on_structural_change(crate::view::StructuralChange::ColumnsChanged, &measure);
        dom::apply_template(&self.table, &self.engine.grid_template());
        dom::apply_fixed(&self.table, self.engine.fixed_layout(), 0);
    }

    /// Body rows were inserted: pin only the new rows
    #[wasm_bindgen(js_name = "onRowsAdded")]
    pub fn on_rows_added(&mut self, at: usize, count: usize) {
        let measure = dom::measure_header(&self.table);
        self.engine.on_structural_change(
            crate::view::StructuralChange::RowsAdded { at, count },
            &measure,
        );
        dom::apply_template(&self.table, &self.engine.grid_template());
        dom::apply_fixed(&self.table, self.engine.fixed_layout(), at);
    }

    #[wasm_bindgen(js_name = "onRowsRemoved")]
    pub fn on_rows_removed(&mut self, at: usize, count: usize) {
        let measure = dom::measure_header(&self.table);
        self.engine.on_structural_change(
            crate::view::StructuralChange::RowsRemoved { at, count },
            &measure,
        );
    }

    /// Milliseconds on the host clock, for `pointerMove` and `expireResize`
    #[wasm_bindgen]
    pub fn now() -> f64 {
        dom::now_ms()
    }
}
