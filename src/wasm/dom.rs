//! DOM glue: header measurement, template and sticky-offset application.
//!
//! The table is expected to be a CSS grid per row: `thead tr` and every
//! `tbody tr` receive the same `grid-template-columns`, and each cell is a
//! direct child of its row in column order.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::layout::{FixedColumnEntry, FixedLayout, MeasuredColumns};

const HEADER_ROW: &str = "thead tr";
const BODY_ROWS: &str = "tbody tr";
const ALL_ROWS: &str = "thead tr, tbody tr";

// Timing helper for drag timeouts.
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// Direct child elements of `parent`, in order
fn cells(parent: &Element) -> Vec<HtmlElement> {
    let Ok(list) = parent.query_selector_all(":scope > *") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Elements of `table` matching `selector`
fn rows(table: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = table.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Snapshot the header cells' geometry in one layout read
#[allow(clippy::cast_precision_loss)]
pub(crate) fn measure_header(table: &Element) -> MeasuredColumns {
    let Ok(Some(header_row)) = table.query_selector(HEADER_ROW) else {
        return MeasuredColumns::default();
    };
    let cells = cells(&header_row);
    MeasuredColumns {
        offsets: cells.iter().map(|c| c.offset_left() as f32).collect(),
        widths: cells.iter().map(|c| c.offset_width() as f32).collect(),
        font_size_px: None,
    }
}

/// Whether header cell `column` carries a resize handle
pub(crate) fn has_resize_handle(table: &Element, column: usize) -> bool {
    let Ok(Some(header_row)) = table.query_selector(HEADER_ROW) else {
        return false;
    };
    cells(&header_row)
        .get(column)
        .and_then(|cell| cell.query_selector(".resize-handle").ok().flatten())
        .is_some()
}

/// Write the shared track template onto the header row and every body row
pub(crate) fn apply_template(table: &Element, template: &str) {
    for row in rows(table, ALL_ROWS) {
        let _ = row
            .style()
            .set_property("grid-template-columns", template);
    }
}

fn apply_entries(row: &HtmlElement, entries: &[FixedColumnEntry]) {
    let cells = cells(row);
    let pinned = entries.len();
    for entry in entries {
        let Some(cell) = cells.get(entry.column) else {
            continue;
        };
        let style = cell.style();
        let _ = style.set_property("position", "sticky");
        let _ = style.set_property("left", &format!("{}px", entry.left_width));
        // negative order keeps pinned cells ahead of the rest, in pin order
        let _ = style.set_property("order", &format!("-{}", pinned - entry.new_position));
    }
}

/// Apply sticky offsets to the header and to rendered body rows.
///
/// With `from_row` set, only body rows from that position on are touched.
pub(crate) fn apply_fixed(table: &Element, layout: &FixedLayout, from_row: usize) {
    if from_row == 0 {
        for header_row in rows(table, HEADER_ROW) {
            apply_entries(&header_row, layout.header());
        }
    }
    for (i, row) in rows(table, BODY_ROWS).iter().enumerate().skip(from_row) {
        if let Some(entries) = layout.row(i) {
            apply_entries(row, entries);
        }
    }
}
