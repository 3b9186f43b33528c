//! Composed view: sort, window, selection and row classes together.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::visible_strings;
use fixtures::{HeaderBuilder, TableBuilder};
use gridkit::{compose_json, SortDirection, TableConfig, TableEngine};
use serde_json::{json, Value};

fn inventory() -> TableBuilder {
    TableBuilder::new()
        .show_select()
        .header(HeaderBuilder::new("name").type_class("text-short"))
        .header(
            HeaderBuilder::new("stock")
                .type_class("numeric")
                .style(json!(["low", "warn"]), "<", json!(5)),
        )
        .header(HeaderBuilder::new("state").style(json!("done"), "=", json!("shipped")))
        .items(json!([
            { "name": "bolt", "stock": 120, "state": "open" },
            { "name": "nut", "stock": 3, "state": "shipped" },
            { "name": "gear", "stock": 0, "state": "open" },
            { "name": "axle", "stock": 4, "state": "open" },
            { "name": "cog", "stock": 9, "state": "shipped" }
        ]))
}

#[test]
fn test_row_classes() {
    let engine = inventory().build();
    let classes: Vec<String> = engine.view().into_iter().map(|r| r.row_class).collect();
    // a zero stock value never matches, like any falsy operand
    assert_eq!(classes, vec!["", "low warn done", "", "low warn", "done"]);
}

#[test]
fn test_malformed_rule_is_skipped() {
    let engine = TableBuilder::new()
        .header(HeaderBuilder::new("stock").style(json!("x"), "~=", json!(5)))
        .header(
            HeaderBuilder::new("name").style(json!("y"), "=", Value::Null),
        )
        .items(json!([{ "stock": 5, "name": "a" }]))
        .build();
    assert_eq!(engine.view()[0].row_class, "");
}

#[test]
fn test_sort_then_window_then_select() {
    let mut engine = inventory().paginate(2).build();
    engine.do_sort("stock", Some(SortDirection::Desc));
    assert_eq!(visible_strings(&engine, "name"), vec!["bolt", "cog"]);

    engine.set_page(2);
    assert_eq!(visible_strings(&engine, "name"), vec!["axle", "nut"]);
    engine.select_all_visible();

    let snapshot = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(snapshot["currentPage"], json!(2));
    assert_eq!(snapshot["totalPages"], json!(3));
    assert_eq!(snapshot["visiblePages"], json!([1, 2, 3]));
    assert_eq!(snapshot["allSelected"], json!(true));
    assert_eq!(snapshot["rows"][1]["name"], json!("nut"));
    assert_eq!(snapshot["rows"][1]["itemSettings"], json!({ "isChecked": true }));
    assert_eq!(snapshot["rows"][1]["rowClass"], json!("low warn done"));
    assert_eq!(snapshot["headers"][1]["sortDirection"], json!("desc"));
    assert_eq!(snapshot["headers"][1]["hasSortableIcon"], json!(true));

    // the selection is untouched by paging away
    engine.set_page(1);
    assert_eq!(engine.selection().len(), 2);
    assert!(engine.view().iter().all(|r| !r.item_settings.is_checked));
}

#[test]
fn test_dataset_fields_pass_through() {
    let engine = TableBuilder::new()
        .headers(&["name"])
        .item(json!({ "name": "a", "meta": { "tags": ["x", "y"] }, "id": 7 }))
        .build();
    let row = serde_json::to_value(&engine.view()[0]).unwrap();
    assert_eq!(
        row,
        json!({
            "name": "a",
            "meta": { "tags": ["x", "y"] },
            "id": 7,
            "itemSettings": { "isChecked": false }
        })
    );
}

#[test]
fn test_config_round_trip_from_text() {
    let text = inventory().paginate(3).to_json().to_string();
    let config = TableConfig::from_json(&text).unwrap();
    assert_eq!(config.headers.len(), 3);
    assert_eq!(config.items.len(), 5);
    assert_eq!(config.options.pagination_options.per_page, 3);

    let engine = TableEngine::new(config).unwrap();
    assert_eq!(engine.registry().len(), 4);
    assert_eq!(engine.view().len(), 3);
}

#[test]
fn test_compose_json_export() {
    let text = inventory().to_json().to_string();
    let composed: Value = serde_json::from_str(&compose_json(&text).unwrap()).unwrap();
    assert_eq!(composed["rows"].as_array().unwrap().len(), 5);
    assert_eq!(
        composed["gridTemplate"],
        json!("auto minmax(150px, 1.67fr) minmax(150px, 1fr) minmax(150px, 1fr)")
    );
}
