//! Benchmarks for sorting and view composition.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridkit::sort::SortEngine;
use gridkit::{item_from_value, Row, SortDirection, TableConfig, TableEngine};
use serde_json::json;

/// Deterministic rows with a few repeated keys so ties exercise the
/// secondary comparisons
fn rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            Row::new(item_from_value(json!({
                "id": i,
                "name": format!("item-{:05}", (i * 7919) % count),
                "group": i % 13,
                "price": ((i * 31) % 1000) as f64 / 10.0,
            })))
        })
        .collect()
}

fn config(count: usize) -> TableConfig {
    let text = json!({
        "headers": [
            { "text": "Name", "value": "name", "typeClass": "text-short" },
            { "text": "Group", "value": "group", "typeClass": "numeric" },
            { "text": "Price", "value": "price", "typeClass": "numeric" }
        ],
        "items": rows(count),
        "showSelect": true,
        "isPaginationModeEnabled": true,
        "paginationOptions": { "perPage": 50 }
    })
    .to_string();
    TableConfig::from_json(&text).expect("valid config")
}

/// Single-key sort over growing datasets
fn bench_single_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_key");
    for count in [1_000usize, 10_000, 100_000] {
        let data = rows(count);
        let mut engine = SortEngine::default();
        engine.toggle("name", None);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("sorted_indices", count), &data, |b, data| {
            b.iter(|| engine.sorted_indices(black_box(data)))
        });
    }
    group.finish();
}

/// Three keys with many ties on the primary key
fn bench_multi_key(c: &mut Criterion) {
    let data = rows(10_000);
    let mut engine = SortEngine::default();
    engine.toggle("group", None);
    engine.toggle("price", Some(SortDirection::Desc));
    engine.toggle("name", None);

    c.bench_function("multi_key_10k", |b| {
        b.iter(|| {
            let mut copy = data.clone();
            engine.sort_rows(black_box(&mut copy));
            copy
        })
    });
}

/// Sort toggle plus composing one page, as a header click does
fn bench_compose_page(c: &mut Criterion) {
    let mut engine = TableEngine::new(config(10_000)).expect("engine mounts");

    c.bench_function("toggle_and_compose_10k", |b| {
        b.iter(|| {
            engine.do_sort("price", None);
            black_box(engine.view().len())
        })
    });
}

/// Select-all on a page of a large table
fn bench_select_all(c: &mut Criterion) {
    let mut engine = TableEngine::new(config(10_000)).expect("engine mounts");
    engine.set_page(7);

    c.bench_function("select_all_visible_10k", |b| {
        b.iter(|| {
            engine.select_all_visible();
            engine.drain_events().len()
        })
    });
}

criterion_group!(
    benches,
    bench_single_key,
    bench_multi_key,
    bench_compose_page,
    bench_select_all,
);

criterion_main!(benches);
