//! CLI tool for gridkit - composes a table view from a JSON config
//!
//! Usage:
//!   gridkit_cli <table.json>                          # Output view JSON to stdout
//!   gridkit_cli <table.json> --sort name --sort price:desc --page 2
//!   gridkit_cli <table.json> --select-all -o view.json

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use gridkit::{SortDirection, TableConfig, TableEngine};

const USAGE: &str = "Usage: gridkit_cli <table.json> [--sort field[:asc|desc]]... [--page N] [--select-all] [-o output.json]";

struct Args {
    input: String,
    sorts: Vec<(String, Option<SortDirection>)>,
    page: Option<usize>,
    select_all: bool,
    output: Option<String>,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn parse_args() -> Args {
    let mut args = env::args().skip(1);
    let mut input = None;
    let mut sorts = Vec::new();
    let mut page = None;
    let mut select_all = false;
    let mut output = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sort" => {
                let spec = args.next().unwrap_or_else(|| fail(USAGE));
                let (field, direction) = match spec.split_once(':') {
                    Some((field, dir)) => match dir.parse::<SortDirection>() {
                        Ok(d) => (field.to_string(), Some(d)),
                        Err(e) => fail(&format!("Bad sort direction in '{spec}': {e}")),
                    },
                    None => (spec, None),
                };
                sorts.push((field, direction));
            }
            "--page" => {
                let value = args.next().unwrap_or_else(|| fail(USAGE));
                match value.parse() {
                    Ok(n) => page = Some(n),
                    Err(_) => fail(&format!("Bad page number: {value}")),
                }
            }
            "--select-all" => select_all = true,
            "-o" => output = Some(args.next().unwrap_or_else(|| fail(USAGE))),
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ if input.is_none() => input = Some(arg),
            _ => fail(USAGE),
        }
    }

    Args {
        input: input.unwrap_or_else(|| fail(USAGE)),
        sorts,
        page,
        select_all,
        output,
    }
}

fn main() {
    let args = parse_args();

    // Read input file
    let data = match fs::read(&args.input) {
        Ok(d) => d,
        Err(e) => fail(&format!("Error reading {}: {}", args.input, e)),
    };

    // Load config and mount
    let config = match TableConfig::from_slice(&data) {
        Ok(c) => c,
        Err(e) => fail(&format!("Error loading config: {e}")),
    };
    let mut engine = match TableEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => fail(&format!("Error building table: {e}")),
    };

    // Replay interactions
    for (field, direction) in &args.sorts {
        if engine.do_sort(field, *direction).is_none() {
            eprintln!("Skipping sort on '{field}': not a sortable column");
        }
    }
    if let Some(page) = args.page {
        let current = engine.set_page(page);
        if current != page {
            eprintln!("Page {page} out of range, showing page {current}");
        }
    }
    if args.select_all {
        engine.select_all_visible();
    }
    for event in engine.drain_events() {
        eprintln!("event: {}", serde_json::to_string(&event).unwrap());
    }

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&engine.snapshot()) {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {e}")),
    };

    // Output
    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
