//! Column layout: track sizing, drag resizing and pinned-column offsets.
//!
//! This module handles:
//! - Parsing and formatting CSS lengths and grid track expressions
//! - Deriving one track per column and updating it during drag resizes
//! - Coalescing pointer moves into one recompute per animation frame
//! - Computing sticky left offsets for pinned columns per row

mod fixed;
mod measure;
mod resize;
mod sizing;
mod track;

pub use fixed::{compute_fixed_offsets, display_order, CellMetrics, FixedColumnEntry, FixedLayout};
pub use measure::{Measure, MeasuredColumns};
pub use resize::{ResizeIntent, ResizeSession, DEFAULT_SESSION_TIMEOUT_MS};
pub use sizing::{Column, ColumnSizing, MIN_SIZE_OF_COLUMN};
pub use track::{
    format_template, parse_length, parse_template, Length, TrackSize, DEFAULT_FONT_SIZE_PX,
};
