//! Column sizing model.
//!
//! Produces one track expression per column. The same list is applied to the
//! header row and every body row, which keeps cells aligned.
//!
//! Initial tracks, by priority:
//! - selectable column: `auto`, or its explicit width as a fixed track
//! - explicit width: fixed track; the width is also the drag floor
//! - otherwise: `minmax(min px, ratio fr)` with the ratio of the type class
//!
//! During a drag the resized column becomes a fixed track no narrower than
//! its floor, and every other flexible column is frozen to its rendered
//! width so neighbours do not reflow. Nothing snaps back on release.

use log::trace;

use super::measure::Measure;
use super::track::{format_template, Length, TrackSize};
use crate::registry::ColumnDef;

/// Default floor of flexible tracks and drag resizing, in pixels
pub const MIN_SIZE_OF_COLUMN: f32 = 150.0;

/// Sizing state of one column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub size: TrackSize,
    /// Drag floor taken from an explicit width
    pub custom_min_size: Option<Length>,
    pub resizable: bool,
}

/// Ordered track sizes for the whole table
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSizing {
    columns: Vec<Column>,
    min_size: f32,
}

impl ColumnSizing {
    /// Derive one track per column definition.
    ///
    /// `persisted` is the track list the host applied in an earlier pass. It
    /// is only honoured when it has one entry per column; a persisted track
    /// replaces every derived track except `auto`.
    pub fn new(defs: &[ColumnDef], min_size: f32, persisted: Option<&[TrackSize]>) -> Self {
        let persisted = persisted.filter(|tracks| tracks.len() == defs.len());
        let columns = defs
            .iter()
            .enumerate()
            .map(|(i, def)| {
                let mut column = initial_column(def, min_size);
                if let Some(track) = persisted.and_then(|tracks| tracks.get(i)) {
                    if column.size != TrackSize::Auto {
                        column.size = track.clone();
                    }
                }
                column
            })
            .collect();
        Self { columns, min_size }
    }

    /// Re-derive after a structural change to the header set.
    ///
    /// Columns that survive (matched by key) keep their current track, so a
    /// manual resize is never undone by adding or removing another column.
    pub fn rebuild(&mut self, defs: &[ColumnDef]) {
        let columns = defs
            .iter()
            .map(|def| {
                let mut column = initial_column(def, self.min_size);
                if let Some(previous) = self.columns.iter().find(|c| c.key == def.key) {
                    column.size = previous.size.clone();
                }
                column
            })
            .collect();
        self.columns = columns;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn min_size(&self) -> f32 {
        self.min_size
    }

    /// Track sizes in column order
    pub fn tracks(&self) -> Vec<TrackSize> {
        self.columns.iter().map(|c| c.size.clone()).collect()
    }

    /// The `grid-template-columns` value shared by header and rows
    pub fn template(&self) -> String {
        format_template(&self.tracks())
    }

    /// Apply one drag step to column `index` with the cursor-derived `width`.
    ///
    /// Returns false (and changes nothing) for an unknown or non-resizable
    /// column.
    pub fn resize(&mut self, index: usize, width: f32, measure: &dyn Measure) -> bool {
        let Some(column) = self.columns.get(index) else {
            return false;
        };
        if !column.resizable {
            return false;
        }

        let floor = column
            .custom_min_size
            .as_ref()
            .and_then(|len| measure.to_px(len).map(|px| (len.clone(), px)))
            .unwrap_or_else(|| (Length::px(self.min_size), self.min_size));
        let size = if width > floor.1 {
            TrackSize::Fixed(Length::px(width))
        } else {
            TrackSize::Fixed(floor.0)
        };
        trace!("resize column {index}: raw {width}px -> {size}");

        for (i, other) in self.columns.iter_mut().enumerate() {
            if i == index {
                other.size = size.clone();
            } else if other.size.is_flexible() {
                if let Some(rendered) = measure.rendered_width(i) {
                    other.size = TrackSize::Fixed(Length::px(rendered.trunc()));
                }
            }
        }
        true
    }
}

fn initial_column(def: &ColumnDef, min_size: f32) -> Column {
    let size = match (&def.width, def.selectable) {
        (Some(width), _) => TrackSize::Fixed(width.clone()),
        (None, true) => TrackSize::Auto,
        (None, false) => TrackSize::MinMax {
            min: Length::px(min_size),
            fr: def.ratio(),
        },
    };
    Column {
        key: def.key.clone(),
        size,
        custom_min_size: if def.selectable {
            None
        } else {
            def.width.clone()
        },
        resizable: def.resizable && !def.selectable,
    }
}
