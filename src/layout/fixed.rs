//! Offsets for pinned ("fixed") columns.
//!
//! Pinned cells are moved to the start of their row in their relative order
//! and get a sticky `left` equal to the summed width of the pinned cells
//! before them. Every row is its own container, so the pass runs once for
//! the header and once per body row; for one snapshot all results match.

use std::ops::Range;

use serde::Serialize;

/// Geometry of one cell as seen by the offset pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub pinned: bool,
    pub width: f32,
}

/// Placement of one pinned cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedColumnEntry {
    /// Index of the cell in its row before reordering
    pub column: usize,
    pub element_width: f32,
    /// Sticky left offset
    pub left_width: f32,
    /// Position within the pinned group
    pub new_position: usize,
}

/// Compute entries for the pinned cells of one row
pub fn compute_fixed_offsets(cells: &[CellMetrics]) -> Vec<FixedColumnEntry> {
    let mut entries: Vec<FixedColumnEntry> = Vec::new();
    for (column, cell) in cells.iter().enumerate() {
        if !cell.pinned {
            continue;
        }
        let (left_width, new_position) = match entries.last() {
            Some(prev) => (prev.left_width + prev.element_width, prev.new_position + 1),
            None => (0.0, 0),
        };
        entries.push(FixedColumnEntry {
            column,
            element_width: cell.width,
            left_width,
            new_position,
        });
    }
    entries
}

/// Cell order after moving pinned cells to the front
pub fn display_order(cells: &[CellMetrics]) -> Vec<usize> {
    let (mut pinned, rest): (Vec<usize>, Vec<usize>) =
        (0..cells.len()).partition(|&i| cells.get(i).is_some_and(|c| c.pinned));
    pinned.extend(rest);
    pinned
}

/// Sticky offsets for the header row and every body row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedLayout {
    header: Vec<FixedColumnEntry>,
    rows: Vec<Vec<FixedColumnEntry>>,
}

impl FixedLayout {
    /// Run the pass on the header and each row
    pub fn compute(header: &[CellMetrics], rows: &[Vec<CellMetrics>]) -> Self {
        Self {
            header: compute_fixed_offsets(header),
            rows: rows.iter().map(|r| compute_fixed_offsets(r)).collect(),
        }
    }

    /// Run the pass for `row_count` rows that share the header's geometry
    pub fn uniform(header: &[CellMetrics], row_count: usize) -> Self {
        Self {
            header: compute_fixed_offsets(header),
            rows: (0..row_count).map(|_| compute_fixed_offsets(header)).collect(),
        }
    }

    pub fn header(&self) -> &[FixedColumnEntry] {
        &self.header
    }

    pub fn row(&self, index: usize) -> Option<&[FixedColumnEntry]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows were inserted at `at`: run the pass for those rows only.
    ///
    /// Returns the number of rows recomputed.
    pub fn insert_rows(&mut self, at: usize, rows: &[Vec<CellMetrics>]) -> usize {
        let at = at.min(self.rows.len());
        let computed: Vec<_> = rows.iter().map(|r| compute_fixed_offsets(r)).collect();
        let count = computed.len();
        self.rows.splice(at..at, computed);
        count
    }

    /// Rows in `range` were removed
    pub fn remove_rows(&mut self, range: Range<usize>) {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        self.rows.drain(start..end);
    }

    /// Every row agrees with the header
    pub fn rows_consistent(&self) -> bool {
        self.rows.iter().all(|row| *row == self.header)
    }
}
