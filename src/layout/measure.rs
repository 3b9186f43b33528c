//! Host measurement primitives.

use super::Length;

/// Rendered geometry the host reports for header cells.
///
/// Column indices follow registry order. `None` means the host could not
/// measure the cell (not mounted, hidden); callers leave such columns alone.
pub trait Measure {
    /// Left edge of the header cell relative to the table
    fn offset_left(&self, column: usize) -> Option<f32>;

    /// Rendered width of the header cell
    fn rendered_width(&self, column: usize) -> Option<f32>;

    /// Convert a length to pixels in the host's context
    fn to_px(&self, length: &Length) -> Option<f32> {
        length.to_px()
    }
}

/// A snapshot of header geometry taken by the host in one layout pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasuredColumns {
    pub offsets: Vec<f32>,
    pub widths: Vec<f32>,
    /// Root font size for `rem`/`em` conversion
    pub font_size_px: Option<f32>,
}

impl MeasuredColumns {
    /// Build a snapshot from widths alone; offsets are their prefix sums
    pub fn from_widths(widths: Vec<f32>) -> Self {
        let mut offsets = Vec::with_capacity(widths.len());
        let mut x = 0.0;
        for w in &widths {
            offsets.push(x);
            x += w;
        }
        Self {
            offsets,
            widths,
            font_size_px: None,
        }
    }
}

impl Measure for MeasuredColumns {
    fn offset_left(&self, column: usize) -> Option<f32> {
        self.offsets.get(column).copied()
    }

    fn rendered_width(&self, column: usize) -> Option<f32> {
        self.widths.get(column).copied()
    }

    fn to_px(&self, length: &Length) -> Option<f32> {
        match (length.unit.as_str(), self.font_size_px) {
            ("rem" | "em", Some(font)) => Some(length.value * font),
            _ => length.to_px(),
        }
    }
}
