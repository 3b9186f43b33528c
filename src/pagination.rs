//! Pagination windower and pager helpers.
//!
//! Pages are 1-indexed. Page `n` of size `p` covers `[(n-1)·p, n·p)` clipped
//! to the sequence.

use std::ops::{Range, RangeInclusive};

use crate::types::TableOptions;

/// How the current page is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Windowing {
    /// Pagination is off: the full sorted sequence is shown
    Disabled,
    /// Slice the locally sorted sequence
    Local,
    /// The host or the data source supplies only the current page
    External,
}

impl Windowing {
    /// Decide from the component props.
    ///
    /// Local slicing is bypassed when the host provides its own pager, or
    /// when sorting is delegated while pagination is on.
    pub fn from_options(options: &TableOptions) -> Self {
        if !options.is_pagination_mode_enabled {
            Windowing::Disabled
        } else if options.has_external_pagination || options.use_api_sorting {
            Windowing::External
        } else {
            Windowing::Local
        }
    }
}

/// Index range of page `page` (1-based) for `len` items
pub fn page_range(len: usize, per_page: usize, page: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(per_page).min(len);
    let end = page.saturating_mul(per_page).min(len).max(start);
    start..end
}

/// The slice of `items` shown on page `page`
pub fn window<T>(items: &[T], per_page: usize, page: usize) -> &[T] {
    items.get(page_range(items.len(), per_page, page)).unwrap_or_default()
}

/// Number of pages needed for `len` items; an empty sequence has none
pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        len.div_ceil(per_page)
    }
}

/// Clamp a requested page into `1..=total_pages` (page 1 when there are none)
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Contiguous page numbers shown as pager buttons.
///
/// The window starts one before the current page, is pinned to the first
/// page on page 1, and ends on the last page when the current page is last.
pub fn visible_pages(
    current: usize,
    total_pages: usize,
    max_visible_buttons: usize,
) -> RangeInclusive<usize> {
    if total_pages == 0 || max_visible_buttons == 0 {
        return 1..=0;
    }
    let current = clamp_page(current, total_pages);
    let start = if current == 1 {
        1
    } else if current == total_pages {
        total_pages.saturating_sub(max_visible_buttons - 1).max(1)
    } else {
        current - 1
    };
    let end = start
        .saturating_add(max_visible_buttons - 1)
        .min(total_pages);
    start..=end
}
