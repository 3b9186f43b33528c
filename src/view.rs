//! View composer and the table engine context.
//!
//! [`TableEngine`] owns one table instance: headers, the annotated dataset,
//! sizing and drag state, the sort key list, the selection and the current
//! page. Row rendering reads [`TableEngine::view`], which applies
//! sort, then the page window, then selection and conditional-class
//! annotation. Layout reads [`TableEngine::grid_template`] and
//! [`TableEngine::fixed_layout`]. The two flows share nothing but the
//! engine.
//!
//! Events that the host must forward (`update:modelValue`,
//! `handle-api-sorting`) are queued and collected with
//! [`TableEngine::drain_events`].

use std::ops::RangeInclusive;

use log::{debug, warn};
use serde::Serialize;

use crate::conditional::row_classes;
use crate::config::TableConfig;
use crate::equality::same_row;
use crate::error::Result;
use crate::layout::{
    parse_template, CellMetrics, ColumnSizing, FixedLayout, Measure, ResizeIntent, ResizeSession,
};
use crate::pagination::{self, Windowing};
use crate::registry::ColumnRegistry;
use crate::selection::Selection;
use crate::sort::{SortChange, SortEngine, SortMode};
use crate::types::{Header, Item, ItemSettings, Row, SortDirection, SortableField, TableOptions};

/// An event for the host to forward to its listeners
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum TableEvent {
    /// The selection changed through an engine operation
    #[serde(rename = "update:modelValue")]
    UpdateModelValue(Vec<Item>),
    /// The sort key list changed while sorting is delegated
    #[serde(rename = "handle-api-sorting")]
    HandleApiSorting(Vec<SortableField>),
}

/// A structural mutation the host observed in the rendered table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralChange {
    /// A header style attribute changed, or columns were added, removed or resized
    ColumnsChanged,
    /// `count` body rows were inserted at rendered position `at`
    RowsAdded { at: usize, count: usize },
    /// `count` body rows starting at rendered position `at` were removed
    RowsRemoved { at: usize, count: usize },
}

/// One row as handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedRow<'a> {
    /// Position of the row in the dataset
    #[serde(skip)]
    pub index: usize,
    #[serde(flatten)]
    pub item: &'a Item,
    #[serde(rename = "itemSettings")]
    pub item_settings: ItemSettings,
    /// Classes from matching conditional style rules
    #[serde(rename = "rowClass", skip_serializing_if = "String::is_empty")]
    pub row_class: String,
}

/// Everything a renderer needs for one paint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot<'a> {
    pub headers: &'a [Header],
    pub rows: Vec<ComposedRow<'a>>,
    pub grid_template: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub visible_pages: Vec<usize>,
    pub all_selected: bool,
    pub some_unselected: bool,
}

/// Interaction state of one table
#[derive(Debug, Clone)]
pub struct TableEngine {
    options: TableOptions,
    headers: Vec<Header>,
    rows: Vec<Row>,
    registry: ColumnRegistry,
    sizing: ColumnSizing,
    resize: ResizeSession,
    fixed: FixedLayout,
    sort: SortEngine,
    selection: Selection,
    windowing: Windowing,
    current_page: usize,
    /// Dataset indices in sorted order
    order: Vec<usize>,
    events: Vec<TableEvent>,
}

impl TableEngine {
    /// Mount a table from its configuration.
    ///
    /// # Errors
    /// Fails when the headers cannot form a column registry (duplicate
    /// `value` keys, unparseable widths).
    pub fn new(config: TableConfig) -> Result<Self> {
        let TableConfig {
            headers,
            items,
            model_value,
            options,
        } = config;

        let registry = ColumnRegistry::new(&headers, options.show_select)?;
        let persisted = match options.grid_template.as_deref().map(parse_template) {
            Some(Ok(tracks)) => Some(tracks),
            Some(Err(e)) => {
                warn!("ignoring persisted grid template: {e}");
                None
            }
            None => None,
        };
        let sizing = ColumnSizing::new(
            registry.columns(),
            options.min_column_size,
            persisted.as_deref(),
        );
        let mode = if options.use_api_sorting {
            SortMode::Delegated
        } else {
            SortMode::Local
        };

        let mut rows = items;
        let mut selection =
            Selection::new(options.selection_policy.clone(), options.single_select);
        selection.set_items(model_value, &mut rows);

        let mut engine = Self {
            windowing: Windowing::from_options(&options),
            options,
            headers,
            rows,
            registry,
            sizing,
            resize: ResizeSession::default(),
            fixed: FixedLayout::default(),
            sort: SortEngine::new(mode),
            selection,
            current_page: 1,
            order: Vec::new(),
            events: Vec::new(),
        };
        engine.sort.annotate(&mut engine.headers);
        engine.refresh_order();
        debug!(
            "table mounted: {} columns, {} rows, {:?} windowing",
            engine.registry.len(),
            engine.rows.len(),
            engine.windowing
        );
        Ok(engine)
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Headers with their current sort annotations
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// The annotated dataset in incoming order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn sizing(&self) -> &ColumnSizing {
        &self.sizing
    }

    pub fn sort_engine(&self) -> &SortEngine {
        &self.sort
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn windowing(&self) -> Windowing {
        self.windowing
    }

    // --- sorting ---

    /// Advance `field` through its sort cycle.
    ///
    /// `initial` overrides the header's `defaultSort` as the first
    /// direction. Unknown or unsortable fields are ignored and yield `None`.
    pub fn do_sort(&mut self, field: &str, initial: Option<SortDirection>) -> Option<SortChange> {
        let Some(header) = self.headers.iter().find(|h| h.value == field) else {
            debug!("sort on unknown field '{field}' ignored");
            return None;
        };
        if !header.sortable || header.selectable {
            debug!("sort on unsortable field '{field}' ignored");
            return None;
        }
        let initial = initial.or(header.default_sort);
        let change = self.sort.toggle(field, initial);
        self.sort.annotate(&mut self.headers);
        self.refresh_order();
        if self.sort.mode() == SortMode::Delegated {
            self.events
                .push(TableEvent::HandleApiSorting(self.sort.to_api_fields()));
        }
        Some(change)
    }

    /// Drop every sort key
    pub fn clear_sort(&mut self) {
        if self.sort.is_empty() {
            return;
        }
        self.sort.clear();
        self.sort.annotate(&mut self.headers);
        self.refresh_order();
        if self.sort.mode() == SortMode::Delegated {
            self.events.push(TableEvent::HandleApiSorting(Vec::new()));
        }
    }

    fn refresh_order(&mut self) {
        self.order = self.sort.sorted_indices(&self.rows);
    }

    // --- pagination ---

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Page count: reported by the host when it pages externally, otherwise
    /// derived from the dataset length. Without pagination everything is
    /// one page.
    pub fn total_pages(&self) -> usize {
        let per_page = self.options.pagination_options.per_page;
        match self.windowing {
            Windowing::Disabled => usize::from(!self.rows.is_empty()),
            Windowing::Local => pagination::page_count(self.rows.len(), per_page),
            Windowing::External => self
                .options
                .pagination_options
                .total_pages
                .unwrap_or_else(|| pagination::page_count(self.rows.len(), per_page)),
        }
    }

    /// Move to `page`, clamped into range; returns the page now current
    pub fn set_page(&mut self, page: usize) -> usize {
        self.current_page = pagination::clamp_page(page, self.total_pages());
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.current_page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> usize {
        self.set_page(1)
    }

    pub fn last_page(&mut self) -> usize {
        self.set_page(self.total_pages())
    }

    /// Page numbers for the pager buttons
    pub fn visible_pages(&self) -> RangeInclusive<usize> {
        pagination::visible_pages(
            self.current_page,
            self.total_pages(),
            self.options.pagination_options.max_visible_buttons,
        )
    }

    /// Dataset indices of the rows on screen, in display order
    pub fn visible_indices(&self) -> Vec<usize> {
        match self.windowing {
            Windowing::Disabled | Windowing::External => self.order.clone(),
            Windowing::Local => pagination::window(
                &self.order,
                self.options.pagination_options.per_page,
                self.current_page,
            )
            .to_vec(),
        }
    }

    // --- composition ---

    /// Rows on screen with selection flags and conditional classes
    pub fn view(&self) -> Vec<ComposedRow<'_>> {
        self.visible_indices()
            .into_iter()
            .filter_map(|index| {
                self.rows.get(index).map(|row| ComposedRow {
                    index,
                    item: &row.item,
                    item_settings: row.item_settings,
                    row_class: row_classes(&self.headers, &row.item),
                })
            })
            .collect()
    }

    /// Full render state
    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let visible = self.visible_indices().len();
        ViewSnapshot {
            headers: &self.headers,
            rows: self.view(),
            grid_template: self.grid_template(),
            current_page: self.current_page,
            total_pages: self.total_pages(),
            visible_pages: self.visible_pages().collect(),
            all_selected: self.selection.all_selected(visible),
            some_unselected: self.selection.some_unselected(visible),
        }
    }

    // --- selection ---

    /// Toggle one item's membership and emit the new selection.
    ///
    /// An item is only added when it matches a row on screen; a member can
    /// always be removed. Returns false when the item was ignored.
    pub fn toggle_row(&mut self, item: &Item) -> bool {
        let policy = self.selection.policy();
        let on_screen = self
            .visible_indices()
            .into_iter()
            .filter_map(|i| self.rows.get(i))
            .any(|row| same_row(policy, &row.item, item));
        if !on_screen && !self.selection.contains(item) {
            debug!("ignoring toggle of a row that is not on screen");
            return false;
        }
        self.selection.toggle(item, &mut self.rows);
        self.emit_selection();
        true
    }

    /// Toggle the row at `position` of the current view.
    ///
    /// Returns false when there is no such row.
    pub fn toggle_visible(&mut self, position: usize) -> bool {
        let Some(item) = self
            .visible_indices()
            .get(position)
            .and_then(|&i| self.rows.get(i))
            .map(|row| row.item.clone())
        else {
            return false;
        };
        self.toggle_row(&item)
    }

    /// Select every visible row, or clear when all already are
    pub fn select_all_visible(&mut self) {
        let visible = self.visible_indices();
        self.selection.select_all_visible(&mut self.rows, &visible);
        self.emit_selection();
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(self.visible_indices().len())
    }

    pub fn some_unselected(&self) -> bool {
        self.selection.some_unselected(self.visible_indices().len())
    }

    /// The host pushed a new `modelValue`; nothing is emitted back
    pub fn set_model_value(&mut self, items: Vec<Item>) {
        self.selection.set_items(items, &mut self.rows);
    }

    fn emit_selection(&mut self) {
        self.events
            .push(TableEvent::UpdateModelValue(self.selection.items().to_vec()));
    }

    // --- dataset ---

    /// Replace the dataset.
    ///
    /// Selected items missing from the new rows are dropped, which emits
    /// the reduced selection. The current page is clamped into the new range.
    pub fn set_items(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        if self.selection.retain_present(&mut self.rows) {
            self.emit_selection();
        }
        self.refresh_order();
        self.current_page = pagination::clamp_page(self.current_page, self.total_pages());
        debug!("dataset replaced: {} rows", self.rows.len());
    }

    /// Replace the headers, keeping sort keys and manual sizes of columns
    /// that survive.
    ///
    /// # Errors
    /// Fails on duplicate keys or unparseable widths; the engine is left
    /// unchanged.
    pub fn set_headers(&mut self, headers: Vec<Header>) -> Result<()> {
        let registry = ColumnRegistry::new(&headers, self.options.show_select)?;
        self.sizing.rebuild(registry.columns());
        self.registry = registry;
        self.headers = headers;
        self.sort.annotate(&mut self.headers);
        debug!("headers replaced: {} columns", self.registry.len());
        Ok(())
    }

    // --- column sizing ---

    /// `grid-template-columns` shared by the header and every row
    pub fn grid_template(&self) -> String {
        self.sizing.template()
    }

    /// Pointer-down on the resize handle of registry column `column`
    pub fn grab_resize(&mut self, column: usize, has_handle: bool, now_ms: f64) -> bool {
        let resizable = self
            .sizing
            .columns()
            .get(column)
            .is_some_and(|c| c.resizable);
        if !resizable {
            debug!("column {column} is not resizable");
            return false;
        }
        self.resize.grab(column, has_handle, now_ms)
    }

    /// Queue a pointer move; true means the host should request a frame
    pub fn pointer_move(&mut self, intent: ResizeIntent, now_ms: f64) -> bool {
        self.resize.pointer_move(intent, now_ms)
    }

    /// Apply the latest queued move.
    ///
    /// Returns true when the template changed.
    pub fn on_animation_frame(&mut self, measure: &dyn Measure) -> bool {
        let Some(intent) = self.resize.take_frame() else {
            return false;
        };
        let Some(offset_left) = measure.offset_left(intent.target_column) else {
            debug!(
                "column {} not measurable, resize frame dropped",
                intent.target_column
            );
            return false;
        };
        let before = self.sizing.template();
        self.sizing
            .resize(intent.target_column, intent.width(offset_left), measure)
            && self.sizing.template() != before
    }

    /// Pointer-up
    pub fn release_resize(&mut self) -> Option<usize> {
        self.resize.release()
    }

    /// Window blur or hidden tab
    pub fn cancel_resize(&mut self) -> Option<usize> {
        self.resize.cancel()
    }

    /// Cancel a drag that has seen no pointer events for too long
    pub fn expire_resize(&mut self, now_ms: f64) -> bool {
        self.resize.expire_if_stale(now_ms)
    }

    pub fn active_resize(&self) -> Option<usize> {
        self.resize.active_column()
    }

    // --- pinned columns ---

    pub fn fixed_layout(&self) -> &FixedLayout {
        &self.fixed
    }

    /// React to a structural mutation of the rendered table.
    ///
    /// Column changes recompute the header and every rendered row; row
    /// insertions recompute only the inserted rows. Returns the number of
    /// body rows recomputed.
    pub fn on_structural_change(&mut self, change: StructuralChange, measure: &dyn Measure) -> usize {
        let header = self.header_cells(measure);
        let recomputed = match change {
            StructuralChange::ColumnsChanged => {
                let rendered = self.visible_indices().len();
                self.fixed = FixedLayout::uniform(&header, rendered);
                rendered
            }
            StructuralChange::RowsAdded { at, count } => {
                let added = vec![header; count];
                self.fixed.insert_rows(at, &added)
            }
            StructuralChange::RowsRemoved { at, count } => {
                self.fixed.remove_rows(at..at.saturating_add(count));
                0
            }
        };
        debug!("structural change {change:?}: {recomputed} rows recomputed");
        recomputed
    }

    fn header_cells(&self, measure: &dyn Measure) -> Vec<CellMetrics> {
        self.registry
            .pinned_flags()
            .into_iter()
            .enumerate()
            .map(|(i, pinned)| CellMetrics {
                pinned,
                width: measure.rendered_width(i).unwrap_or(0.0),
            })
            .collect()
    }

    // --- events ---

    /// Take the queued events in emission order
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }
}
