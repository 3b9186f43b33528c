use serde::{Deserialize, Serialize};

/// Default rows per page
pub const DEFAULT_PER_PAGE: usize = 10;

/// Default number of page buttons shown by the pager
pub const DEFAULT_MAX_VISIBLE_BUTTONS: usize = 5;

/// Pager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// Page count reported by an external source; derived locally when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(default = "default_max_visible_buttons")]
    pub max_visible_buttons: usize,
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

fn default_max_visible_buttons() -> usize {
    DEFAULT_MAX_VISIBLE_BUTTONS
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            total_pages: None,
            max_visible_buttons: DEFAULT_MAX_VISIBLE_BUTTONS,
        }
    }
}

/// How selected rows are matched against dataset rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "camelCase")]
pub enum SelectionPolicy {
    /// Deep structural equality over every field of the row
    #[default]
    DeepEquality,
    /// Equality of a single identifying field (e.g. `id`)
    KeyField(String),
}

/// Component props that shape engine behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    /// Delegate sorting to an external data source
    #[serde(default)]
    pub use_api_sorting: bool,
    #[serde(default)]
    pub is_pagination_mode_enabled: bool,
    /// The host renders its own pager and feeds only the current page
    #[serde(default)]
    pub has_external_pagination: bool,
    #[serde(default)]
    pub pagination_options: PaginationOptions,
    /// Render a checkbox column
    #[serde(default)]
    pub show_select: bool,
    #[serde(default)]
    pub single_select: bool,
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
    /// Floor of flexible tracks and of drag resizing, in pixels
    #[serde(default = "default_min_column_size")]
    pub min_column_size: f32,
    /// Grid template applied by a previous mount, if the host kept it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template: Option<String>,
}

fn default_min_column_size() -> f32 {
    crate::layout::MIN_SIZE_OF_COLUMN
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            use_api_sorting: false,
            is_pagination_mode_enabled: false,
            has_external_pagination: false,
            pagination_options: PaginationOptions::default(),
            show_select: false,
            single_select: false,
            selection_policy: SelectionPolicy::default(),
            min_column_size: crate::layout::MIN_SIZE_OF_COLUMN,
            grid_template: None,
        }
    }
}
