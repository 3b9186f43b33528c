//! Table configuration as delivered by the host.
//!
//! A configuration is one JSON object carrying the headers, the dataset,
//! the bound selection and the component props at the top level:
//!
//! ```json
//! {
//!   "headers": [{ "text": "Name", "value": "name", "typeClass": "text-short" }],
//!   "items": [{ "name": "a", "price": 2 }],
//!   "modelValue": [],
//!   "showSelect": true,
//!   "isPaginationModeEnabled": true,
//!   "paginationOptions": { "perPage": 25 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::{Header, Item, Row, TableOptions};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub headers: Vec<Header>,
    #[serde(default)]
    pub items: Vec<Row>,
    /// Items selected at mount time
    #[serde(default)]
    pub model_value: Vec<Item>,
    #[serde(flatten)]
    pub options: TableOptions,
}

impl TableConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    /// Returns [`GridError::Json`] for malformed input and
    /// [`GridError::Config`] for inconsistent options.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from raw JSON bytes.
    ///
    /// # Errors
    /// See [`TableConfig::from_json`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject option combinations the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        let pager = &self.options.pagination_options;
        if self.options.is_pagination_mode_enabled && pager.per_page == 0 {
            return Err(GridError::Config(
                "paginationOptions.perPage must be at least 1".to_string(),
            ));
        }
        if !self.options.min_column_size.is_finite() || self.options.min_column_size < 0.0 {
            return Err(GridError::Config(format!(
                "minColumnSize must be a non-negative number, got {}",
                self.options.min_column_size
            )));
        }
        Ok(())
    }
}
