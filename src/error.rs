//! Structured error types for gridkit.
//!
//! Interactive engine operations never fail; only configuration loading
//! (JSON payloads, width strings, header identity) returns these errors.

/// All errors that can occur while loading a table configuration.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A width or track string that cannot be parsed as a CSS length.
    #[error("Invalid length: {0}")]
    InvalidLength(String),

    /// Two headers share the same `value` key.
    #[error("Duplicate column key: {0}")]
    DuplicateColumn(String),

    /// Inconsistent table options.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
