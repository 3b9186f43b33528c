use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of one active sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl SortDirection {
    /// The other direction
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Wire token used by delegated sorting (`asc` / `desc`)
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Icon class shown next to the header text
    pub fn icon(self) -> &'static str {
        match self {
            SortDirection::Asc => "sort-up",
            SortDirection::Desc => "sort-down",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "up" => Ok(SortDirection::Asc),
            "desc" | "descending" | "down" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// One entry of the active sort-key list.
///
/// Serialized as `{ "field": "price", "order": "desc" }`, which is also the
/// payload emitted to an external data source in delegated mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortableField {
    pub field: String,
    pub order: SortDirection,
}

impl SortableField {
    pub fn new(field: impl Into<String>, order: SortDirection) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Signed token form: `field` for ascending, `-field` for descending
    pub fn signed(&self) -> String {
        match self.order {
            SortDirection::Asc => self.field.clone(),
            SortDirection::Desc => format!("-{}", self.field),
        }
    }

    /// Parse a signed token (`name`, `-price`)
    pub fn from_signed(token: &str) -> Option<Self> {
        let token = token.trim();
        let (field, order) = match token.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (token, SortDirection::Asc),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self::new(field, order))
    }
}
