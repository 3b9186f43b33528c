//! Column registry: normalizes header configuration into the facts the
//! sizing and pinning passes need.

use std::collections::HashSet;

use crate::error::{GridError, Result};
use crate::layout::{parse_length, Length};
use crate::types::{Header, TypeClass};

/// Key of the synthetic checkbox column added when selection is shown
pub const SELECT_COLUMN_KEY: &str = "__select";

/// Sizing-relevant facts about one visible column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// The header's `value`
    pub key: String,
    pub type_class: Option<TypeClass>,
    /// Explicit width, unit preserved
    pub width: Option<Length>,
    pub fixed: bool,
    pub selectable: bool,
    pub resizable: bool,
    pub sortable: bool,
}

impl ColumnDef {
    /// Normalize one header.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidLength`] if the header's width does not parse.
    pub fn from_header(header: &Header) -> Result<Self> {
        let width = header.width.as_deref().map(parse_length).transpose()?;
        Ok(Self {
            key: header.value.clone(),
            type_class: header.type_class,
            width,
            fixed: header.fixed,
            selectable: header.selectable,
            resizable: header.resizable,
            sortable: header.sortable,
        })
    }

    /// The checkbox column: pinned, selectable, sized to content
    pub fn select_column() -> Self {
        Self {
            key: SELECT_COLUMN_KEY.to_string(),
            type_class: None,
            width: None,
            fixed: true,
            selectable: true,
            resizable: false,
            sortable: false,
        }
    }

    /// Flexible track ratio; 1 when no type class is set
    pub fn ratio(&self) -> f32 {
        self.type_class.map_or(1.0, TypeClass::ratio)
    }
}

/// Ordered column definitions, one per visible header
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    defs: Vec<ColumnDef>,
}

impl ColumnRegistry {
    /// Build the registry from headers, prepending the checkbox column when
    /// `show_select` is set.
    ///
    /// # Errors
    /// Returns [`GridError::DuplicateColumn`] if two headers share a `value`,
    /// or [`GridError::InvalidLength`] for an unparseable width.
    pub fn new(headers: &[Header], show_select: bool) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut defs = Vec::with_capacity(headers.len() + usize::from(show_select));
        if show_select {
            defs.push(ColumnDef::select_column());
            seen.insert(SELECT_COLUMN_KEY.to_string());
        }
        for header in headers {
            if !seen.insert(header.value.clone()) {
                return Err(GridError::DuplicateColumn(header.value.clone()));
            }
            defs.push(ColumnDef::from_header(header)?);
        }
        Ok(Self { defs })
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColumnDef> {
        self.defs.get(index)
    }

    /// Position of the column with this key
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.defs.iter().position(|def| def.key == key)
    }

    /// Pinned flag of every column, in order
    pub fn pinned_flags(&self) -> Vec<bool> {
        self.defs.iter().map(|def| def.fixed).collect()
    }
}
