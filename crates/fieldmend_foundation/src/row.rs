//! Tracker rows and their sub-columns.
//!
//! A [`TrackerRow`] is an immutable value: every edit produces a new row.
//! The four structured sub-columns carry the text-encoded sub-languages;
//! everything else the loader saw rides along untouched in the
//! pass-through map.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Opaque identifier of one tracker record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordId(String);

impl RecordId {
    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self(String::new())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The four structured sub-columns the consistency engine edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubColumn {
    /// Comma/semicolon-delimited field list.
    Fields,
    /// JSON-encoded filter clause list.
    Filters,
    /// Boolean expression over filter positions.
    Logic,
    /// Query clause over field paths.
    Query,
}

impl SubColumn {
    /// All sub-columns, in canonical order.
    pub const ALL: [Self; 4] = [Self::Fields, Self::Filters, Self::Logic, Self::Query];

    /// The canonical column name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fields => "Fields",
            Self::Filters => "Filters",
            Self::Logic => "Logic",
            Self::Query => "Query",
        }
    }

    /// Resolves a canonical column name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Fields" => Some(Self::Fields),
            "Filters" => Some(Self::Filters),
            "Logic" => Some(Self::Logic),
            "Query" => Some(Self::Query),
            _ => None,
        }
    }
}

impl fmt::Display for SubColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One tracker record: four structured sub-columns plus pass-through columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackerRow {
    /// Stable record identifier.
    id: RecordId,
    /// The `Fields` column text.
    fields: String,
    /// The `Filters` column text (JSON array).
    filters: String,
    /// The `Logic` column text.
    logic: String,
    /// The `Query` column text.
    query: String,
    /// Columns the core does not interpret, keyed by name.
    passthrough: BTreeMap<String, String>,
}

impl TrackerRow {
    /// Creates an empty row with the given record id.
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: String::new(),
            filters: String::new(),
            logic: String::new(),
            query: String::new(),
            passthrough: BTreeMap::new(),
        }
    }

    /// Sets the `Fields` column.
    #[must_use]
    pub fn with_fields(mut self, text: impl Into<String>) -> Self {
        self.fields = text.into();
        self
    }

    /// Sets the `Filters` column.
    #[must_use]
    pub fn with_filters(mut self, text: impl Into<String>) -> Self {
        self.filters = text.into();
        self
    }

    /// Sets the `Logic` column.
    #[must_use]
    pub fn with_logic(mut self, text: impl Into<String>) -> Self {
        self.logic = text.into();
        self
    }

    /// Sets the `Query` column.
    #[must_use]
    pub fn with_query(mut self, text: impl Into<String>) -> Self {
        self.query = text.into();
        self
    }

    /// Adds a pass-through column.
    #[must_use]
    pub fn with_passthrough(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.passthrough.insert(name.into(), value.into());
        self
    }

    /// The record identifier.
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Reads one structured sub-column.
    #[must_use]
    pub fn column(&self, column: SubColumn) -> &str {
        match column {
            SubColumn::Fields => &self.fields,
            SubColumn::Filters => &self.filters,
            SubColumn::Logic => &self.logic,
            SubColumn::Query => &self.query,
        }
    }

    /// Returns a copy of this row with one structured sub-column replaced.
    #[must_use]
    pub fn with_column(mut self, column: SubColumn, text: impl Into<String>) -> Self {
        let slot = match column {
            SubColumn::Fields => &mut self.fields,
            SubColumn::Filters => &mut self.filters,
            SubColumn::Logic => &mut self.logic,
            SubColumn::Query => &mut self.query,
        };
        *slot = text.into();
        self
    }

    /// Reads any column by name, structured or pass-through.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        if let Some(column) = SubColumn::from_name(name) {
            return Some(self.column(column));
        }
        self.passthrough.get(name).map(String::as_str)
    }

    /// Returns a copy with the named column replaced.
    ///
    /// # Errors
    /// Returns [`crate::ErrorKind::UnknownColumn`] if the row has no column
    /// with that name. History replay relies on this to report events that
    /// target columns the dataset never had.
    pub fn with_named(mut self, name: &str, value: impl Into<String>) -> Result<Self> {
        if let Some(column) = SubColumn::from_name(name) {
            return Ok(self.with_column(column, value));
        }
        match self.passthrough.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(self)
            }
            None => Err(Error::unknown_column(self.id.clone(), name)),
        }
    }

    /// Names of every column on this row, structured columns first.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        SubColumn::ALL
            .iter()
            .map(|c| c.name())
            .chain(self.passthrough.keys().map(String::as_str))
    }

    /// The pass-through columns.
    #[must_use]
    pub fn passthrough(&self) -> &BTreeMap<String, String> {
        &self.passthrough
    }
}
