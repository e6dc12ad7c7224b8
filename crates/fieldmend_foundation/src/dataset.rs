//! Persistent collection of tracker rows.
//!
//! Backed by [`im::OrdMap`], so a [`Dataset::snapshot`] is an O(1)
//! structural share. Batch application and pre-modification backups both
//! lean on this: the original rows stay reachable however the edit goes.

use im::OrdMap;

use crate::row::{RecordId, TrackerRow};

/// An ordered, persistent collection of rows keyed by record id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    rows: OrdMap<RecordId, TrackerRow>,
}

impl Dataset {
    /// Creates an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset from rows. Later duplicates of an id win.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = TrackerRow>) -> Self {
        let mut dataset = Self::new();
        for row in rows {
            dataset.insert(row);
        }
        dataset
    }

    /// Inserts or replaces a row.
    pub fn insert(&mut self, row: TrackerRow) {
        self.rows.insert(row.id().clone(), row);
    }

    /// Returns a copy of this dataset with the row inserted or replaced.
    #[must_use]
    pub fn with_row(&self, row: TrackerRow) -> Self {
        Self {
            rows: self.rows.update(row.id().clone(), row),
        }
    }

    /// Looks up a row.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&TrackerRow> {
        self.rows.get(id)
    }

    /// Returns true if the record id exists.
    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.rows.contains_key(id)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows in record-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&RecordId, &TrackerRow)> {
        self.rows.iter()
    }

    /// Record ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.rows.keys()
    }

    /// A structurally-shared snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl FromIterator<TrackerRow> for Dataset {
    fn from_iter<I: IntoIterator<Item = TrackerRow>>(iter: I) -> Self {
        Self::from_rows(iter)
    }
}
