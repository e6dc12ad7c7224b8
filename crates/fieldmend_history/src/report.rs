//! Replay reports: what a reconstruction did and what it changed.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use fieldmend_foundation::TrackerRow;

/// How replay treated a field or an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayStatus {
    /// At least one change was undone.
    Applied,
    /// The event is at or before the cutoff; it belongs to the
    /// reconstructed past and was not undone.
    SkippedFuture,
    /// The field had events but none were undone.
    NoChange,
}

impl fmt::Display for ReplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Applied => "applied",
            Self::SkippedFuture => "skipped (within cutoff)",
            Self::NoChange => "no change",
        };
        write!(f, "{text}")
    }
}

/// One event's treatment during replay, in walk order (most recent
/// first).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayEntry {
    /// The changed column.
    pub field: String,
    /// The event timestamp.
    pub at: NaiveDateTime,
    /// What replay did with the event.
    pub status: ReplayStatus,
}

/// An event that could not be undone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayFailure {
    /// The column the event names.
    pub field: String,
    /// Why the undo failed.
    pub reason: String,
}

/// The result of reconstructing one row at a cutoff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconstructedRow {
    /// The rolled-back row.
    pub row: TrackerRow,
    /// Final status per field that had events.
    pub statuses: BTreeMap<String, ReplayStatus>,
    /// Per-event report, most recent first.
    pub entries: Vec<ReplayEntry>,
    /// Events naming columns the row does not have.
    pub failures: Vec<ReplayFailure>,
    /// Non-fatal replay warnings, e.g. ambiguous event order.
    pub warnings: Vec<String>,
}

impl ReconstructedRow {
    /// The final status of one field, if it had events.
    #[must_use]
    pub fn status(&self, field: &str) -> Option<ReplayStatus> {
        self.statuses.get(field).copied()
    }
}

/// One column whose reconstructed value differs from the current one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDelta {
    /// The column name.
    pub column: String,
    /// The current value.
    pub before: String,
    /// The reconstructed value.
    pub after: String,
}

/// Columns that differ between two rows, in column-name walk order.
#[must_use]
pub fn diff(before: &TrackerRow, after: &TrackerRow) -> Vec<ColumnDelta> {
    before
        .column_names()
        .filter_map(|name| {
            let old = before.get(name).unwrap_or_default();
            let new = after.get(name).unwrap_or_default();
            if old == new {
                None
            } else {
                Some(ColumnDelta {
                    column: name.to_string(),
                    before: old.to_string(),
                    after: new.to_string(),
                })
            }
        })
        .collect()
}
