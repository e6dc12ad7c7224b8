//! Field history events.

use chrono::NaiveDateTime;

use fieldmend_foundation::{Error, RecordId, Result};

/// Timestamp layouts accepted by [`parse_timestamp`], day first.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

/// Parses a day-first history timestamp such as `25/03/2024 14:30`.
///
/// # Errors
/// Returns [`fieldmend_foundation::ErrorKind::InvalidTimestamp`] when no
/// accepted layout matches.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| Error::invalid_timestamp(text))
}

/// One recorded change to one column of one record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEvent {
    /// The record the change belongs to.
    pub record: RecordId,
    /// The changed column's name.
    pub field: String,
    /// When the change happened.
    pub at: NaiveDateTime,
    /// The column value before the change.
    pub old_value: String,
    /// The column value after the change.
    pub new_value: String,
    /// Who made the change, when the log says.
    pub author: Option<String>,
    /// Position in the history log, a stable tie-break for equal
    /// timestamps: a later sequence is the more recent change.
    pub sequence: u64,
}

impl HistoryEvent {
    /// The (timestamp, log order) sort key, ascending = oldest first.
    #[must_use]
    pub fn sort_key(&self) -> (NaiveDateTime, u64) {
        (self.at, self.sequence)
    }
}
