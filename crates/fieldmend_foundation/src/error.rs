//! Error types for the Fieldmend system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Two conditions are deliberately *not* errors: an instruction that does
//! not apply to a sub-column (informational, reported in the change
//! summary) and a timestamp tie broken by log order during replay
//! (a warning in the replay report).

use thiserror::Error;

use crate::row::RecordId;

/// The result type used throughout Fieldmend.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Fieldmend operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a malformed field path error.
    #[must_use]
    pub fn malformed_path(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedPath {
            text: text.into(),
            reason: reason.into(),
        })
    }

    /// Creates a sub-language parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>, offset: usize) -> Self {
        Self::new(ErrorKind::ParseError {
            message: message.into(),
            offset,
        })
    }

    /// Creates a row edit error for the given record and column.
    #[must_use]
    pub fn row_edit(record: RecordId, column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::RowEdit {
            record,
            column: column.into(),
            reason: reason.into(),
        })
    }

    /// Creates an unknown record error.
    #[must_use]
    pub fn unknown_record(record: RecordId) -> Self {
        Self::new(ErrorKind::UnknownRecord(record))
    }

    /// Creates an unknown column error.
    #[must_use]
    pub fn unknown_column(record: RecordId, column: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownColumn {
            record,
            column: column.into(),
        })
    }

    /// Creates an invalid timestamp error.
    #[must_use]
    pub fn invalid_timestamp(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTimestamp { text: text.into() })
    }

    /// Returns true if this error aborts a single row rather than a batch.
    #[must_use]
    pub fn is_row_scoped(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::RowEdit { .. } | ErrorKind::UnknownColumn { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A field reference could not be parsed.
    #[error("malformed field path '{text}': {reason}")]
    MalformedPath {
        /// The input text that failed to parse.
        text: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A sub-language expression could not be parsed.
    #[error("parse error at offset {offset}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Byte offset in the source text.
        offset: usize,
    },

    /// Existing sub-column content is not well-formed enough to edit.
    ///
    /// The affected row is left unmodified; the caller decides whether
    /// to skip the row or abort the batch.
    #[error("cannot edit {column} of record {record}: {reason}")]
    RowEdit {
        /// The record whose edit was aborted.
        record: RecordId,
        /// The sub-column that could not be edited.
        column: String,
        /// Why the edit failed.
        reason: String,
    },

    /// The record id does not exist in the dataset.
    #[error("record not found: {0}")]
    UnknownRecord(RecordId),

    /// The named column does not exist on the record.
    #[error("column '{column}' not present on record {record}")]
    UnknownColumn {
        /// The record that was queried.
        record: RecordId,
        /// The column name that was not found.
        column: String,
    },

    /// A timestamp string could not be parsed.
    #[error("unable to parse timestamp '{text}'")]
    InvalidTimestamp {
        /// The input text.
        text: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
