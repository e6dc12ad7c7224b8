//! Integration tests for Error types
//!
//! Tests error construction, display, and row-scoping.

use fieldmend_foundation::{Error, ErrorKind, RecordId};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_malformed_path() {
    let err = Error::malformed_path("a..b", "empty segment");
    assert!(matches!(err.kind, ErrorKind::MalformedPath { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("a..b"));
}

#[test]
fn error_parse() {
    let err = Error::parse("unexpected token", 12);
    assert!(matches!(err.kind, ErrorKind::ParseError { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("12"));
    assert!(msg.contains("unexpected token"));
}

#[test]
fn error_invalid_timestamp() {
    let err = Error::invalid_timestamp("not a date");
    assert!(matches!(err.kind, ErrorKind::InvalidTimestamp { .. }));
    assert!(format!("{err}").contains("not a date"));
}

// =============================================================================
// Row Scoping
// =============================================================================

#[test]
fn row_edit_and_unknown_column_are_row_scoped() {
    let row_edit = Error::row_edit(RecordId::from("a01"), "Logic", "dangling operator");
    let unknown_column = Error::unknown_column(RecordId::from("a01"), "Owner");

    assert!(row_edit.is_row_scoped());
    assert!(unknown_column.is_row_scoped());
}

#[test]
fn batch_level_errors_are_not_row_scoped() {
    assert!(!Error::unknown_record(RecordId::from("a01")).is_row_scoped());
    assert!(!Error::invalid_timestamp("x").is_row_scoped());
    assert!(!Error::parse("bad", 0).is_row_scoped());
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn row_edit_display_names_record_and_column() {
    let err = Error::row_edit(RecordId::from("a0Y5e000001"), "Logic", "unbalanced parens");
    let msg = format!("{err}");
    assert!(msg.contains("a0Y5e000001"));
    assert!(msg.contains("Logic"));
    assert!(msg.contains("unbalanced parens"));
}
