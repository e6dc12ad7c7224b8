//! Integration tests for logic renumbering after filter removal.

use fieldmend_edit::{logic, PositionRemap};

fn remap(removed: &[u32], total: usize) -> PositionRemap {
    PositionRemap::from_removed(removed, total)
}

#[test]
fn surviving_positions_shift_down() {
    let (out, deleted) = logic::renumber("1 AND 3", &remap(&[2], 3)).unwrap();
    assert_eq!(out, "1 AND 2");
    // Position 3 is renumbered, not deleted; the count tracks deletions.
    assert_eq!(deleted, 0);
}

#[test]
fn deleted_term_collapses_its_connective() {
    // The binary node collapses to the surviving sibling; no dangling AND.
    let (out, _) = logic::renumber("1 AND 2 OR 3", &remap(&[2], 3)).unwrap();
    assert_eq!(out, "1 OR 2");
}

#[test]
fn deleted_term_inside_a_group() {
    let (out, _) = logic::renumber("1 AND (2 OR 3)", &remap(&[2], 3)).unwrap();
    assert_eq!(out, "1 AND 2");
}

#[test]
fn removing_every_term_leaves_true() {
    let (out, _) = logic::renumber("1 AND 2", &remap(&[1, 2], 2)).unwrap();
    assert_eq!(out, "TRUE");
}

#[test]
fn identity_remap_is_a_no_op() {
    let (out, edits) = logic::renumber("1 AND (2 OR 3)", &remap(&[], 3)).unwrap();
    assert_eq!(out, "1 AND (2 OR 3)");
    assert_eq!(edits, 0);
}

#[test]
fn empty_logic_stays_true() {
    let (out, _) = logic::renumber("", &remap(&[1], 1)).unwrap();
    assert_eq!(out, "TRUE");
}

#[test]
fn malformed_logic_is_an_error() {
    assert!(logic::renumber("1 AND", &remap(&[1], 2)).is_err());
}

#[test]
fn validate_checks_position_range() {
    assert!(logic::validate("1 AND 2", 2).is_ok());
    assert!(logic::validate("1 AND 3", 2).is_err());
    assert!(logic::validate("TRUE", 0).is_ok());
}
