//! Integration tests for TrackerRow and Dataset
//!
//! Row construction, named column access, and persistent snapshots.

use fieldmend_foundation::{
    Dataset, FieldPath, ModificationInstruction, RecordId, SubColumn, TrackerRow,
};

fn row() -> TrackerRow {
    TrackerRow::new("a01")
        .with_fields("status__c,phase__c")
        .with_filters(r#"[{"field":"status__c","operator":"equals","value":"Open"}]"#)
        .with_logic("1")
        .with_query("status__c = 'Open'")
        .with_passthrough("Owner", "Alice")
}

// =============================================================================
// Rows
// =============================================================================

#[test]
fn named_access_covers_structured_and_passthrough_columns() {
    let row = row();
    assert_eq!(row.get("Fields"), Some("status__c,phase__c"));
    assert_eq!(row.get("Owner"), Some("Alice"));
    assert_eq!(row.get("Missing"), None);
}

#[test]
fn with_named_rejects_unknown_columns() {
    let row = row();
    let updated = row.clone().with_named("Owner", "Bob").unwrap();
    assert_eq!(updated.get("Owner"), Some("Bob"));
    assert!(row.with_named("Nope", "x").is_err());
}

#[test]
fn sub_columns_round_trip_by_name() {
    for column in SubColumn::ALL {
        assert_eq!(SubColumn::from_name(column.name()), Some(column));
    }
    assert_eq!(SubColumn::from_name("Owner"), None);
}

// =============================================================================
// Dataset snapshots
// =============================================================================

#[test]
fn snapshot_is_unaffected_by_later_inserts() {
    let mut dataset = Dataset::from_rows([row()]);
    let snapshot = dataset.snapshot();

    dataset.insert(TrackerRow::new("a02").with_fields("x__c"));

    assert_eq!(dataset.len(), 2);
    assert_eq!(snapshot.len(), 1);
    assert!(!snapshot.contains(&RecordId::from("a02")));
}

#[test]
fn insert_replaces_by_record_id() {
    let mut dataset = Dataset::from_rows([row()]);
    dataset.insert(TrackerRow::new("a01").with_fields("replaced__c"));

    assert_eq!(dataset.len(), 1);
    assert_eq!(
        dataset.get(&RecordId::from("a01")).unwrap().column(SubColumn::Fields),
        "replaced__c"
    );
}

#[test]
fn ids_iterate_in_sorted_order() {
    let dataset = Dataset::from_rows([
        TrackerRow::new("c"),
        TrackerRow::new("a"),
        TrackerRow::new("b"),
    ]);
    let ids: Vec<&str> = dataset.ids().map(RecordId::as_str).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

// =============================================================================
// Instructions
// =============================================================================

#[test]
fn instruction_display_is_readable() {
    let path = |t: &str| FieldPath::parse(t).unwrap();
    let swap = ModificationInstruction::Swap {
        old: path("a__c"),
        new: path("b__c"),
    };
    let text = swap.to_string();
    assert!(text.contains("a__c"));
    assert!(text.contains("b__c"));
}
