//! Integration tests for the read-only audit.

use fieldmend_engine::{audit, audit_ids};
use fieldmend_foundation::{Dataset, FieldPath, RecordId, SubColumn, TrackerRow};

fn path(text: &str) -> FieldPath {
    FieldPath::parse(text).unwrap()
}

fn dataset() -> Dataset {
    Dataset::from_rows([
        TrackerRow::new("a01")
            .with_fields("Name,owner__r.Name")
            .with_query("Name = 'HQ'"),
        TrackerRow::new("a02")
            .with_filters(r#"[{"field":"Name","operator":"equals","value":"HQ"}]"#),
        TrackerRow::new("a03").with_fields("Name__c,FirstName"),
    ])
}

#[test]
fn audit_reports_contextual_paths_per_column() {
    let results = audit(&dataset(), &path("Name"));
    assert_eq!(results.len(), 2);

    let a01 = &results[0];
    assert_eq!(a01.record, RecordId::from("a01"));
    let paths: Vec<String> = a01.hits.iter().map(|h| h.path.to_string()).collect();
    assert!(paths.contains(&"Name".to_string()));
    assert!(paths.contains(&"owner__r.Name".to_string()));

    let bare = a01.hits.iter().find(|h| h.path == path("Name")).unwrap();
    assert!(bare.columns.contains(&SubColumn::Fields));
    assert!(bare.columns.contains(&SubColumn::Query));
}

#[test]
fn filter_references_are_flagged() {
    let results = audit(&dataset(), &path("Name"));
    let a02 = results
        .iter()
        .find(|r| r.record == RecordId::from("a02"))
        .unwrap();
    assert!(a02.hits.iter().any(|h| h.in_filters));
}

#[test]
fn lookalike_identifiers_never_audit() {
    let results = audit(&dataset(), &path("Name"));
    assert!(!results.iter().any(|r| r.record == RecordId::from("a03")));
}

#[test]
fn audit_ids_lists_affected_records_in_order() {
    let ids = audit_ids(&dataset(), &path("Name"));
    assert_eq!(ids, vec![RecordId::from("a01"), RecordId::from("a02")]);
}

#[test]
fn audit_never_modifies_the_dataset() {
    let dataset = dataset();
    let before = dataset.snapshot();
    let _ = audit(&dataset, &path("Name"));
    assert_eq!(
        dataset.get(&RecordId::from("a01")),
        before.get(&RecordId::from("a01"))
    );
}
