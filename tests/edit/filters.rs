//! Integration tests for filter-clause editing.

use fieldmend_edit::{filters, PositionFate};
use fieldmend_foundation::FieldPath;

fn path(text: &str) -> FieldPath {
    FieldPath::parse(text).unwrap()
}

const CLAUSES: &str = r#"[
  {"field":"status__c","operator":"equals","value":"Open","label":"Status","sobject":"Tracker__c"},
  {"field":"site__r.Name","operator":"contains","value":"HQ","label":"Name","sobject":"site__c"},
  {"field":"phase__c","operator":"equals","value":"2","label":"Phase","sobject":"Tracker__c"}
]"#;

#[test]
fn removal_is_structural_and_reports_a_remap() {
    let (out, remap, removed) = filters::remove(CLAUSES, &path("site__r.Name")).unwrap();
    assert_eq!(removed, 1);

    let kept = filters::parse_filters(&out).unwrap();
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].field, path("status__c"));
    assert_eq!(kept[1].field, path("phase__c"));

    assert_eq!(remap.fate(2), Some(PositionFate::Removed));
    assert_eq!(remap.fate(3), Some(PositionFate::Renumbered(2)));
}

#[test]
fn prefix_removal_takes_dependent_clauses() {
    // Removing site__r removes every clause reached through it.
    let (_, _, removed) = filters::remove(CLAUSES, &path("site__r")).unwrap();
    assert_eq!(removed, 1);
}

#[test]
fn substring_fields_survive_removal() {
    let (out, _, removed) = filters::remove(CLAUSES, &path("status")).unwrap();
    assert_eq!(removed, 0);
    assert_eq!(filters::parse_filters(&out).unwrap().len(), 3);
}

#[test]
fn swap_regenerates_label_and_sobject() {
    let (out, swapped) =
        filters::swap(CLAUSES, &path("phase__c"), &path("phase_name__c"), "Tracker__c").unwrap();
    assert_eq!(swapped, 1);

    let clauses = filters::parse_filters(&out).unwrap();
    let clause = &clauses[2];
    assert_eq!(clause.field, path("phase_name__c"));
    assert_eq!(clause.label.as_deref(), Some("Phase Name"));
    assert_eq!(clause.sobject.as_deref(), Some("Tracker__c"));
    // Operator and value carry over untouched.
    assert_eq!(clause.operator, "equals");
}

#[test]
fn swap_to_relationship_path_updates_sobject() {
    let (out, swapped) =
        filters::swap(CLAUSES, &path("status__c"), &path("site__r.status__c"), "Tracker__c")
            .unwrap();
    assert_eq!(swapped, 1);
    let clauses = filters::parse_filters(&out).unwrap();
    assert_eq!(clauses[0].sobject.as_deref(), Some("site__c"));
}

#[test]
fn unknown_json_keys_round_trip() {
    let text = r#"[{"field":"a__c","operator":"equals","value":"1","custom":"kept"}]"#;
    let (out, _, removed) = filters::remove(text, &path("missing__c")).unwrap();
    assert_eq!(removed, 0);
    assert!(out.contains("custom"));
    assert!(out.contains("kept"));
}

#[test]
fn empty_column_means_no_clauses() {
    assert!(filters::parse_filters("").unwrap().is_empty());
    assert!(filters::parse_filters("  ").unwrap().is_empty());
    assert!(!filters::contains("", &path("a__c")).unwrap());
}

#[test]
fn malformed_json_is_an_error_not_a_silent_skip() {
    assert!(filters::parse_filters("[{not json").is_err());
    assert!(filters::remove("[{not json", &path("a__c")).is_err());
}

#[test]
fn removing_every_clause_leaves_an_empty_column() {
    let text = r#"[{"field":"a__c","operator":"equals","value":"1"}]"#;
    let (out, remap, removed) = filters::remove(text, &path("a__c")).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(out, "");
    assert_eq!(remap.surviving_count(), 0);
}
