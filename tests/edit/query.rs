//! Integration tests for query-clause editing.

use fieldmend_edit::query;
use fieldmend_foundation::FieldPath;

fn path(text: &str) -> FieldPath {
    FieldPath::parse(text).unwrap()
}

#[test]
fn removing_a_comparison_collapses_its_connective() {
    let (out, removed) =
        query::remove("a__c = 1 AND b__c = 2 OR c__c = 3", &[path("b__c")]).unwrap();
    assert_eq!(out, "a__c = 1 OR c__c = 3");
    assert_eq!(removed, 1);
}

#[test]
fn prefix_removal_takes_relationship_references() {
    let (out, removed) =
        query::remove("site__r.Name = 'HQ' AND status__c = 'Open'", &[path("site__r")]).unwrap();
    assert_eq!(out, "status__c = 'Open'");
    assert_eq!(removed, 1);
}

#[test]
fn terminal_segment_does_not_match_a_dotted_reference() {
    let source = "site__r.status__c = 'x' AND status__c = 'y'";
    let (out, removed) = query::remove(source, &[path("status__c")]).unwrap();
    assert_eq!(out, "site__r.status__c = 'x'");
    assert_eq!(removed, 1);
}

#[test]
fn removing_every_comparison_empties_the_clause() {
    let (out, removed) = query::remove("a__c = 1 OR a__c = 2", &[path("a__c")]).unwrap();
    assert_eq!(out, "");
    assert_eq!(removed, 2);
}

#[test]
fn empty_query_stays_empty() {
    let (out, removed) = query::remove("", &[path("a__c")]).unwrap();
    assert_eq!(out, "");
    assert_eq!(removed, 0);
}

#[test]
fn swap_rewrites_exact_paths_only() {
    let source = "C.D = 1 AND C.D.E = 2";
    let (out, swapped) = query::swap(source, &path("C.D"), &path("C.G")).unwrap();
    assert_eq!(out, "C.G = 1 AND C.D.E = 2");
    assert_eq!(swapped, 1);
}

#[test]
fn references_is_structural() {
    assert!(query::references("a__c = 1", &[path("a__c")]).unwrap());
    assert!(query::references("site__r.Name = 'x'", &[path("site__r")]).unwrap());
    assert!(!query::references("sub_a__c = 1", &[path("a__c")]).unwrap());
    assert!(!query::references("", &[path("a__c")]).unwrap());
}

#[test]
fn malformed_query_is_an_error() {
    assert!(query::remove("a__c =", &[path("a__c")]).is_err());
    assert!(query::swap("AND", &path("a"), &path("b")).is_err());
}
