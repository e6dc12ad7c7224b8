//! Integration tests for FieldPath matching
//!
//! Segment-exact occurrence scanning, prefix relationships, and the
//! label/sobject derivations used when regenerating filter clauses.

use fieldmend_foundation::FieldPath;
use proptest::prelude::*;

fn path(text: &str) -> FieldPath {
    FieldPath::parse(text).unwrap()
}

// =============================================================================
// Segment-exact matching
// =============================================================================

#[test]
fn status_does_not_match_inside_longer_identifiers() {
    let p = path("status__c");
    assert!(p.is_in("status__c,phase__c"));
    assert!(!p.is_in("sub_status__c"));
    assert!(!p.is_in("status__c_old"));
    assert!(!p.is_in("other_status__c,third"));
}

#[test]
fn dotted_path_must_match_every_segment() {
    let p = path("site__r.Name");
    assert!(p.is_in("a__c,site__r.Name,b__c"));
    assert!(!p.is_in("site__r.Name__c"));
    assert!(!p.is_in("offsite__r.Name"));
    assert!(!p.is_in("site__r.FirstName"));
}

#[test]
fn terminal_segment_alone_does_not_match_a_dotted_reference() {
    // A removal of status__c must not touch site__r.status__c.
    let p = path("status__c");
    assert!(!p.is_in("site__r.status__c"));
}

#[test]
fn occurrences_report_byte_ranges() {
    let p = path("a__c");
    let text = "a__c,b__c;a__c";
    let ranges = p.occurrences_in(text);
    assert_eq!(ranges.len(), 2);
    assert_eq!(&text[ranges[0].clone()], "a__c");
    assert_eq!(&text[ranges[1].clone()], "a__c");
}

// =============================================================================
// Prefix relationships
// =============================================================================

#[test]
fn is_prefix_of_is_segment_wise_and_proper() {
    let site = path("site__r");
    let name = path("site__r.Name");
    assert!(site.is_prefix_of(&name));
    assert!(!name.is_prefix_of(&site));
    assert!(!site.is_prefix_of(&site));
    assert!(!path("sit").is_prefix_of(&name));
}

// =============================================================================
// Contextual occurrences
// =============================================================================

#[test]
fn contextual_occurrences_follow_relationship_hops() {
    let needle = path("Name");
    let found = FieldPath::contextual_occurrences("owner__r.Name,Name,Name__c", &needle);
    let rendered: Vec<String> = found.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["Name", "owner__r.Name"]);
}

// =============================================================================
// Label and sobject derivation
// =============================================================================

#[test]
fn filter_label_title_cases_the_terminal() {
    assert_eq!(path("phase_name__c").filter_label(), "Phase Name");
    assert_eq!(path("site__r.owner_name__c").filter_label(), "Owner Name");
}

#[test]
fn filter_sobject_resolves_the_penultimate_hop() {
    assert_eq!(path("status__c").filter_sobject("Tracker__c"), "Tracker__c");
    assert_eq!(path("site__r.status__c").filter_sobject("Tracker__c"), "site__c");
    assert_eq!(path("Account.Name").filter_sobject("Tracker__c"), "Account");
}

// =============================================================================
// Properties
// =============================================================================

prop_compose! {
    fn segment()(head in "[A-Za-z]", tail in "[A-Za-z0-9_]{0,8}") -> String {
        format!("{head}{tail}")
    }
}

proptest! {
    #[test]
    fn never_matches_a_suffix_extended_identifier(seg in segment()) {
        let p = FieldPath::parse(&seg).unwrap();
        let extended = format!("{seg}x");
        prop_assert!(!p.is_in(&extended));
    }

    #[test]
    fn never_matches_a_prefix_extended_identifier(seg in segment()) {
        let p = FieldPath::parse(&seg).unwrap();
        let extended = format!("x{seg}");
        prop_assert!(!p.is_in(&extended));
    }

    #[test]
    fn always_matches_itself_between_delimiters(seg in segment()) {
        let p = FieldPath::parse(&seg).unwrap();
        let comma_joined = format!("other,{seg}");
        let semicolon_joined = format!("{seg};other");
        prop_assert!(p.is_in(&seg));
        prop_assert!(p.is_in(&comma_joined));
        prop_assert!(p.is_in(&semicolon_joined));
    }

    #[test]
    fn parse_round_trips_through_display(a in segment(), b in segment()) {
        let text = format!("{a}.{b}");
        let p = FieldPath::parse(&text).unwrap();
        prop_assert_eq!(p.to_string(), text);
    }
}
