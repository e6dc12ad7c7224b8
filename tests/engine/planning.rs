//! Integration tests for the planning pass.

use fieldmend_engine::{plan, Targets};
use fieldmend_foundation::{
    Dataset, FieldPath, ModificationInstruction, RecordId, SubColumn, TrackerRow,
};

fn path(text: &str) -> FieldPath {
    FieldPath::parse(text).unwrap()
}

fn dataset() -> Dataset {
    Dataset::from_rows([
        TrackerRow::new("a01")
            .with_fields("status__c,phase__c")
            .with_filters(r#"[{"field":"status__c","operator":"equals","value":"Open"}]"#)
            .with_logic("1")
            .with_query("status__c = 'Open'"),
        TrackerRow::new("a02").with_fields("phase__c,sub_status__c"),
        TrackerRow::new("a03").with_query("site__r.status__c = 'x'"),
    ])
}

#[test]
fn plan_finds_every_touched_sub_column() {
    let plan = plan(
        &dataset(),
        &[ModificationInstruction::Remove(path("status__c"))],
        &Targets::All,
    );

    assert_eq!(plan.len(), 1);
    let row = plan.get(&RecordId::from("a01")).unwrap();
    let columns = &row.steps[0].columns;
    assert!(columns.contains(&SubColumn::Fields));
    assert!(columns.contains(&SubColumn::Filters));
    // Removal from filters forces logic renumbering.
    assert!(columns.contains(&SubColumn::Logic));
    assert!(columns.contains(&SubColumn::Query));
}

#[test]
fn substring_and_dotted_lookalikes_are_not_planned() {
    // a02 has sub_status__c, a03 has site__r.status__c; neither is a hit.
    let plan = plan(
        &dataset(),
        &[ModificationInstruction::Remove(path("status__c"))],
        &Targets::All,
    );

    assert!(plan.get(&RecordId::from("a02")).is_none());
    assert!(plan.get(&RecordId::from("a03")).is_none());
}

#[test]
fn targeted_planning_skips_other_rows() {
    let plan = plan(
        &dataset(),
        &[ModificationInstruction::Remove(path("phase__c"))],
        &Targets::Ids(vec![RecordId::from("a02")]),
    );

    assert_eq!(plan.len(), 1);
    assert!(plan.get(&RecordId::from("a01")).is_none());
}

#[test]
fn unknown_targets_are_reported_not_dropped() {
    let plan = plan(
        &dataset(),
        &[ModificationInstruction::Remove(path("phase__c"))],
        &Targets::Ids(vec![RecordId::from("a01"), RecordId::from("zz9")]),
    );

    assert_eq!(plan.unknown_targets(), &[RecordId::from("zz9")]);
    assert!(plan.get(&RecordId::from("a01")).is_some());
}

#[test]
fn add_plans_rows_missing_the_field() {
    let plan = plan(
        &dataset(),
        &[ModificationInstruction::Add(path("status__c"))],
        &Targets::All,
    );

    // a01 already lists it; a02 and a03 do not.
    assert!(plan.get(&RecordId::from("a01")).is_none());
    assert!(plan.get(&RecordId::from("a02")).is_some());
    assert!(plan.get(&RecordId::from("a03")).is_some());
}

#[test]
fn unparseable_filters_with_textual_hit_still_plan_the_row() {
    // The applier must surface the parse failure; the plan cannot hide it.
    let dataset = Dataset::from_rows([TrackerRow::new("a01")
        .with_filters(r#"[{"field":"status__c" BROKEN"#)]);
    let plan = plan(
        &dataset,
        &[ModificationInstruction::Remove(path("status__c"))],
        &Targets::All,
    );

    assert!(plan.get(&RecordId::from("a01")).is_some());
}
