//! Integration tests for applying plans across datasets.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use fieldmend_engine::{apply_batch, plan, BatchOptions, Targets};
use fieldmend_foundation::{
    Dataset, FieldPath, ModificationInstruction, RecordId, SubColumn, TrackerRow,
};

fn path(text: &str) -> FieldPath {
    FieldPath::parse(text).unwrap()
}

fn run(dataset: &Dataset, instructions: &[ModificationInstruction]) -> fieldmend_engine::BatchOutcome {
    let plan = plan(dataset, instructions, &Targets::All);
    apply_batch(dataset, &plan, &BatchOptions::default())
}

// =============================================================================
// Cross-column removal
// =============================================================================

#[test]
fn removal_cascades_through_all_four_sub_columns() {
    let dataset = Dataset::from_rows([TrackerRow::new("a01")
        .with_fields("status__c,phase__c")
        .with_filters(
            r#"[{"field":"status__c","operator":"equals","value":"Open"},
                {"field":"phase__c","operator":"equals","value":"2"}]"#,
        )
        .with_logic("1 AND 2")
        .with_query("status__c = 'Open' AND phase__c = '2'")]);

    let outcome = run(&dataset, &[ModificationInstruction::Remove(path("status__c"))]);
    assert!(outcome.is_clean());

    let row = outcome.dataset.get(&RecordId::from("a01")).unwrap();
    assert_eq!(row.column(SubColumn::Fields), "phase__c");
    assert!(!row.column(SubColumn::Filters).contains("status__c"));
    // The surviving filter renumbers from position 2 to 1.
    assert_eq!(row.column(SubColumn::Logic), "1");
    assert_eq!(row.column(SubColumn::Query), "phase__c = '2'");
}

#[test]
fn removing_the_only_filter_leaves_true_logic() {
    let dataset = Dataset::from_rows([TrackerRow::new("a01")
        .with_filters(r#"[{"field":"status__c","operator":"equals","value":"Open"}]"#)
        .with_logic("1")]);

    let outcome = run(&dataset, &[ModificationInstruction::Remove(path("status__c"))]);
    let row = outcome.dataset.get(&RecordId::from("a01")).unwrap();
    assert_eq!(row.column(SubColumn::Filters), "");
    assert_eq!(row.column(SubColumn::Logic), "TRUE");
}

// =============================================================================
// Swaps
// =============================================================================

#[test]
fn swap_rewrites_in_place_across_columns() {
    let dataset = Dataset::from_rows([TrackerRow::new("a01")
        .with_fields("A.B,C.D,E.F")
        .with_query("C.D = 1")]);

    let outcome = run(
        &dataset,
        &[ModificationInstruction::Swap {
            old: path("C.D"),
            new: path("C.G"),
        }],
    );
    let row = outcome.dataset.get(&RecordId::from("a01")).unwrap();
    assert_eq!(row.column(SubColumn::Fields), "A.B,C.G,E.F");
    assert_eq!(row.column(SubColumn::Query), "C.G = 1");
}

#[test]
fn swap_becomes_removal_when_replacement_already_present() {
    let dataset = Dataset::from_rows([TrackerRow::new("a01").with_fields("old__c,new__c")]);

    let outcome = run(
        &dataset,
        &[ModificationInstruction::Swap {
            old: path("old__c"),
            new: path("new__c"),
        }],
    );
    let row = outcome.dataset.get(&RecordId::from("a01")).unwrap();
    assert_eq!(row.column(SubColumn::Fields), "new__c");

    let summary = &outcome.applied[&RecordId::from("a01")];
    assert!(!summary.notes.is_empty());
}

// =============================================================================
// Removal / add interaction
// =============================================================================

#[test]
fn add_wins_when_the_same_batch_removes_the_path() {
    let dataset =
        Dataset::from_rows([TrackerRow::new("a01").with_fields("drop__c;keep__c")]);

    let outcome = run(
        &dataset,
        &[
            ModificationInstruction::Remove(path("drop__c")),
            ModificationInstruction::Add(path("drop__c")),
        ],
    );
    assert!(outcome.is_clean());

    // Adds run after removals, so the re-added path survives the batch.
    let row = outcome.dataset.get(&RecordId::from("a01")).unwrap();
    assert_eq!(row.column(SubColumn::Fields), "keep__c,drop__c");
}

// =============================================================================
// Failure isolation
// =============================================================================

#[test]
fn a_failed_row_leaves_other_rows_edited_and_itself_untouched() {
    let dataset = Dataset::from_rows([
        TrackerRow::new("a01")
            .with_filters(r#"[{"field":"drop__c","operator":"equals","value":"1"}]"#)
            .with_logic("1 AND"), // malformed
        TrackerRow::new("a02").with_fields("drop__c,keep__c"),
    ]);

    let outcome = run(&dataset, &[ModificationInstruction::Remove(path("drop__c"))]);

    assert!(!outcome.is_clean());
    assert!(outcome.failed.contains_key(&RecordId::from("a01")));

    // The failed row keeps every column exactly as it was.
    let failed_row = outcome.dataset.get(&RecordId::from("a01")).unwrap();
    assert!(failed_row.column(SubColumn::Filters).contains("drop__c"));
    assert_eq!(failed_row.column(SubColumn::Logic), "1 AND");

    let edited = outcome.dataset.get(&RecordId::from("a02")).unwrap();
    assert_eq!(edited.column(SubColumn::Fields), "keep__c");
}

// =============================================================================
// Cancellation
// =============================================================================

#[test]
fn cancelled_runs_report_remaining_rows() {
    let dataset = Dataset::from_rows([
        TrackerRow::new("a01").with_fields("drop__c"),
        TrackerRow::new("a02").with_fields("drop__c"),
    ]);
    let instructions = [ModificationInstruction::Remove(path("drop__c"))];
    let plan = plan(&dataset, &instructions, &Targets::All);

    let flag = Arc::new(AtomicBool::new(true));
    let options = BatchOptions::default().with_cancel(Arc::clone(&flag));

    let outcome = apply_batch(&dataset, &plan, &options);
    assert!(outcome.applied.is_empty());
    assert_eq!(outcome.remaining.len(), 2);
    assert!(!outcome.is_clean());

    // The dataset comes back untouched.
    assert_eq!(
        outcome.dataset.get(&RecordId::from("a01")).unwrap().column(SubColumn::Fields),
        "drop__c"
    );
}
