//! Scanning a dataset into a deterministic modification plan.
//!
//! The plan records, per row, which instructions touch which sub-columns.
//! Rows with no hits are omitted, so the applier and the batch driver
//! only ever visit rows that have work to do.

use std::collections::BTreeMap;

use fieldmend_edit::{fields, filters, query};
use fieldmend_foundation::{
    Dataset, FieldPath, ModificationInstruction, RecordId, SubColumn, TrackerRow,
};

/// Which rows a planning pass should scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Targets {
    /// Every row in the dataset.
    All,
    /// Only the listed record ids.
    Ids(Vec<RecordId>),
}

/// One instruction with the sub-columns it was found to touch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedStep {
    /// The instruction to apply.
    pub instruction: ModificationInstruction,
    /// The sub-columns the instruction's source path occurs in.
    pub columns: Vec<SubColumn>,
}

/// The planned steps for one row. Instruction order is preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowPlan {
    /// The steps to apply, in instruction order.
    pub steps: Vec<PlannedStep>,
}

impl RowPlan {
    /// Returns true if no instruction touches this row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Rows to edit, keyed by record id, plus targets the dataset lacks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModificationPlan {
    rows: BTreeMap<RecordId, RowPlan>,
    unknown: Vec<RecordId>,
}

impl ModificationPlan {
    /// The planned rows, in record-id order.
    pub fn rows(&self) -> impl Iterator<Item = (&RecordId, &RowPlan)> {
        self.rows.iter()
    }

    /// The plan for one record, if it has one.
    #[must_use]
    pub fn get(&self, record: &RecordId) -> Option<&RowPlan> {
        self.rows.get(record)
    }

    /// Number of rows with work planned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row has work planned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Targeted record ids the dataset does not contain.
    #[must_use]
    pub fn unknown_targets(&self) -> &[RecordId] {
        &self.unknown
    }
}

/// Scans `targets` in `dataset` for occurrences of each instruction's
/// source path and builds the plan.
///
/// Matching is segment-exact. The Filters column is matched structurally
/// through its parsed clause list; if that text does not parse, a textual
/// occurrence of the path still marks the column so the applier surfaces
/// the row's parse failure instead of the plan hiding it.
#[must_use]
pub fn plan(
    dataset: &Dataset,
    instructions: &[ModificationInstruction],
    targets: &Targets,
) -> ModificationPlan {
    let mut rows = BTreeMap::new();
    let mut unknown = Vec::new();

    let mut scan = |record: &RecordId, row: &TrackerRow| {
        let row_plan = plan_row(row, instructions);
        if !row_plan.is_empty() {
            rows.insert(record.clone(), row_plan);
        }
    };

    match targets {
        Targets::All => {
            for (record, row) in dataset.iter() {
                scan(record, row);
            }
        }
        Targets::Ids(ids) => {
            for record in ids {
                match dataset.get(record) {
                    Some(row) => scan(record, row),
                    None => unknown.push(record.clone()),
                }
            }
        }
    }

    ModificationPlan { rows, unknown }
}

fn plan_row(row: &TrackerRow, instructions: &[ModificationInstruction]) -> RowPlan {
    let mut steps = Vec::new();

    for instruction in instructions {
        let columns = match instruction {
            ModificationInstruction::Remove(path) => hit_columns(row, path, true),
            ModificationInstruction::Swap { old, .. } => hit_columns(row, old, false),
            ModificationInstruction::Add(path) => {
                // Adds run after removals, so an add must still be planned
                // when the same batch removes its path: the re-add wins.
                let removed_in_batch = instructions.iter().any(|other| {
                    matches!(other, ModificationInstruction::Remove(p) if p == path)
                });
                if removed_in_batch || !fields::contains(row.column(SubColumn::Fields), path) {
                    vec![SubColumn::Fields]
                } else {
                    Vec::new()
                }
            }
        };
        if !columns.is_empty() {
            steps.push(PlannedStep {
                instruction: instruction.clone(),
                columns,
            });
        }
    }

    RowPlan { steps }
}

/// The sub-columns `path` occurs in. A removal that hits the filter list
/// also marks Logic, whose positions must be renumbered.
fn hit_columns(row: &TrackerRow, path: &FieldPath, is_remove: bool) -> Vec<SubColumn> {
    let mut columns = Vec::new();

    if fields::contains(row.column(SubColumn::Fields), path) {
        columns.push(SubColumn::Fields);
    }

    let filters_text = row.column(SubColumn::Filters);
    let filters_hit = filters::contains(filters_text, path)
        .unwrap_or_else(|_| path.is_in(filters_text));
    if filters_hit {
        columns.push(SubColumn::Filters);
        if is_remove {
            columns.push(SubColumn::Logic);
        }
    }

    let query_text = row.column(SubColumn::Query);
    let query_hit = if is_remove {
        query::references(query_text, std::slice::from_ref(path))
            .unwrap_or_else(|_| path.is_in(query_text))
    } else {
        // Swaps rewrite exact paths only.
        path.is_in(query_text)
    };
    if query_hit {
        columns.push(SubColumn::Query);
    }

    columns
}
