//! Applying a row plan to one tracker row.
//!
//! Edits run in a fixed order: removals, then swaps, then adds. A filter
//! removal threads its position remap straight into the logic editor, so
//! the Logic column is renumbered in the same step that invalidated its
//! positions. Any editor failure aborts the whole row; the caller keeps
//! the original row because nothing here mutates it.

use fieldmend_edit::{fields, filters, logic, query};
use fieldmend_foundation::{
    Error, FieldPath, ModificationInstruction, Result, SubColumn, TrackerRow,
};

use crate::plan::{PlannedStep, RowPlan};
use crate::summary::{ChangeSummary, Outcome};

/// Applies `plan` to `row`, producing the edited row and its summary.
///
/// `base_object` names the object the tracker rows belong to; it seeds
/// the `sobject` regenerated on swapped filter clauses.
///
/// # Errors
/// Returns [`fieldmend_foundation::ErrorKind::RowEdit`] when any
/// sub-column's existing content cannot be edited. The input row is
/// untouched in that case.
pub fn apply(row: &TrackerRow, plan: &RowPlan, base_object: &str) -> Result<(TrackerRow, ChangeSummary)> {
    let mut working = row.clone();
    let mut summary = ChangeSummary::default();

    for step in plan.steps.iter().filter(|s| s.instruction.is_remove()) {
        if let ModificationInstruction::Remove(path) = &step.instruction {
            working = remove_path(working, path, &step.columns, &mut summary)?;
        }
    }

    for step in plan.steps.iter().filter(|s| s.instruction.is_swap()) {
        if let ModificationInstruction::Swap { old, new } = &step.instruction {
            working = swap_path(working, old, new, step, base_object, &mut summary)?;
        }
    }

    for step in plan.steps.iter().filter(|s| s.instruction.is_add()) {
        if let ModificationInstruction::Add(path) = &step.instruction {
            if step.columns.contains(&SubColumn::Fields) {
                let (text, added) = fields::add(working.column(SubColumn::Fields), path);
                working = working.with_column(SubColumn::Fields, text);
                if added {
                    summary.fields.added += 1;
                }
                // An add has nothing to contribute to existing filter
                // clauses; only worth noting when there are any.
                if !working.column(SubColumn::Filters).is_empty() {
                    summary.note(Outcome::NotApplicable {
                        column: SubColumn::Filters,
                        path: path.clone(),
                    });
                }
            }
        }
    }

    Ok((working, summary))
}

/// Removes `path` from the columns the plan marked.
fn remove_path(
    mut row: TrackerRow,
    path: &FieldPath,
    columns: &[SubColumn],
    summary: &mut ChangeSummary,
) -> Result<TrackerRow> {
    if columns.contains(&SubColumn::Fields) {
        let (text, removed) = fields::remove(row.column(SubColumn::Fields), path);
        row = row.with_column(SubColumn::Fields, text);
        summary.fields.removed += removed;
    }

    if columns.contains(&SubColumn::Filters) {
        let (filters_text, remap, removed) = filters::remove(row.column(SubColumn::Filters), path)
            .map_err(|e| edit_failed(&row, SubColumn::Filters, &e))?;
        row = row.with_column(SubColumn::Filters, filters_text);
        summary.filters.removed += removed;

        if removed > 0 {
            let (logic_text, deleted) = logic::renumber(row.column(SubColumn::Logic), &remap)
                .map_err(|e| edit_failed(&row, SubColumn::Logic, &e))?;
            row = row.with_column(SubColumn::Logic, logic_text);
            summary.logic.removed += deleted;
        }
    }

    if columns.contains(&SubColumn::Query) {
        let (text, removed) = query::remove(row.column(SubColumn::Query), std::slice::from_ref(path))
            .map_err(|e| edit_failed(&row, SubColumn::Query, &e))?;
        row = row.with_column(SubColumn::Query, text);
        summary.query.removed += removed;
    }

    Ok(row)
}

/// Swaps `old` for `new`, or converts to a removal when `new` is already
/// referenced by the row's Fields or Filters.
fn swap_path(
    row: TrackerRow,
    old: &FieldPath,
    new: &FieldPath,
    step: &PlannedStep,
    base_object: &str,
    summary: &mut ChangeSummary,
) -> Result<TrackerRow> {
    let new_in_filters = filters::contains(row.column(SubColumn::Filters), new).unwrap_or(false);
    if fields::contains(row.column(SubColumn::Fields), new) || new_in_filters {
        // The replacement is already present; a plain swap would create a
        // duplicate reference. Remove the old path instead.
        summary.note(Outcome::SwapConverted {
            old: old.clone(),
            new: new.clone(),
        });
        let mut columns = step.columns.clone();
        if columns.contains(&SubColumn::Filters) {
            columns.push(SubColumn::Logic);
        }
        return remove_path(row, old, &columns, summary);
    }

    let mut row = row;

    if step.columns.contains(&SubColumn::Fields) {
        let (text, swapped) = fields::swap(row.column(SubColumn::Fields), old, new);
        row = row.with_column(SubColumn::Fields, text);
        summary.fields.swapped += swapped;
    }

    if step.columns.contains(&SubColumn::Filters) {
        let (text, swapped) =
            filters::swap(row.column(SubColumn::Filters), old, new, base_object)
                .map_err(|e| edit_failed(&row, SubColumn::Filters, &e))?;
        row = row.with_column(SubColumn::Filters, text);
        summary.filters.swapped += swapped;
    }

    if step.columns.contains(&SubColumn::Query) {
        let (text, swapped) = query::swap(row.column(SubColumn::Query), old, new)
            .map_err(|e| edit_failed(&row, SubColumn::Query, &e))?;
        row = row.with_column(SubColumn::Query, text);
        summary.query.swapped += swapped;
    }

    Ok(row)
}

fn edit_failed(row: &TrackerRow, column: SubColumn, cause: &Error) -> Error {
    Error::row_edit(row.id().clone(), column.name(), cause.to_string())
}
