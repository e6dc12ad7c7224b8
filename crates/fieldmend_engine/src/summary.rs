//! Change accounting for applied modifications.

use std::fmt;

use fieldmend_foundation::{FieldPath, SubColumn};

/// Edit counts for one sub-column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnChanges {
    /// Tokens, clauses, terms, or comparisons removed.
    pub removed: usize,
    /// Tokens, clauses, or comparisons rewritten to a new path.
    pub swapped: usize,
    /// Tokens appended.
    pub added: usize,
}

impl ColumnChanges {
    fn total(self) -> usize {
        self.removed + self.swapped + self.added
    }
}

/// Informational outcomes that are not edits and not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The instruction has no meaning for this sub-column, e.g. adding a
    /// field to the filter list with no operator or value to give it.
    NotApplicable {
        /// The sub-column the instruction could not apply to.
        column: SubColumn,
        /// The instruction's source path.
        path: FieldPath,
    },
    /// A swap whose replacement already existed on the row was converted
    /// into removal of the old path.
    SwapConverted {
        /// The path that was removed instead of rewritten.
        old: FieldPath,
        /// The replacement that was already present.
        new: FieldPath,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable { column, path } => {
                write!(f, "not applicable to {column}: {path}")
            }
            Self::SwapConverted { old, new } => {
                write!(f, "swap converted to removal: {new} already present, removed {old}")
            }
        }
    }
}

/// What one row edit changed, per sub-column, plus informational notes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Changes to the `Fields` column.
    pub fields: ColumnChanges,
    /// Changes to the `Filters` column.
    pub filters: ColumnChanges,
    /// Changes to the `Logic` column.
    pub logic: ColumnChanges,
    /// Changes to the `Query` column.
    pub query: ColumnChanges,
    /// Outcomes worth reporting that changed nothing.
    pub notes: Vec<Outcome>,
}

impl ChangeSummary {
    /// Mutable access to one sub-column's counters.
    pub fn column_mut(&mut self, column: SubColumn) -> &mut ColumnChanges {
        match column {
            SubColumn::Fields => &mut self.fields,
            SubColumn::Filters => &mut self.filters,
            SubColumn::Logic => &mut self.logic,
            SubColumn::Query => &mut self.query,
        }
    }

    /// One sub-column's counters.
    #[must_use]
    pub fn column(&self, column: SubColumn) -> ColumnChanges {
        match column {
            SubColumn::Fields => self.fields,
            SubColumn::Filters => self.filters,
            SubColumn::Logic => self.logic,
            SubColumn::Query => self.query,
        }
    }

    /// Records an informational outcome.
    pub fn note(&mut self, outcome: Outcome) {
        self.notes.push(outcome);
    }

    /// Total number of edits across all sub-columns.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        SubColumn::ALL.iter().map(|&c| self.column(c).total()).sum()
    }

    /// Returns true when nothing was edited and nothing was noted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0 && self.notes.is_empty()
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for column in SubColumn::ALL {
            let changes = self.column(column);
            if changes.total() == 0 {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(
                f,
                "{column}: -{} ~{} +{}",
                changes.removed, changes.swapped, changes.added
            )?;
        }
        if first {
            write!(f, "no changes")?;
        }
        for note in &self.notes {
            write!(f, "; {note}")?;
        }
        Ok(())
    }
}
