//! Read-only audit of where a field is referenced across a dataset.
//!
//! The audit searches for *contextual* occurrences: the field itself plus
//! the field reached through chains of relationship hops, so auditing
//! `Name` also surfaces `site__r.Name` and `site__r.owner__r.Name`.

use std::collections::BTreeMap;

use fieldmend_edit::filters;
use fieldmend_foundation::{Dataset, FieldPath, RecordId, SubColumn, TrackerRow};

/// One contextual path found on a row and where it occurs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditHit {
    /// The full path as found, hops included.
    pub path: FieldPath,
    /// Sub-columns whose text contains the path.
    pub columns: Vec<SubColumn>,
    /// True when a parsed filter clause references the path.
    pub in_filters: bool,
}

/// Everywhere a field is referenced on one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowAudit {
    /// The audited record.
    pub record: RecordId,
    /// The contextual paths found, sorted.
    pub hits: Vec<AuditHit>,
}

/// Audits `dataset` for contextual occurrences of `field`.
///
/// Rows with no occurrence are omitted. Filter clauses that fail to parse
/// fall back to a textual scan of the raw column.
#[must_use]
pub fn audit(dataset: &Dataset, field: &FieldPath) -> Vec<RowAudit> {
    dataset
        .iter()
        .filter_map(|(record, row)| {
            let hits = audit_row(row, field);
            if hits.is_empty() {
                None
            } else {
                Some(RowAudit {
                    record: record.clone(),
                    hits,
                })
            }
        })
        .collect()
}

/// The ids of rows with at least one contextual occurrence of `field`.
#[must_use]
pub fn audit_ids(dataset: &Dataset, field: &FieldPath) -> Vec<RecordId> {
    audit(dataset, field)
        .into_iter()
        .map(|entry| entry.record)
        .collect()
}

fn audit_row(row: &TrackerRow, field: &FieldPath) -> Vec<AuditHit> {
    let mut by_path: BTreeMap<FieldPath, (Vec<SubColumn>, bool)> = BTreeMap::new();

    for column in [SubColumn::Fields, SubColumn::Query] {
        for path in FieldPath::contextual_occurrences(row.column(column), field) {
            by_path.entry(path).or_default().0.push(column);
        }
    }

    let filters_text = row.column(SubColumn::Filters);
    match filters::parse_filters(filters_text) {
        Ok(clauses) => {
            for clause in &clauses {
                let clause_text = clause.field.to_string();
                for path in FieldPath::contextual_occurrences(&clause_text, field) {
                    by_path.entry(path).or_default().1 = true;
                }
            }
        }
        Err(_) => {
            for path in FieldPath::contextual_occurrences(filters_text, field) {
                let entry = by_path.entry(path).or_default();
                entry.0.push(SubColumn::Filters);
            }
        }
    }

    by_path
        .into_iter()
        .map(|(path, (columns, in_filters))| AuditHit {
            path,
            columns,
            in_filters,
        })
        .collect()
}
