//! Editor for the JSON filter-clause list.
//!
//! Filters are stored as a JSON array of clause objects. Matching is
//! structural on the parsed `field` path rather than textual, and removal
//! reports a [`PositionRemap`] so the logic editor can renumber its terms.

use fieldmend_foundation::{Error, ErrorKind, FieldPath, Result};
use serde::{Deserialize, Serialize};

use crate::remap::PositionRemap;

/// One filter clause as stored in the Filters sub-column.
///
/// Unknown keys are preserved verbatim through the `extra` map so an edit
/// never strips vendor-specific annotations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    /// The field the clause filters on.
    pub field: FieldPath,
    /// Comparison operator, as stored.
    #[serde(default)]
    pub operator: String,
    /// Comparison value, any JSON shape.
    #[serde(default)]
    pub value: serde_json::Value,
    /// Human-readable label derived from the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The object the filtered field lives on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sobject: Option<String>,
    /// Keys this editor does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FilterClause {
    /// Builds a clause with a regenerated label and sobject for `field`.
    #[must_use]
    pub fn regenerated(self, field: FieldPath, base_object: &str) -> Self {
        let label = Some(field.filter_label());
        let sobject = Some(field.filter_sobject(base_object));
        Self {
            field,
            label,
            sobject,
            ..self
        }
    }
}

/// Parses the Filters sub-column text into clauses.
///
/// Empty or whitespace-only text is an empty clause list.
///
/// # Errors
/// Returns [`ErrorKind::SerializationError`] when the text is not a valid
/// JSON array of clause objects.
pub fn parse_filters(text: &str) -> Result<Vec<FilterClause>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed)
        .map_err(|err| Error::new(ErrorKind::SerializationError(err.to_string())))
}

/// Renders clauses back to the stored JSON form.
///
/// An empty clause list renders as the empty string, not `[]`.
///
/// # Errors
/// Returns [`ErrorKind::SerializationError`] if serialization fails.
pub fn render_filters(clauses: &[FilterClause]) -> Result<String> {
    if clauses.is_empty() {
        return Ok(String::new());
    }
    serde_json::to_string(clauses)
        .map_err(|err| Error::new(ErrorKind::SerializationError(err.to_string())))
}

/// Returns true when `path` matches a clause: equal to its field, or a
/// segment-wise prefix of it.
fn clause_matches(clause: &FilterClause, path: &FieldPath) -> bool {
    clause.field == *path || path.is_prefix_of(&clause.field)
}

/// Returns true if any clause in `text` references `path`.
///
/// # Errors
/// Propagates parse failures from [`parse_filters`].
pub fn contains(text: &str, path: &FieldPath) -> Result<bool> {
    Ok(parse_filters(text)?.iter().any(|c| clause_matches(c, path)))
}

/// Removes every clause referencing `path` (exactly or through a prefix).
///
/// Returns the rendered remainder, the position remap for the logic
/// editor, and the number of clauses removed.
///
/// # Errors
/// Propagates parse and render failures.
pub fn remove(text: &str, path: &FieldPath) -> Result<(String, PositionRemap, usize)> {
    let clauses = parse_filters(text)?;
    let total = clauses.len();

    let mut removed_positions = Vec::new();
    let mut kept = Vec::new();
    #[allow(clippy::cast_possible_truncation)]
    for (index, clause) in clauses.into_iter().enumerate() {
        if clause_matches(&clause, path) {
            removed_positions.push(index as u32 + 1);
        } else {
            kept.push(clause);
        }
    }

    let remap = PositionRemap::from_removed(&removed_positions, total);
    let rendered = render_filters(&kept)?;
    Ok((rendered, remap, removed_positions.len()))
}

/// Rewrites every clause on `old` to reference `new`, regenerating the
/// label and sobject from the new path.
///
/// Only exact field matches are swapped. Returns the rendered clause list
/// and the number of clauses rewritten.
///
/// # Errors
/// Propagates parse and render failures.
pub fn swap(
    text: &str,
    old: &FieldPath,
    new: &FieldPath,
    base_object: &str,
) -> Result<(String, usize)> {
    let clauses = parse_filters(text)?;
    let mut swapped = 0;

    let rewritten: Vec<FilterClause> = clauses
        .into_iter()
        .map(|clause| {
            if clause.field == *old {
                swapped += 1;
                clause.regenerated(new.clone(), base_object)
            } else {
                clause
            }
        })
        .collect();

    let rendered = render_filters(&rewritten)?;
    Ok((rendered, swapped))
}
