//! Editor for the Query clause sub-column.
//!
//! Like the logic editor, removal works on the AST: a comparison whose
//! path is removed disappears and its binary parent collapses to the
//! surviving sibling. An emptied clause renders as the empty string, the
//! unconstrained form for this sub-column.

use fieldmend_foundation::{FieldPath, Result};
use fieldmend_language::{parse_query, render_query, Comparison, QueryExpr};

/// Removes every comparison referencing one of `paths`, exactly or
/// through a segment-wise prefix.
///
/// Returns the rendered remainder and the number of comparisons removed.
/// Empty text stays empty, and a clause whose comparisons are all removed
/// renders as the empty string.
///
/// # Errors
/// Returns a parse error for malformed clause text.
pub fn remove(text: &str, paths: &[FieldPath]) -> Result<(String, usize)> {
    if text.trim().is_empty() {
        return Ok((String::new(), 0));
    }

    let expr = parse_query(text)?;
    let mut removed = 0;
    let rendered = match prune(expr, paths, &mut removed) {
        Some(expr) => render_query(&expr.normalized()),
        None => String::new(),
    };

    Ok((rendered, removed))
}

/// Rewrites every comparison on exactly `old` to reference `new`.
///
/// Returns the rendered clause and the number of comparisons rewritten.
///
/// # Errors
/// Returns a parse error for malformed clause text.
pub fn swap(text: &str, old: &FieldPath, new: &FieldPath) -> Result<(String, usize)> {
    if text.trim().is_empty() {
        return Ok((String::new(), 0));
    }

    let expr = parse_query(text)?;
    let mut swapped = 0;
    let rewritten = rewrite(expr, old, new, &mut swapped);

    Ok((render_query(&rewritten), swapped))
}

/// Returns true if `text` references any of `paths`.
///
/// # Errors
/// Returns a parse error for malformed clause text.
pub fn references(text: &str, paths: &[FieldPath]) -> Result<bool> {
    if text.trim().is_empty() {
        return Ok(false);
    }
    let expr = parse_query(text)?;
    Ok(expr.paths().iter().any(|p| matches_any(p, paths)))
}

fn matches_any(path: &FieldPath, targets: &[FieldPath]) -> bool {
    targets.iter().any(|t| t == path || t.is_prefix_of(path))
}

/// Drops matching comparisons. `None` means the whole subtree vanished.
fn prune(expr: QueryExpr, paths: &[FieldPath], removed: &mut usize) -> Option<QueryExpr> {
    match expr {
        QueryExpr::Comparison(cmp) => {
            if matches_any(&cmp.path, paths) {
                *removed += 1;
                None
            } else {
                Some(QueryExpr::Comparison(cmp))
            }
        }
        QueryExpr::And(left, right) => combine(
            prune(*left, paths, removed),
            prune(*right, paths, removed),
            true,
        ),
        QueryExpr::Or(left, right) => combine(
            prune(*left, paths, removed),
            prune(*right, paths, removed),
            false,
        ),
        QueryExpr::Group(inner) => {
            prune(*inner, paths, removed).map(|e| QueryExpr::Group(Box::new(e)))
        }
    }
}

fn combine(
    left: Option<QueryExpr>,
    right: Option<QueryExpr>,
    is_and: bool,
) -> Option<QueryExpr> {
    match (left, right) {
        (Some(l), Some(r)) => Some(if is_and {
            QueryExpr::And(Box::new(l), Box::new(r))
        } else {
            QueryExpr::Or(Box::new(l), Box::new(r))
        }),
        (Some(survivor), None) | (None, Some(survivor)) => Some(survivor),
        (None, None) => None,
    }
}

fn rewrite(expr: QueryExpr, old: &FieldPath, new: &FieldPath, swapped: &mut usize) -> QueryExpr {
    match expr {
        QueryExpr::Comparison(cmp) => {
            if cmp.path == *old {
                *swapped += 1;
                QueryExpr::Comparison(Comparison {
                    path: new.clone(),
                    ..cmp
                })
            } else {
                QueryExpr::Comparison(cmp)
            }
        }
        QueryExpr::And(left, right) => QueryExpr::And(
            Box::new(rewrite(*left, old, new, swapped)),
            Box::new(rewrite(*right, old, new, swapped)),
        ),
        QueryExpr::Or(left, right) => QueryExpr::Or(
            Box::new(rewrite(*left, old, new, swapped)),
            Box::new(rewrite(*right, old, new, swapped)),
        ),
        QueryExpr::Group(inner) => {
            QueryExpr::Group(Box::new(rewrite(*inner, old, new, swapped)))
        }
    }
}
