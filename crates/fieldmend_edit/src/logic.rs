//! Editor for the positional Logic expression.
//!
//! Renumbering is an AST transformation, not a textual substitution. A
//! term whose filter position was removed is deleted from the tree and
//! its binary parent collapses to the surviving sibling, so operator
//! structure stays well-formed no matter which positions disappear.

use fieldmend_foundation::{Error, Result};
use fieldmend_language::{parse_logic, render_logic, LogicExpr};

use crate::remap::{PositionFate, PositionRemap};

/// Applies a filter-position remap to the Logic sub-column text.
///
/// Surviving terms are renumbered, deleted terms are collapsed out of the
/// tree, and an expression with no surviving terms renders as `TRUE`.
/// Returns the rendered expression and the number of terms deleted.
///
/// # Errors
/// Returns a parse error for malformed text, or an internal error when a
/// term references a position the remap does not know about.
pub fn renumber(text: &str, remap: &PositionRemap) -> Result<(String, usize)> {
    let expr = parse_logic(text)?;
    let mut deleted = 0;

    let rewritten = apply_remap(expr, remap, &mut deleted)?;
    let rendered = match rewritten {
        Some(expr) => render_logic(&expr.normalized()),
        None => "TRUE".to_string(),
    };

    Ok((rendered, deleted))
}

/// Checks that every term in `text` is within `1..=filter_count`.
///
/// # Errors
/// Returns a parse error for malformed text, or a row edit precondition
/// failure described as a parse error when a term is out of range.
pub fn validate(text: &str, filter_count: usize) -> Result<()> {
    let expr = parse_logic(text)?;
    if let Some(position) = expr.position_out_of_range(filter_count) {
        return Err(Error::parse(
            format!("term {position} exceeds the {filter_count} available filters"),
            0,
        ));
    }
    Ok(())
}

/// Rewrites an expression under a remap. `None` means the whole subtree
/// was deleted and the parent must collapse to its sibling.
fn apply_remap(
    expr: LogicExpr,
    remap: &PositionRemap,
    deleted: &mut usize,
) -> Result<Option<LogicExpr>> {
    match expr {
        LogicExpr::True => Ok(Some(LogicExpr::True)),
        LogicExpr::Term(position) => match remap.fate(position) {
            Some(PositionFate::Renumbered(new)) => Ok(Some(LogicExpr::Term(new))),
            Some(PositionFate::Removed) => {
                *deleted += 1;
                Ok(None)
            }
            None => Err(Error::parse(
                format!("term {position} does not match any filter"),
                0,
            )),
        },
        LogicExpr::And(left, right) => {
            combine(apply_remap(*left, remap, deleted)?, apply_remap(*right, remap, deleted)?, true)
        }
        LogicExpr::Or(left, right) => {
            combine(apply_remap(*left, remap, deleted)?, apply_remap(*right, remap, deleted)?, false)
        }
        LogicExpr::Group(inner) => {
            Ok(apply_remap(*inner, remap, deleted)?.map(|e| LogicExpr::Group(Box::new(e))))
        }
    }
}

/// Rebuilds a binary node, collapsing to the surviving side when the
/// other was deleted.
fn combine(
    left: Option<LogicExpr>,
    right: Option<LogicExpr>,
    is_and: bool,
) -> Result<Option<LogicExpr>> {
    Ok(match (left, right) {
        (Some(l), Some(r)) => Some(if is_and {
            LogicExpr::And(Box::new(l), Box::new(r))
        } else {
            LogicExpr::Or(Box::new(l), Box::new(r))
        }),
        (Some(survivor), None) | (None, Some(survivor)) => Some(survivor),
        (None, None) => None,
    })
}
