//! Canonical rendering for both dialects.
//!
//! Output uses single spaces around connectives and operators and no
//! space inside parentheses. Rendering a parsed expression re-parses to
//! an equal AST: an `Or` appearing directly under an `And` (possible only
//! through rewrites) is parenthesized to preserve structure.

use crate::ast::{LogicExpr, QueryExpr};

/// Renders a Logic expression.
///
/// [`LogicExpr::True`] renders as `TRUE`.
#[must_use]
pub fn render_logic(expr: &LogicExpr) -> String {
    let mut out = String::new();
    logic_into(expr, false, &mut out);
    out
}

fn logic_into(expr: &LogicExpr, under_and: bool, out: &mut String) {
    match expr {
        LogicExpr::True => out.push_str("TRUE"),
        LogicExpr::Term(position) => out.push_str(&position.to_string()),
        LogicExpr::And(left, right) => {
            logic_into(left, true, out);
            out.push_str(" AND ");
            logic_into(right, true, out);
        }
        LogicExpr::Or(left, right) => {
            if under_and {
                out.push('(');
            }
            logic_into(left, false, out);
            out.push_str(" OR ");
            logic_into(right, false, out);
            if under_and {
                out.push(')');
            }
        }
        LogicExpr::Group(inner) => {
            out.push('(');
            logic_into(inner, false, out);
            out.push(')');
        }
    }
}

/// Renders a Query clause.
#[must_use]
pub fn render_query(expr: &QueryExpr) -> String {
    let mut out = String::new();
    query_into(expr, false, &mut out);
    out
}

fn query_into(expr: &QueryExpr, under_and: bool, out: &mut String) {
    match expr {
        QueryExpr::Comparison(cmp) => {
            out.push_str(&format!("{} {} {}", cmp.path, cmp.op, cmp.value));
        }
        QueryExpr::And(left, right) => {
            query_into(left, true, out);
            out.push_str(" AND ");
            query_into(right, true, out);
        }
        QueryExpr::Or(left, right) => {
            if under_and {
                out.push('(');
            }
            query_into(left, false, out);
            out.push_str(" OR ");
            query_into(right, false, out);
            if under_and {
                out.push(')');
            }
        }
        QueryExpr::Group(inner) => {
            out.push('(');
            query_into(inner, false, out);
            out.push(')');
        }
    }
}
