//! ASTs for the Logic and Query dialects.
//!
//! Both expression types are immutable: rewrites build new values. Because
//! connectives always own two live operands and groups always own a live
//! body, a well-formed AST cannot express a dangling operator or an empty
//! parenthesis group.

use std::fmt;

use fieldmend_foundation::FieldPath;

/// A boolean expression over 1-based filter positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogicExpr {
    /// The always-true constant. Also the value of an empty Logic column.
    True,
    /// A reference to the filter clause at this 1-based position.
    Term(u32),
    /// Conjunction.
    And(Box<LogicExpr>, Box<LogicExpr>),
    /// Disjunction.
    Or(Box<LogicExpr>, Box<LogicExpr>),
    /// A parenthesized sub-expression.
    Group(Box<LogicExpr>),
}

impl LogicExpr {
    /// Returns true for the always-true constant.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    /// The position, if this is a bare term.
    #[must_use]
    pub const fn as_term(&self) -> Option<u32> {
        match self {
            Self::Term(position) => Some(*position),
            _ => None,
        }
    }

    /// Collects every position referenced, in source order.
    #[must_use]
    pub fn positions(&self) -> Vec<u32> {
        let mut out = Vec::new();
        self.collect_positions(&mut out);
        out
    }

    fn collect_positions(&self, out: &mut Vec<u32>) {
        match self {
            Self::True => {}
            Self::Term(position) => out.push(*position),
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_positions(out);
                right.collect_positions(out);
            }
            Self::Group(inner) => inner.collect_positions(out),
        }
    }

    /// Checks that every referenced position is in `1..=filter_count`.
    ///
    /// Returns the first offending position, if any.
    #[must_use]
    pub fn position_out_of_range(&self, filter_count: usize) -> Option<u32> {
        self.positions()
            .into_iter()
            .find(|&p| p == 0 || p as usize > filter_count)
    }

    /// Normalizes the expression: `Group(Group(e))` and `Group(Term)` and
    /// `Group(True)` unwrap, recursively. Connective structure is kept.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::True | Self::Term(_) => self,
            Self::And(left, right) => Self::And(
                Box::new(left.normalized()),
                Box::new(right.normalized()),
            ),
            Self::Or(left, right) => Self::Or(
                Box::new(left.normalized()),
                Box::new(right.normalized()),
            ),
            Self::Group(inner) => match inner.normalized() {
                simple @ (Self::True | Self::Term(_)) => simple,
                Self::Group(nested) => Self::Group(nested),
                complex => Self::Group(Box::new(complex)),
            },
        }
    }
}

/// A boolean clause over direct field-path comparisons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryExpr {
    /// A single `path OP value` comparison.
    Comparison(Comparison),
    /// Conjunction.
    And(Box<QueryExpr>, Box<QueryExpr>),
    /// Disjunction.
    Or(Box<QueryExpr>, Box<QueryExpr>),
    /// A parenthesized sub-expression.
    Group(Box<QueryExpr>),
}

impl QueryExpr {
    /// Collects every field path referenced, in source order.
    #[must_use]
    pub fn paths(&self) -> Vec<&FieldPath> {
        let mut out = Vec::new();
        self.collect_paths(&mut out);
        out
    }

    fn collect_paths<'a>(&'a self, out: &mut Vec<&'a FieldPath>) {
        match self {
            Self::Comparison(cmp) => out.push(&cmp.path),
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_paths(out);
                right.collect_paths(out);
            }
            Self::Group(inner) => inner.collect_paths(out),
        }
    }

    /// Normalizes the clause the same way [`LogicExpr::normalized`] does.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Comparison(_) => self,
            Self::And(left, right) => Self::And(
                Box::new(left.normalized()),
                Box::new(right.normalized()),
            ),
            Self::Or(left, right) => Self::Or(
                Box::new(left.normalized()),
                Box::new(right.normalized()),
            ),
            Self::Group(inner) => match inner.normalized() {
                simple @ Self::Comparison(_) => simple,
                Self::Group(nested) => Self::Group(nested),
                complex => Self::Group(Box::new(complex)),
            },
        }
    }
}

/// One `path OP value` comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    /// The referenced field path.
    pub path: FieldPath,
    /// The comparison operator.
    pub op: CompareOp,
    /// The right-hand value, kept verbatim.
    pub value: QueryValue,
}

/// Comparison operators of the query dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `LIKE`
    Like,
}

impl CompareOp {
    /// The canonical operator spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Like => "LIKE",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Right-hand values of a comparison.
///
/// Values are opaque to the engine: they are carried through edits
/// verbatim and never interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// Single-quoted string, unquoted content.
    Str(String),
    /// Numeric literal text.
    Number(String),
    /// Bare word (`true`, `false`, `null`, …).
    Word(String),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => write!(f, "'{}'", text.replace('\'', "''")),
            Self::Number(text) | Self::Word(text) => write!(f, "{text}"),
        }
    }
}
