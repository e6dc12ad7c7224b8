//! Lexer, parsers, and ASTs for the Fieldmend sub-languages.
//!
//! This crate provides:
//! - [`Lexer`] - Shared tokenizer for both restricted dialects
//! - [`LogicExpr`] - Boolean expression over 1-based filter positions
//! - [`QueryExpr`] - Boolean clause over direct field references
//! - [`parse_logic`] / [`parse_query`] - Recursive-descent parsers
//! - [`render_logic`] / [`render_query`] - Canonical pretty-printing
//!
//! The dialects are deliberately restricted: `AND`/`OR` with parentheses,
//! integer filter positions on one side, `path OP value` comparisons on
//! the other. The ASTs make the no-dangling-operator and no-empty-group
//! invariants unrepresentable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod token;

pub use ast::{CompareOp, Comparison, LogicExpr, QueryExpr, QueryValue};
pub use lexer::Lexer;
pub use parser::{parse_logic, parse_query};
pub use pretty::{render_logic, render_query};
pub use span::Span;
pub use token::{Token, TokenKind};
