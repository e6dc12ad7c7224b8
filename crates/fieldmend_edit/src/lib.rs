//! Independent rewrite rules for the four tracker sub-columns.
//!
//! Each editor takes text in and hands text back, keeping the sub-column's
//! internal consistency after the edit:
//! - [`fields`] - comma/semicolon-delimited field lists
//! - [`filters`] - the JSON filter-clause list, producing a [`PositionRemap`]
//! - [`logic`] - position renumbering and term deletion over the Logic AST
//! - [`query`] - field-path removal and swapping over the Query AST
//!
//! Removal from the filter list must be followed by [`logic::renumber`]
//! with the returned remap; the engine's applier threads that through.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fields;
pub mod filters;
pub mod logic;
pub mod query;
pub mod remap;

pub use filters::FilterClause;
pub use remap::{PositionFate, PositionRemap};
