//! Core types for the Fieldmend system.
//!
//! This crate provides:
//! - [`FieldPath`] - Canonical dotted field references with segment-exact matching
//! - [`TrackerRow`] - One tracker record with its four structured sub-columns
//! - [`Dataset`] - Persistent, cheaply-snapshottable collection of rows
//! - [`ModificationInstruction`] - Remove/Swap/Add requests against field references
//! - [`Error`] - Rich error types with matchable kinds

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dataset;
pub mod error;
pub mod instruction;
pub mod path;
pub mod row;

pub use dataset::Dataset;
pub use error::{Error, ErrorKind, Result};
pub use instruction::ModificationInstruction;
pub use path::FieldPath;
pub use row::{RecordId, SubColumn, TrackerRow};
