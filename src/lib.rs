//! Fieldmend - Field reference consistency and history replay for tracker exports
//!
//! This crate re-exports all layers of the Fieldmend system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: fieldmend_runtime    — REPL, CLI, CSV and snapshot I/O
//! Layer 3: fieldmend_engine     — Plan/apply/audit over whole datasets
//!          fieldmend_history    — Backward replay of field history logs
//! Layer 2: fieldmend_edit       — Rewrite rules for the four sub-columns
//! Layer 1: fieldmend_language   — Lexer and parsers for Logic and Query
//! Layer 0: fieldmend_foundation — Core types (FieldPath, TrackerRow, Error)
//! ```

pub use fieldmend_edit as edit;
pub use fieldmend_engine as engine;
pub use fieldmend_foundation as foundation;
pub use fieldmend_history as history;
pub use fieldmend_language as language;
pub use fieldmend_runtime as runtime;
