//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: FieldPath, TrackerRow, Dataset, and Error.

mod errors;
mod paths;
mod rows;
