//! The Field Reference Consistency Engine.
//!
//! Planning and applying are split: [`plan`](plan::plan) scans a dataset
//! and decides which rows and sub-columns each instruction touches, and
//! [`apply`](apply::apply) rewrites one row under that plan. The batch
//! driver runs the applier across a whole plan, skipping failed rows and
//! honoring cooperative cancellation. The audit scans for contextual
//! occurrences of a field without changing anything.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod apply;
pub mod audit;
pub mod batch;
pub mod plan;
pub mod summary;

pub use apply::apply;
pub use audit::{audit, audit_ids, AuditHit, RowAudit};
pub use batch::{apply_batch, BatchOptions, BatchOutcome};
pub use plan::{plan, ModificationPlan, PlannedStep, RowPlan, Targets};
pub use summary::{ChangeSummary, ColumnChanges, Outcome};
