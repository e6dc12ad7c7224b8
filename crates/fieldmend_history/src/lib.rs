//! The History Replay Reconstructor.
//!
//! Rebuilds a tracker row as it stood at an earlier point in time by
//! undoing logged field changes backwards from the current row. See
//! [`restore::reconstruct`] for the walk itself, [`store::EventStore`]
//! for event selection, and [`report`] for what comes back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod event;
pub mod report;
pub mod restore;
pub mod store;

pub use event::{parse_timestamp, HistoryEvent};
pub use report::{diff, ColumnDelta, ReconstructedRow, ReplayEntry, ReplayFailure, ReplayStatus};
pub use restore::reconstruct;
pub use store::{EventStore, ReplayOptions, RestorePoint, LAYOUT_FIELDS};
