//! Session state for the REPL and the CLI.
//!
//! The session owns the current dataset, the loaded history log, and an
//! in-memory stack of pre-modification snapshots. Every mutating
//! operation snapshots first, so `undo` always has somewhere to go.

use std::path::Path;

use chrono::NaiveDateTime;

use fieldmend_engine::{
    apply_batch, audit, plan, BatchOptions, BatchOutcome, ModificationPlan, RowAudit, Targets,
};
use fieldmend_foundation::{
    Dataset, Error, FieldPath, ModificationInstruction, RecordId, Result,
};
use fieldmend_history::{
    reconstruct, EventStore, ReconstructedRow, ReplayOptions, RestorePoint,
};

use crate::loader;
use crate::serialize;

/// State shared by every interactive and batch operation.
pub struct Session {
    /// The current dataset.
    dataset: Dataset,

    /// The loaded field history log.
    events: EventStore,

    /// Pre-modification snapshots, most recent last.
    backups: Vec<Dataset>,

    /// Replay configuration.
    replay_options: ReplayOptions,

    /// Batch configuration.
    batch_options: BatchOptions,
}

impl Session {
    /// Creates a session with no data loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dataset: Dataset::new(),
            events: EventStore::new(),
            backups: Vec::new(),
            replay_options: ReplayOptions::default(),
            batch_options: BatchOptions::default(),
        }
    }

    /// Creates a session over an existing dataset.
    #[must_use]
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            dataset,
            ..Self::new()
        }
    }

    /// The current dataset.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The loaded history log.
    #[must_use]
    pub const fn events(&self) -> &EventStore {
        &self.events
    }

    /// The batch options used by [`Session::modify`].
    pub fn batch_options_mut(&mut self) -> &mut BatchOptions {
        &mut self.batch_options
    }

    /// Number of undo snapshots held.
    #[must_use]
    pub fn backup_count(&self) -> usize {
        self.backups.len()
    }

    /// Loads a tracker export, replacing the current dataset.
    ///
    /// # Errors
    /// Propagates loader failures; the current dataset is kept on error.
    pub fn load_dataset<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let dataset = loader::load_dataset(path)?;
        let count = dataset.len();
        self.dataset = dataset;
        self.backups.clear();
        Ok(count)
    }

    /// Loads a history log, replacing the current one.
    ///
    /// # Errors
    /// Propagates loader failures; the current log is kept on error.
    pub fn load_events<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let events = loader::load_events(path)?;
        let count = events.len();
        self.events = events;
        Ok(count)
    }

    /// Audits the dataset for contextual occurrences of `field`.
    ///
    /// # Errors
    /// Fails when `field` is not a well-formed path.
    pub fn audit(&self, field: &str) -> Result<Vec<RowAudit>> {
        let path = FieldPath::parse(field)?;
        Ok(audit(&self.dataset, &path))
    }

    /// Plans `instructions` against the current dataset without applying.
    #[must_use]
    pub fn plan(&self, instructions: &[ModificationInstruction], targets: &Targets) -> ModificationPlan {
        plan(&self.dataset, instructions, targets)
    }

    /// Applies `instructions`, snapshotting the dataset first.
    ///
    /// The outcome's dataset becomes the session's current dataset; the
    /// outcome is returned for reporting.
    pub fn modify(
        &mut self,
        instructions: &[ModificationInstruction],
        targets: &Targets,
    ) -> BatchOutcome {
        let plan = plan(&self.dataset, instructions, targets);
        self.backups.push(self.dataset.snapshot());
        let outcome = apply_batch(&self.dataset, &plan, &self.batch_options);
        self.dataset = outcome.dataset.snapshot();
        outcome
    }

    /// Applies a loaded swap-pair list as one batch.
    pub fn apply_swap_pairs(&mut self, pairs: &[(FieldPath, FieldPath)]) -> BatchOutcome {
        let instructions: Vec<ModificationInstruction> = pairs
            .iter()
            .map(|(old, new)| ModificationInstruction::Swap {
                old: old.clone(),
                new: new.clone(),
            })
            .collect();
        self.modify(&instructions, &Targets::All)
    }

    /// The selectable restore points for one record, most recent first.
    #[must_use]
    pub fn restore_points(&self, record: &RecordId) -> Vec<RestorePoint> {
        self.events.states_for(record, &self.replay_options)
    }

    /// Reconstructs a record at `cutoff` without touching the dataset.
    ///
    /// # Errors
    /// Fails when the record is not in the dataset.
    pub fn preview_restore(
        &self,
        record: &RecordId,
        cutoff: NaiveDateTime,
    ) -> Result<ReconstructedRow> {
        let row = self
            .dataset
            .get(record)
            .ok_or_else(|| Error::unknown_record(record.clone()))?;
        let events = self.events.events_for(record, &self.replay_options);
        Ok(reconstruct(row, &events, cutoff, &self.replay_options))
    }

    /// Reconstructs a record at `cutoff` and commits the rolled-back row
    /// to the dataset, snapshotting first.
    ///
    /// # Errors
    /// Fails when the record is not in the dataset.
    pub fn restore(
        &mut self,
        record: &RecordId,
        cutoff: NaiveDateTime,
    ) -> Result<ReconstructedRow> {
        let result = self.preview_restore(record, cutoff)?;
        self.backups.push(self.dataset.snapshot());
        self.dataset.insert(result.row.clone());
        Ok(result)
    }

    /// Reverts the most recent modify or restore. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.backups.pop() {
            Some(previous) => {
                self.dataset = previous;
                true
            }
            None => false,
        }
    }

    /// Writes the current dataset as CSV.
    ///
    /// # Errors
    /// Propagates writer failures.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::save_dataset(&self.dataset, path)
    }

    /// Writes the current dataset as a `MessagePack` backup.
    ///
    /// # Errors
    /// Propagates writer failures.
    pub fn write_backup<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        serialize::save_to_file(&self.dataset, path)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
