//! Driving a modification plan across a whole dataset.
//!
//! Rows are processed sequentially in record-id order. A failed row never
//! aborts the batch: its error lands in the outcome and later rows still
//! run. Cancellation is cooperative; the ids left unprocessed come back
//! in the outcome so the caller can resume or report them.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fieldmend_foundation::{Dataset, Error, RecordId};

use crate::apply::apply;
use crate::plan::ModificationPlan;
use crate::summary::ChangeSummary;

/// The object tracker rows belong to unless the caller says otherwise.
pub const DEFAULT_BASE_OBJECT: &str = "Tracker__c";

/// Knobs for a batch run.
#[derive(Clone, Debug)]
pub struct BatchOptions {
    /// Base object name used when regenerating filter-clause sobjects.
    pub base_object: String,
    /// Set to true from any thread to stop after the current row.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            base_object: DEFAULT_BASE_OBJECT.to_string(),
            cancel: None,
        }
    }
}

impl BatchOptions {
    /// Options that honor the given cancellation flag.
    #[must_use]
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Everything a batch run produced.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// The dataset with every successful row edit applied.
    pub dataset: Dataset,
    /// Per-row change summaries for edited rows.
    pub applied: BTreeMap<RecordId, ChangeSummary>,
    /// Per-row failures; these rows are unchanged in `dataset`.
    pub failed: BTreeMap<RecordId, Error>,
    /// Planned rows never reached because the run was cancelled.
    pub remaining: Vec<RecordId>,
}

impl BatchOutcome {
    /// Returns true when every planned row was edited successfully.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.remaining.is_empty()
    }
}

/// Runs `plan` over `dataset` and collects the outcome.
///
/// The input dataset is untouched; the outcome holds the edited copy.
/// Planned rows missing from the dataset are recorded as failures.
#[must_use]
pub fn apply_batch(
    dataset: &Dataset,
    plan: &ModificationPlan,
    options: &BatchOptions,
) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        dataset: dataset.snapshot(),
        ..BatchOutcome::default()
    };

    for (record, row_plan) in plan.rows() {
        if options.cancelled() {
            outcome.remaining.push(record.clone());
            continue;
        }

        let Some(row) = outcome.dataset.get(record).cloned() else {
            outcome
                .failed
                .insert(record.clone(), Error::unknown_record(record.clone()));
            continue;
        };

        match apply(&row, row_plan, &options.base_object) {
            Ok((edited, summary)) => {
                outcome.dataset.insert(edited);
                outcome.applied.insert(record.clone(), summary);
            }
            Err(error) => {
                outcome.failed.insert(record.clone(), error);
            }
        }
    }

    outcome
}
