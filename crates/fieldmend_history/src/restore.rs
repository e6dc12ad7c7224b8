//! Point-in-time reconstruction by backward undo.
//!
//! Replay never applies new values forward. It starts from the current
//! row and walks the event log most-recent first, setting a column back
//! to an event's *old* value whenever the event happened after the
//! cutoff. A field's reconstructed value is therefore the old value of
//! its earliest event after the cutoff, and fields with no events after
//! the cutoff keep their current values.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use fieldmend_foundation::TrackerRow;

use crate::event::HistoryEvent;
use crate::report::{ReconstructedRow, ReplayEntry, ReplayFailure, ReplayStatus};
use crate::store::ReplayOptions;

/// Reconstructs `row` as it stood at `cutoff`.
///
/// `events` must belong to the row's record; they are sorted here, so
/// any order is accepted. An event at exactly the cutoff is part of the
/// reconstructed past and is not undone.
#[must_use]
pub fn reconstruct(
    row: &TrackerRow,
    events: &[HistoryEvent],
    cutoff: NaiveDateTime,
    options: &ReplayOptions,
) -> ReconstructedRow {
    let mut ordered: Vec<&HistoryEvent> = events
        .iter()
        .filter(|event| !options.ignores(&event.field))
        .collect();
    ordered.sort_by_key(|event| event.sort_key());

    let warnings = ambiguity_warnings(&ordered, cutoff);

    let mut working = row.clone();
    let mut statuses: BTreeMap<String, ReplayStatus> = BTreeMap::new();
    let mut entries = Vec::new();
    let mut failures = Vec::new();
    let mut failed_fields: BTreeSet<&str> = BTreeSet::new();

    for event in ordered.iter().rev() {
        if event.at <= cutoff {
            entries.push(entry(event, ReplayStatus::SkippedFuture));
            if !failed_fields.contains(event.field.as_str()) {
                statuses.entry(event.field.clone()).or_insert(ReplayStatus::NoChange);
            }
            continue;
        }

        if failed_fields.contains(event.field.as_str()) {
            continue;
        }

        match working.clone().with_named(&event.field, event.old_value.clone()) {
            Ok(undone) => {
                working = undone;
                entries.push(entry(event, ReplayStatus::Applied));
                statuses.insert(event.field.clone(), ReplayStatus::Applied);
            }
            Err(error) => {
                failed_fields.insert(event.field.as_str());
                failures.push(ReplayFailure {
                    field: event.field.clone(),
                    reason: error.to_string(),
                });
                statuses.remove(&event.field);
            }
        }
    }

    ReconstructedRow {
        row: working,
        statuses,
        entries,
        failures,
        warnings,
    }
}

fn entry(event: &HistoryEvent, status: ReplayStatus) -> ReplayEntry {
    ReplayEntry {
        field: event.field.clone(),
        at: event.at,
        status,
    }
}

/// Flags same-field timestamp collisions inside the undo window, where
/// only the log order decides which change is the more recent.
fn ambiguity_warnings(ordered: &[&HistoryEvent], cutoff: NaiveDateTime) -> Vec<String> {
    let mut warnings = Vec::new();
    for pair in ordered.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.field == second.field && first.at == second.at && first.at > cutoff {
            warnings.push(format!(
                "ambiguous event order for '{}' at {}: resolved by log order",
                first.field, first.at
            ));
        }
    }
    warnings
}
