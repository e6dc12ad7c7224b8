//! The event store and its replay options.

use chrono::NaiveDateTime;

use fieldmend_foundation::RecordId;

use crate::event::HistoryEvent;

/// Columns whose history carries layout state, not data.
pub const LAYOUT_FIELDS: [&str; 2] = ["Label Map", "Resize Map"];

/// Knobs for event selection and replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Column names whose events are excluded from replay.
    pub ignored_fields: Vec<String>,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            ignored_fields: LAYOUT_FIELDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ReplayOptions {
    /// Options that replay every field, layout columns included.
    #[must_use]
    pub fn keep_all_fields() -> Self {
        Self {
            ignored_fields: Vec::new(),
        }
    }

    /// Returns true when events on `field` should be excluded.
    #[must_use]
    pub fn ignores(&self, field: &str) -> bool {
        self.ignored_fields.iter().any(|f| f == field)
    }
}

/// A group of events sharing one timestamp, offered as a restore point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestorePoint {
    /// The shared timestamp.
    pub at: NaiveDateTime,
    /// Names of the columns changed at this timestamp, in log order.
    pub fields: Vec<String>,
}

/// All loaded history events, in log order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<HistoryEvent>,
}

impl EventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from events, assigning log sequence numbers from
    /// the iteration order.
    #[must_use]
    pub fn from_events(events: impl IntoIterator<Item = HistoryEvent>) -> Self {
        let mut store = Self::new();
        for event in events {
            store.push(event);
        }
        store
    }

    /// Appends an event, stamping it with the next sequence number.
    pub fn push(&mut self, mut event: HistoryEvent) {
        event.sequence = self.events.len() as u64;
        self.events.push(event);
    }

    /// Number of events in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true when no events are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every event, in log order.
    #[must_use]
    pub fn events(&self) -> &[HistoryEvent] {
        &self.events
    }

    /// The events for one record, oldest first, ties broken by log
    /// order. Ignored fields are filtered out.
    #[must_use]
    pub fn events_for(&self, record: &RecordId, options: &ReplayOptions) -> Vec<HistoryEvent> {
        let mut selected: Vec<HistoryEvent> = self
            .events
            .iter()
            .filter(|event| event.record == *record && !options.ignores(&event.field))
            .cloned()
            .collect();
        selected.sort_by_key(HistoryEvent::sort_key);
        selected
    }

    /// Groups a record's events by timestamp, most recent first, into
    /// selectable restore points.
    #[must_use]
    pub fn states_for(&self, record: &RecordId, options: &ReplayOptions) -> Vec<RestorePoint> {
        let events = self.events_for(record, options);
        let mut points: Vec<RestorePoint> = Vec::new();

        for event in events {
            match points.iter_mut().find(|p| p.at == event.at) {
                Some(point) => point.fields.push(event.field),
                None => points.push(RestorePoint {
                    at: event.at,
                    fields: vec![event.field],
                }),
            }
        }

        points.sort_by(|a, b| b.at.cmp(&a.at));
        points
    }
}
