//! History log in, reconstruction out.

use fieldmend_foundation::RecordId;
use fieldmend_history::{parse_timestamp, reconstruct, ReplayOptions, ReplayStatus};
use fieldmend_runtime::loader;

const EXPORT: &str = "\
Id,Fields,Filters,Logic,Query,Owner,Status
a01,a__c,,,,Carol,Closed
";

const HISTORY: &str = "\
Id,Field,ModifiedDate,OldValue,NewValue
a01,Owner,01/01/2024 10:00,Alice,Bob
a01,Owner,01/01/2024 20:00,Bob,Carol
a01,Status,01/01/2024 20:00,Open,Closed
a01,Label Map,01/01/2024 20:00,,{}
";

#[test]
fn loaded_history_replays_a_row_to_a_cutoff() {
    let dataset = loader::dataset_from_reader(EXPORT.as_bytes()).unwrap();
    let store = loader::events_from_reader(HISTORY.as_bytes()).unwrap();

    let record = RecordId::from("a01");
    let options = ReplayOptions::default();
    let events = store.events_for(&record, &options);
    // The Label Map layout noise is filtered out.
    assert_eq!(events.len(), 3);

    let row = dataset.get(&record).unwrap();
    let cutoff = parse_timestamp("01/01/2024 15:00").unwrap();
    let result = reconstruct(row, &events, cutoff, &options);

    assert_eq!(result.row.get("Owner"), Some("Bob"));
    assert_eq!(result.row.get("Status"), Some("Open"));
    assert_eq!(result.status("Owner"), Some(ReplayStatus::Applied));
    // The untouched sub-columns survive the replay.
    assert_eq!(result.row.get("Fields"), Some("a__c"));
}

#[test]
fn restore_points_come_from_the_loaded_log() {
    let store = loader::events_from_reader(HISTORY.as_bytes()).unwrap();
    let points = store.states_for(&RecordId::from("a01"), &ReplayOptions::default());

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].fields, vec!["Owner".to_string(), "Status".to_string()]);
    assert_eq!(points[1].fields, vec!["Owner".to_string()]);
}
