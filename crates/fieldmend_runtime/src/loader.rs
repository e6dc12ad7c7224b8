//! CSV loading and saving.
//!
//! Three inputs arrive as CSV: the tracker export itself, the field
//! history log, and the old-to-new swap-pair list. Column matching is by
//! header name; anything beyond the required columns of the tracker
//! export rides along as pass-through data.

use std::io::{Read, Write};
use std::path::Path;

use fieldmend_foundation::{Dataset, Error, ErrorKind, FieldPath, Result, SubColumn, TrackerRow};
use fieldmend_history::{parse_timestamp, EventStore, HistoryEvent};

/// Header of the record-id column in every input file.
pub const ID_COLUMN: &str = "Id";

/// Headers of the history log's event columns.
const HISTORY_COLUMNS: [&str; 4] = ["Field", "ModifiedDate", "OldValue", "NewValue"];

/// Header of the history log's optional author column.
const AUTHOR_COLUMN: &str = "Author";

/// Headers of the swap-pair list.
const SWAP_COLUMNS: [&str; 2] = ["OldFieldAPI", "NewFieldAPI"];

fn csv_error(context: &str, error: &csv::Error) -> Error {
    Error::new(ErrorKind::SerializationError(format!("{context}: {error}")))
}

fn io_error(path: &Path, error: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!("'{}': {error}", path.display())))
}

fn missing_column(name: &str) -> Error {
    Error::new(ErrorKind::SerializationError(format!(
        "missing required column '{name}'"
    )))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| missing_column(name))
}

/// Reads a tracker export into a [`Dataset`].
///
/// Requires the `Id` column and the four sub-columns by name; every
/// other column is preserved as pass-through data.
///
/// # Errors
/// Fails on malformed CSV or a missing required column.
pub fn dataset_from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv
        .headers()
        .map_err(|e| csv_error("tracker export", &e))?
        .clone();

    let id_index = column_index(&headers, ID_COLUMN)?;
    for column in SubColumn::ALL {
        column_index(&headers, column.name())?;
    }

    let mut dataset = Dataset::new();
    for record in csv.records() {
        let record = record.map_err(|e| csv_error("tracker export", &e))?;
        let id = record.get(id_index).unwrap_or_default();
        if id.is_empty() {
            continue;
        }

        let mut row = TrackerRow::new(id);
        for (index, value) in record.iter().enumerate() {
            if index == id_index {
                continue;
            }
            let Some(name) = headers.get(index) else {
                continue;
            };
            row = match SubColumn::from_name(name) {
                Some(column) => row.with_column(column, value),
                None => row.with_passthrough(name, value),
            };
        }
        dataset.insert(row);
    }

    Ok(dataset)
}

/// Reads a tracker export file into a [`Dataset`].
///
/// # Errors
/// Fails on I/O problems, malformed CSV, or a missing required column.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| io_error(path.as_ref(), &e))?;
    dataset_from_reader(file)
}

/// Writes a dataset back out as CSV.
///
/// The header is `Id`, the four sub-columns, then every pass-through
/// column name seen across the dataset, sorted.
///
/// # Errors
/// Fails when writing fails.
pub fn dataset_to_writer<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut passthrough_names: Vec<&str> = Vec::new();
    for (_, row) in dataset.iter() {
        for name in row.passthrough().keys() {
            if !passthrough_names.contains(&name.as_str()) {
                passthrough_names.push(name);
            }
        }
    }
    passthrough_names.sort_unstable();

    let mut header = vec![ID_COLUMN];
    header.extend(SubColumn::ALL.iter().map(|c| c.name()));
    header.extend(passthrough_names.iter().copied());
    csv.write_record(&header)
        .map_err(|e| csv_error("tracker export", &e))?;

    for (id, row) in dataset.iter() {
        let mut record = vec![id.as_str().to_string()];
        for column in SubColumn::ALL {
            record.push(row.column(column).to_string());
        }
        for name in &passthrough_names {
            record.push(row.get(name).unwrap_or_default().to_string());
        }
        csv.write_record(&record)
            .map_err(|e| csv_error("tracker export", &e))?;
    }

    csv.flush()
        .map_err(|e| Error::new(ErrorKind::IoError(e.to_string())))?;
    Ok(())
}

/// Writes a dataset to a CSV file.
///
/// # Errors
/// Fails on I/O problems.
pub fn save_dataset<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let file = std::fs::File::create(path.as_ref()).map_err(|e| io_error(path.as_ref(), &e))?;
    dataset_to_writer(dataset, file)
}

/// Reads a field history log into an [`EventStore`].
///
/// Requires `Id`, `Field`, `ModifiedDate`, `OldValue`, and `NewValue`
/// columns; `Author` is used when present. Timestamps are day-first.
/// Log order assigns the tie-break sequence numbers.
///
/// # Errors
/// Fails on malformed CSV, a missing required column, or an unparsable
/// timestamp.
pub fn events_from_reader<R: Read>(reader: R) -> Result<EventStore> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv
        .headers()
        .map_err(|e| csv_error("history log", &e))?
        .clone();

    let id_index = column_index(&headers, ID_COLUMN)?;
    let mut indexes = [0usize; 4];
    for (slot, name) in indexes.iter_mut().zip(HISTORY_COLUMNS) {
        *slot = column_index(&headers, name)?;
    }
    let [field_index, date_index, old_index, new_index] = indexes;
    let author_index = headers.iter().position(|h| h == AUTHOR_COLUMN);

    let mut store = EventStore::new();
    for record in csv.records() {
        let record = record.map_err(|e| csv_error("history log", &e))?;
        let id = record.get(id_index).unwrap_or_default();
        let field = record.get(field_index).unwrap_or_default();
        if id.is_empty() && field.is_empty() {
            continue;
        }

        let author = author_index
            .and_then(|index| record.get(index))
            .filter(|value| !value.is_empty())
            .map(ToString::to_string);

        store.push(HistoryEvent {
            record: id.into(),
            field: field.to_string(),
            at: parse_timestamp(record.get(date_index).unwrap_or_default())?,
            old_value: record.get(old_index).unwrap_or_default().to_string(),
            new_value: record.get(new_index).unwrap_or_default().to_string(),
            author,
            sequence: 0,
        });
    }

    Ok(store)
}

/// Reads a field history log file into an [`EventStore`].
///
/// # Errors
/// Fails on I/O problems or anything [`events_from_reader`] rejects.
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<EventStore> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| io_error(path.as_ref(), &e))?;
    events_from_reader(file)
}

/// Reads a swap-pair list: `OldFieldAPI,NewFieldAPI` per row.
///
/// Rows with either side blank are skipped. A repeated old path keeps
/// its original position but takes the last replacement seen.
///
/// # Errors
/// Fails on malformed CSV, a missing required column, or an unparsable
/// field path.
pub fn swap_pairs_from_reader<R: Read>(reader: R) -> Result<Vec<(FieldPath, FieldPath)>> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv
        .headers()
        .map_err(|e| csv_error("swap pairs", &e))?
        .clone();

    let old_index = column_index(&headers, SWAP_COLUMNS[0])?;
    let new_index = column_index(&headers, SWAP_COLUMNS[1])?;

    let mut pairs: Vec<(FieldPath, FieldPath)> = Vec::new();
    for record in csv.records() {
        let record = record.map_err(|e| csv_error("swap pairs", &e))?;
        let old_text = record.get(old_index).unwrap_or_default().trim();
        let new_text = record.get(new_index).unwrap_or_default().trim();
        if old_text.is_empty() || new_text.is_empty() {
            continue;
        }

        let old = FieldPath::parse(old_text)?;
        let new = FieldPath::parse(new_text)?;
        match pairs.iter_mut().find(|(existing, _)| *existing == old) {
            Some(pair) => pair.1 = new,
            None => pairs.push((old, new)),
        }
    }

    Ok(pairs)
}

/// Reads a swap-pair file.
///
/// # Errors
/// Fails on I/O problems or anything [`swap_pairs_from_reader`] rejects.
pub fn load_swap_pairs<P: AsRef<Path>>(path: P) -> Result<Vec<(FieldPath, FieldPath)>> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| io_error(path.as_ref(), &e))?;
    swap_pairs_from_reader(file)
}
