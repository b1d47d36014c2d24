//! Dataset loading: CSV ingestion, timestamp parsing, and month/day filtering.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use tracing::{debug, info};

use crate::error::{ExplorerError, ExplorerResult};
use crate::filters::FilterSpec;
use crate::trips::{TripRecord, TripTable};

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const TRIP_DURATION: &str = "Trip Duration";
const USER_TYPE: &str = "User Type";
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Loads the CSV for the city named in `spec` and applies its month/day
/// filters.
///
/// A zero-row result is valid; filters that match nothing simply produce an
/// empty table.
///
/// # Errors
///
/// Returns [`ExplorerError::DataSource`] when the file is missing, a
/// required column is absent, or any row fails to parse. Unparsable rows are
/// a hard failure by policy; no row is ever silently dropped.
pub fn load_trips(data_dir: impl AsRef<Path>, spec: &FilterSpec) -> ExplorerResult<TripTable> {
    let path = data_dir.as_ref().join(spec.city.file_name());
    if !path.is_file() {
        return Err(ExplorerError::DataSource {
            path,
            message: "file not found".to_string(),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)?;
    let mut table = read_trips(&mut rdr, &path)?;

    let loaded = table.len();
    table
        .trips
        .retain(|t| spec.month.matches(t.month()) && spec.day.matches(t.weekday_index()));

    info!(
        city = spec.city.label(),
        loaded,
        retained = table.len(),
        "Trip table loaded"
    );
    Ok(table)
}

/// Reads trips from an already-open CSV reader.
///
/// Columns are located by header name, so column order and any extra
/// columns (the source files carry an unnamed index column) are ignored.
/// `source` is only used for error context.
pub fn read_trips<R: Read>(rdr: &mut csv::Reader<R>, source: &Path) -> ExplorerResult<TripTable> {
    let headers = rdr.headers()?.clone();

    let start_time_idx = required_column(&headers, START_TIME, source)?;
    let start_station_idx = required_column(&headers, START_STATION, source)?;
    let end_station_idx = required_column(&headers, END_STATION, source)?;
    let duration_idx = required_column(&headers, TRIP_DURATION, source)?;
    let user_type_idx = required_column(&headers, USER_TYPE, source)?;

    let end_time_idx = optional_column(&headers, END_TIME);
    let gender_idx = optional_column(&headers, GENDER);
    let birth_year_idx = optional_column(&headers, BIRTH_YEAR);

    debug!(
        source = %source.display(),
        has_gender = gender_idx.is_some(),
        has_birth_year = birth_year_idx.is_some(),
        "Resolved schema columns"
    );

    let mut trips = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based row number for users; +1 again because the header is row 1.
        let row = row_idx0 + 2;
        let record = result?;

        let start_time = parse_timestamp(cell(&record, start_time_idx), source, row, START_TIME)?;
        let end_time = match end_time_idx {
            Some(idx) if !cell(&record, idx).is_empty() => {
                Some(parse_timestamp(cell(&record, idx), source, row, END_TIME)?)
            }
            _ => None,
        };

        let raw_duration = cell(&record, duration_idx);
        let duration_secs: f64 = raw_duration.parse().map_err(|_| bad_row(
            source,
            row,
            TRIP_DURATION,
            raw_duration,
            "expected a number of seconds",
        ))?;

        let gender = gender_idx
            .map(|idx| cell(&record, idx))
            .filter(|raw| !raw.is_empty())
            .map(str::to_string);
        let birth_year = match birth_year_idx.map(|idx| cell(&record, idx)) {
            Some(raw) if !raw.is_empty() => Some(parse_birth_year(raw, source, row)?),
            _ => None,
        };

        trips.push(TripRecord {
            start_time,
            end_time,
            start_station: cell(&record, start_station_idx).to_string(),
            end_station: cell(&record, end_station_idx).to_string(),
            duration_secs,
            user_type: cell(&record, user_type_idx).to_string(),
            gender,
            birth_year,
        });
    }

    Ok(TripTable {
        trips,
        has_gender: gender_idx.is_some(),
        has_birth_year: birth_year_idx.is_some(),
    })
}

fn required_column(
    headers: &StringRecord,
    name: &str,
    source: &Path,
) -> ExplorerResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ExplorerError::DataSource {
            path: source.to_path_buf(),
            message: format!(
                "missing required column '{name}'. headers={:?}",
                headers.iter().collect::<Vec<_>>()
            ),
        })
}

fn optional_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn cell<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("").trim()
}

fn parse_timestamp(
    raw: &str,
    source: &Path,
    row: usize,
    column: &str,
) -> ExplorerResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|e| bad_row(source, row, column, raw, &e.to_string()))
}

/// Birth years arrive float-formatted in the source files ("1992.0").
fn parse_birth_year(raw: &str, source: &Path, row: usize) -> ExplorerResult<i32> {
    raw.parse::<f64>()
        .map(|y| y as i32)
        .map_err(|_| bad_row(source, row, BIRTH_YEAR, raw, "expected a year"))
}

fn bad_row(source: &Path, row: usize, column: &str, raw: &str, message: &str) -> ExplorerError {
    ExplorerError::DataSource {
        path: source.to_path_buf(),
        message: format!("row {row}, column '{column}': {message} (raw='{raw}')"),
    }
}
