//! Trip record and table types shared by the loader and the reporters.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

/// Separator used when joining start and end stations into a trip pair.
pub const STATION_PAIR_SEPARATOR: &str = " -> ";

/// One bike-share rental.
///
/// Calendar fields (month, weekday, hour) are always derived from
/// `start_time` on access so they can never go stale after filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: String,
    pub end_station: String,
    /// Trip duration in seconds, kept at the source's native precision.
    pub duration_secs: f64,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// 1-based month number of the trip start.
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    /// 0-based weekday index of the trip start, Monday = 0 .. Sunday = 6.
    pub fn weekday_index(&self) -> u32 {
        self.start_time.weekday().num_days_from_monday()
    }

    /// Hour of day (0-23) of the trip start.
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// The `"start -> end"` station pair string.
    pub fn station_pair(&self) -> String {
        format!(
            "{}{}{}",
            self.start_station, STATION_PAIR_SEPARATOR, self.end_station
        )
    }
}

/// An ordered collection of trips with a uniform schema.
///
/// The capability flags record which optional columns the source file
/// carried; two of the three cities ship gender and birth year, one does not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripTable {
    pub trips: Vec<TripRecord>,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl TripTable {
    /// Number of trips in the table.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
