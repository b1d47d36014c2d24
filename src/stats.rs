//! Descriptive statistics over a filtered trip table.
//!
//! Four independent groups: travel times, stations, trip duration, and user
//! demographics. Every computation tolerates an empty table by reporting
//! `None`/empty instead of panicking, and all mode computations use a
//! documented deterministic tie-break so repeated runs produce identical
//! output: lowest value for calendar/numeric modes, first-seen table order
//! for string modes and count orderings.

use std::collections::HashMap;

use serde::Serialize;

use crate::trips::{TripRecord, TripTable};

/// Modes of the calendar fields derived from the start timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// Most common 1-based month number.
    pub popular_month: Option<u32>,
    /// Most common Monday-first weekday index.
    pub popular_weekday: Option<u32>,
    /// Most common hour of day (0-23).
    pub popular_hour: Option<u32>,
}

/// Modes of the station columns and the start/end station pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub popular_start_station: Option<String>,
    pub popular_end_station: Option<String>,
    /// Most common `"start -> end"` pair.
    pub popular_trip: Option<String>,
}

/// Total and mean trip duration, in seconds at native precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_secs: f64,
    pub mean_secs: Option<f64>,
}

/// Earliest, most recent, and most common rider birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// User demographics: type, gender, and birth-year breakdowns.
///
/// The `*_available` flags mirror the source schema; when a flag is false
/// the corresponding column is absent from the city's file entirely, which
/// is different from an empty (but present) column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Counts per user type, descending; ties keep first-seen order.
    pub user_type_counts: Vec<(String, usize)>,
    pub gender_available: bool,
    /// Counts per gender, descending; empty when no gender data matched.
    pub gender_counts: Vec<(String, usize)>,
    pub birth_year_available: bool,
    pub birth_year: Option<BirthYearStats>,
}

/// The complete report computed for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripStats {
    pub row_count: usize,
    pub times: TimeStats,
    pub stations: StationStats,
    pub duration: DurationStats,
    pub users: UserStats,
}

impl TripStats {
    /// Computes all four sub-reports from a (possibly empty) table.
    pub fn from_table(table: &TripTable) -> Self {
        let trips = &table.trips;

        let times = TimeStats {
            popular_month: mode_indexed(trips.iter().map(TripRecord::month), 13),
            popular_weekday: mode_indexed(trips.iter().map(TripRecord::weekday_index), 7),
            popular_hour: mode_indexed(trips.iter().map(TripRecord::hour), 24),
        };

        let pairs: Vec<String> = trips.iter().map(TripRecord::station_pair).collect();
        let stations = StationStats {
            popular_start_station: mode_str(trips.iter().map(|t| t.start_station.as_str())),
            popular_end_station: mode_str(trips.iter().map(|t| t.end_station.as_str())),
            popular_trip: mode_str(pairs.iter().map(String::as_str)),
        };

        let total_secs: f64 = trips.iter().map(|t| t.duration_secs).sum();
        let duration = DurationStats {
            total_secs,
            mean_secs: if trips.is_empty() {
                None
            } else {
                Some(total_secs / trips.len() as f64)
            },
        };

        let users = UserStats {
            user_type_counts: value_counts(trips.iter().map(|t| t.user_type.as_str())),
            gender_available: table.has_gender,
            gender_counts: if table.has_gender {
                value_counts(trips.iter().filter_map(|t| t.gender.as_deref()))
            } else {
                Vec::new()
            },
            birth_year_available: table.has_birth_year,
            birth_year: if table.has_birth_year {
                birth_year_stats(trips)
            } else {
                None
            },
        };

        TripStats {
            row_count: trips.len(),
            times,
            stations,
            duration,
            users,
        }
    }
}

/// Mode over small non-negative integer keys in `0..bound`.
///
/// Ties break to the lowest value, so the result is deterministic no matter
/// the input order. Returns `None` for an empty input.
fn mode_indexed<I: Iterator<Item = u32>>(values: I, bound: usize) -> Option<u32> {
    let mut counts = vec![0usize; bound];
    for v in values {
        counts[v as usize] += 1;
    }
    let best = counts.iter().copied().max().unwrap_or(0);
    if best == 0 {
        return None;
    }
    counts.iter().position(|&c| c == best).map(|i| i as u32)
}

/// Mode over string values; ties break to the value seen first.
fn mode_str<'a, I: Iterator<Item = &'a str>>(values: I) -> Option<String> {
    let (counts, order) = count_in_order(values);
    let mut best: Option<(&str, usize)> = None;
    for v in order {
        let c = counts[v];
        if best.is_none_or(|(_, bc)| c > bc) {
            best = Some((v, c));
        }
    }
    best.map(|(v, _)| v.to_string())
}

/// Frequency counts in descending order; equal counts keep first-seen order
/// (the sort is stable over the insertion-ordered values).
fn value_counts<'a, I: Iterator<Item = &'a str>>(values: I) -> Vec<(String, usize)> {
    let (counts, order) = count_in_order(values);
    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|v| (v.to_string(), counts[v]))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

fn count_in_order<'a, I: Iterator<Item = &'a str>>(
    values: I,
) -> (HashMap<&'a str, usize>, Vec<&'a str>) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for v in values {
        let entry = counts.entry(v).or_insert(0);
        if *entry == 0 {
            order.push(v);
        }
        *entry += 1;
    }
    (counts, order)
}

/// Min, max, and mode of the birth-year column; rows without a value are
/// skipped. Mode ties break to the lowest year.
fn birth_year_stats(trips: &[TripRecord]) -> Option<BirthYearStats> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    let mut earliest = i32::MAX;
    let mut most_recent = i32::MIN;
    for year in trips.iter().filter_map(|t| t.birth_year) {
        *counts.entry(year).or_insert(0) += 1;
        earliest = earliest.min(year);
        most_recent = most_recent.max(year);
    }
    if counts.is_empty() {
        return None;
    }

    let mut best: Option<(i32, usize)> = None;
    for (&year, &count) in &counts {
        let better = match best {
            None => true,
            Some((by, bc)) => count > bc || (count == bc && year < by),
        };
        if better {
            best = Some((year, count));
        }
    }

    best.map(|(most_common, _)| BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}
