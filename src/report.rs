//! Text and JSON rendering for computed trip statistics.

use anyhow::Result;
use tracing::debug;

use crate::filters::{day_label, month_label};
use crate::stats::{DurationStats, StationStats, TimeStats, TripStats, UserStats};
use crate::trips::TripRecord;

const DIVIDER: &str = "----------------------------------------";
const NO_DATA: &str = "No data for this filter.";

/// Renders the full four-section report as display text.
pub fn render_report(stats: &TripStats) -> String {
    let sections = [
        render_time_stats(&stats.times),
        render_station_stats(&stats.stations),
        render_duration_stats(&stats.duration),
        render_user_stats(&stats.users),
    ];
    let mut out = String::new();
    for section in sections {
        out.push_str(&section);
        out.push_str(DIVIDER);
        out.push('\n');
    }
    out
}

/// Renders statistics as pretty-printed JSON.
pub fn render_json(stats: &TripStats) -> Result<String> {
    debug!(rows = stats.row_count, "Serializing report to JSON");
    Ok(serde_json::to_string_pretty(stats)?)
}

/// The most frequent times of travel section.
pub fn render_time_stats(times: &TimeStats) -> String {
    let mut out = String::from("The Most Frequent Times of Travel\n");
    match (times.popular_month, times.popular_weekday, times.popular_hour) {
        (Some(month), Some(weekday), Some(hour)) => {
            out.push_str(&format!("Most common month: {}\n", month_label(month)));
            out.push_str(&format!("Most common day of week: {}\n", day_label(weekday)));
            out.push_str(&format!("Most common hour of day: {hour}\n"));
        }
        _ => out.push_str(&format!("{NO_DATA}\n")),
    }
    out
}

/// The most popular stations and trip section.
pub fn render_station_stats(stations: &StationStats) -> String {
    let mut out = String::from("The Most Popular Stations and Trip\n");
    match (
        &stations.popular_start_station,
        &stations.popular_end_station,
        &stations.popular_trip,
    ) {
        (Some(start), Some(end), Some(pair)) => {
            out.push_str(&format!("Most common start station: {start}\n"));
            out.push_str(&format!("Most common end station: {end}\n"));
            out.push_str(&format!(
                "Most common trip from start to end stations: {pair}\n"
            ));
        }
        _ => out.push_str(&format!("{NO_DATA}\n")),
    }
    out
}

/// The trip duration section. Values print at the dataset's native
/// precision; no rounding is applied here.
pub fn render_duration_stats(duration: &DurationStats) -> String {
    let mut out = String::from("Trip Duration\n");
    match duration.mean_secs {
        Some(mean) => {
            out.push_str(&format!("Total travel time: {}\n", duration.total_secs));
            out.push_str(&format!("Average travel time: {mean}\n"));
        }
        None => out.push_str(&format!("{NO_DATA}\n")),
    }
    out
}

/// The user statistics section, including the per-field unavailable notices
/// for cities whose files do not carry gender or birth year.
pub fn render_user_stats(users: &UserStats) -> String {
    let mut out = String::from("User Stats\n");

    if users.user_type_counts.is_empty() {
        out.push_str(&format!("{NO_DATA}\n"));
    } else {
        for (user_type, count) in &users.user_type_counts {
            out.push_str(&format!("{user_type}: {count}\n"));
        }
    }

    if !users.gender_available {
        out.push_str("※ Gender column is not available\n");
    } else if users.gender_counts.is_empty() {
        out.push_str("No gender data for this filter.\n");
    } else {
        for (gender, count) in &users.gender_counts {
            out.push_str(&format!("{gender}: {count}\n"));
        }
    }

    if !users.birth_year_available {
        out.push_str("※ Birth Year column is not available\n");
    } else {
        match &users.birth_year {
            Some(by) => {
                out.push_str(&format!("Earliest birth year: {}\n", by.earliest));
                out.push_str(&format!("Most recent birth year: {}\n", by.most_recent));
                out.push_str(&format!("Most common birth year: {}\n", by.most_common));
            }
            None => out.push_str("No birth year data for this filter.\n"),
        }
    }

    out
}

/// Renders a page of raw trip rows, one line per trip.
pub fn render_rows(rows: &[TripRecord]) -> String {
    let mut out = String::new();
    for trip in rows {
        out.push_str(&format!(
            "{} | {} -> {} | {}s | {}",
            trip.start_time.format("%Y-%m-%d %H:%M:%S"),
            trip.start_station,
            trip.end_station,
            trip.duration_secs,
            trip.user_type,
        ));
        if let Some(gender) = &trip.gender {
            out.push_str(&format!(" | {gender}"));
        }
        if let Some(year) = trip.birth_year {
            out.push_str(&format!(" | {year}"));
        }
        out.push('\n');
    }
    out
}
