//! Validated filter enumerations: city, month, and day of week.
//!
//! Every value is checked against a fixed set while parsing, so anything
//! downstream of a [`FilterSpec`] can assume its fields are well-formed.

use std::fmt;
use std::str::FromStr;

use crate::error::{ExplorerError, ExplorerResult};

/// Lowercase month names accepted in filter input, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Lowercase day names accepted in filter input, Monday first.
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// English name for a 1-based month number.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`.
pub fn month_label(month: u32) -> &'static str {
    MONTH_LABELS[(month - 1) as usize]
}

/// English name for a 0-based, Monday-first weekday index.
///
/// # Panics
///
/// Panics if `day` is not in `0..=6`.
pub fn day_label(day: u32) -> &'static str {
    DAY_LABELS[day as usize]
}

/// A supported city. Each maps to one fixed CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    /// File name of this city's dataset, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        }
    }
}

impl FromStr for City {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york" | "new york city" => Ok(City::NewYork),
            "washington" => Ok(City::Washington),
            other => Err(ExplorerError::InvalidFilter {
                value: other.to_string(),
                expected: "one of: chicago, new york, washington",
            }),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Month filter: everything, or one 1-based month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Month(u32),
}

impl MonthFilter {
    /// Whether a row with the given derived month number passes this filter.
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized == "all" {
            return Ok(MonthFilter::All);
        }
        match MONTH_NAMES.iter().position(|&m| m == normalized) {
            Some(idx) => Ok(MonthFilter::Month(idx as u32 + 1)),
            None => Err(ExplorerError::InvalidFilter {
                value: normalized,
                expected: "\"all\" or a lowercase month name",
            }),
        }
    }
}

/// Day-of-week filter: everything, or one 0-based Monday-first index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(u32),
}

impl DayFilter {
    /// Whether a row with the given derived weekday index passes this filter.
    pub fn matches(self, day: u32) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => d == day,
        }
    }
}

impl FromStr for DayFilter {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized == "all" {
            return Ok(DayFilter::All);
        }
        match DAY_NAMES.iter().position(|&d| d == normalized) {
            Some(idx) => Ok(DayFilter::Day(idx as u32)),
            None => Err(ExplorerError::InvalidFilter {
                value: normalized,
                expected: "\"all\" or a lowercase day name",
            }),
        }
    }
}

/// The validated (city, month, day) triple driving one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSpec {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// Parses and validates raw string input, e.g. from CLI arguments.
    pub fn from_args(city: &str, month: &str, day: &str) -> ExplorerResult<Self> {
        Ok(Self {
            city: city.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        })
    }
}
