//! Error types for the exploration pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loader and filter operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Error type returned by the core pipeline.
///
/// Empty query results and absent optional columns are not errors; they
/// surface as "no data" / "column not available" report text instead.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// A city/month/day value outside the fixed enumerations. Raised while
    /// parsing filter input, before any data file is touched.
    #[error("invalid filter value '{value}': expected {expected}")]
    InvalidFilter {
        value: String,
        expected: &'static str,
    },

    /// The source file for a city is missing, unreadable, or does not
    /// conform to the expected schema. Fatal for the query, never retried.
    #[error("data source {}: {}", .path.display(), .message)]
    DataSource { path: PathBuf, message: String },

    /// Low-level CSV read error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
