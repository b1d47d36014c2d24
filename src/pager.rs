//! Fixed-size windows over a filtered trip table for raw-data display.

use crate::trips::{TripRecord, TripTable};

/// Rows served per page.
pub const PAGE_SIZE: usize = 5;

/// Serves successive [`PAGE_SIZE`]-row windows of a table in filtered order.
///
/// The final page may be shorter; once every row has been served,
/// [`RawDataPager::next_page`] returns `None`.
#[derive(Debug)]
pub struct RawDataPager<'a> {
    rows: &'a [TripRecord],
    offset: usize,
}

impl<'a> RawDataPager<'a> {
    pub fn new(table: &'a TripTable) -> Self {
        Self {
            rows: &table.trips,
            offset: 0,
        }
    }

    /// Returns the next window of up to [`PAGE_SIZE`] rows, or `None` once
    /// the table is exhausted.
    pub fn next_page(&mut self) -> Option<&'a [TripRecord]> {
        if self.offset >= self.rows.len() {
            return None;
        }
        let end = usize::min(self.offset + PAGE_SIZE, self.rows.len());
        let page = &self.rows[self.offset..end];
        self.offset = end;
        Some(page)
    }
}
