pub mod error;
pub mod filters;
pub mod loader;
pub mod pager;
pub mod report;
pub mod stats;
pub mod trips;
