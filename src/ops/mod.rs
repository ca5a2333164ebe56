pub mod notes;
pub mod obsidian;
pub mod tasks;

use chrono::NaiveDate;

/// Error type for notebook operations
#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    #[error("note not found: {0}")]
    NoteNotFound(String),
    #[error("task not found: {0}")]
    TaskNotFound(String),
    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },
    #[error("invalid status filter: {0} (expected open, closed or all)")]
    InvalidStatusFilter(String),
    #[error("empty query: a new note needs a title")]
    EmptyQuery,
}
