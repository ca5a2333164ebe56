pub mod clock;
pub mod front_matter;
pub mod note_parser;
pub mod task_parser;

pub use clock::{format_total, parse_clock, parse_duration, parse_session};
pub use front_matter::split_front_matter;
pub use note_parser::{extract, note_id};
pub use task_parser::parse_task;

/// Error type for task and clock parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no checkbox marker in line: {line}")]
    MalformedTask { line: String },
    #[error("malformed duration {input:?}: {reason}")]
    MalformedDuration { input: String, reason: String },
}
