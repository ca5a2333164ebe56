use chrono::{NaiveDateTime, TimeDelta};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Task status, derived from the checkbox character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Next,
    Focus,
    InProgress,
    Someday,
    Done,
}

impl TaskStatus {
    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(self) -> char {
        match self {
            TaskStatus::Next => ' ',
            TaskStatus::Focus => '!',
            TaskStatus::InProgress => '@',
            TaskStatus::Someday => '?',
            TaskStatus::Done => 'x',
        }
    }

    /// Parse a checkbox character into a status. Unknown characters are not
    /// an error, they simply have no status.
    pub fn from_checkbox_char(c: char) -> Option<TaskStatus> {
        match c {
            ' ' => Some(TaskStatus::Next),
            '!' => Some(TaskStatus::Focus),
            '@' => Some(TaskStatus::InProgress),
            '?' => Some(TaskStatus::Someday),
            'x' => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Status keyword as shown in labels and JSON
    pub fn keyword(self) -> &'static str {
        match self {
            TaskStatus::Next => "next",
            TaskStatus::Focus => "focus",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Someday => "someday",
            TaskStatus::Done => "done",
        }
    }
}

/// One interval recorded inside a `@clock(...)` annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Start of the interval, only for `START/DURATION` tokens
    pub start: Option<NaiveDateTime>,
    /// `start + duration`; `None` whenever `start` is `None`
    pub end: Option<NaiveDateTime>,
    #[serde(serialize_with = "serialize_seconds")]
    pub duration: TimeDelta,
}

impl Session {
    pub fn bare(duration: TimeDelta) -> Self {
        Session {
            start: None,
            end: None,
            duration,
        }
    }

    /// `None` if `start + duration` leaves the representable range
    pub fn anchored(start: NaiveDateTime, duration: TimeDelta) -> Option<Self> {
        let end = start.checked_add_signed(duration)?;
        Some(Session {
            start: Some(start),
            end: Some(end),
            duration,
        })
    }
}

fn serialize_seconds<S: Serializer>(d: &TimeDelta, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(d.num_seconds())
}

/// Value of an `@name(...)` annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    /// `@name` or `@name()`
    Flag(bool),
    /// `@name(text)`
    Text(String),
    /// `@clock(...)`, parsed into sessions
    Clock(Vec<Session>),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A task parsed from a single checkbox line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Line text with checkbox and annotations removed
    pub title: String,
    /// `None` when the checkbox character is not recognized
    pub status: Option<TaskStatus>,
    /// Annotations in order of first appearance (`todo` excluded)
    pub tags: IndexMap<String, TagValue>,
    /// Human readable total of all clock sessions
    pub duration: Option<String>,
}

impl Task {
    /// Only an explicit `done` closes a task
    pub fn is_open(&self) -> bool {
        self.status != Some(TaskStatus::Done)
    }

    /// Status keyword, `"unknown"` for unrecognized checkboxes
    pub fn status_keyword(&self) -> &'static str {
        self.status.map_or("unknown", TaskStatus::keyword)
    }

    /// Parsed sessions of the `clock` annotation, if any
    pub fn clock(&self) -> Option<&[Session]> {
        match self.tags.get("clock") {
            Some(TagValue::Clock(sessions)) => Some(sessions),
            _ => None,
        }
    }

    /// Sum of all clock sessions. `None` without a clock tag, or if the
    /// total overflows.
    pub fn clocked(&self) -> Option<TimeDelta> {
        self.clock().and_then(total_duration)
    }
}

/// Checked sum of session durations
pub fn total_duration(sessions: &[Session]) -> Option<TimeDelta> {
    sessions
        .iter()
        .try_fold(TimeDelta::zero(), |acc, s| acc.checked_add(&s.duration))
}
