use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::note::Note;
use crate::model::task::{Session, TagValue, TaskStatus};
use crate::ops::tasks::LocatedTask;
use crate::util::unicode::pad_to_width;

/// Width of the label column in `zt tasks --long`
const LABEL_WIDTH: usize = 60;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct NoteJson<'a> {
    pub id: &'a str,
    pub path: &'a Path,
    pub title: &'a str,
    pub tags: &'a [String],
    pub display_title: String,
}

impl<'a> From<&'a Note> for NoteJson<'a> {
    fn from(note: &'a Note) -> Self {
        NoteJson {
            id: &note.id,
            path: &note.path,
            title: &note.title,
            tags: &note.tags,
            display_title: note.display_title(),
        }
    }
}

#[derive(Serialize)]
pub struct TaskJson<'a> {
    pub note: &'a str,
    pub line: usize,
    pub label: String,
    pub title: &'a str,
    pub status: Option<TaskStatus>,
    pub open: bool,
    /// Every annotation except `clock`
    pub tags: IndexMap<&'a str, &'a TagValue>,
    pub clock: Option<&'a [Session]>,
    pub duration: Option<&'a str>,
}

impl<'a> From<&'a LocatedTask> for TaskJson<'a> {
    fn from(located: &'a LocatedTask) -> Self {
        let task = &located.task;
        TaskJson {
            note: &located.id,
            line: located.line_number,
            label: located.label(),
            title: &task.title,
            status: task.status,
            open: task.is_open(),
            tags: task
                .tags
                .iter()
                .filter(|(name, _)| name.as_str() != "clock")
                .map(|(name, value)| (name.as_str(), value))
                .collect(),
            clock: task.clock(),
            duration: task.duration.as_deref(),
        }
    }
}

#[derive(Serialize)]
pub struct LocationJson<'a> {
    pub note: &'a str,
    pub path: &'a Path,
    pub line: usize,
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// `label  note:line  duration` with the label column padded
pub fn format_task_row(located: &LocatedTask) -> String {
    let mut row = format!(
        "{}  {}",
        pad_to_width(&located.label(), LABEL_WIDTH),
        located.location()
    );
    if let Some(duration) = &located.task.duration {
        row.push_str("  ");
        row.push_str(duration);
    }
    row
}
