use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::note::Note;
use crate::ops::OpsError;
use crate::parse::clock::TIMESTAMP_FORMAT;

/// First note (in listing order) whose plain or display title is `title`
pub fn find_by_title<'a>(notes: &'a [Note], title: &str) -> Option<&'a Note> {
    notes.iter().find(|n| n.matches_title(title))
}

/// Like `find_by_title`, but a missing note is an error
pub fn require_by_title<'a>(notes: &'a [Note], title: &str) -> Result<&'a Note, OpsError> {
    find_by_title(notes, title).ok_or_else(|| OpsError::NoteNotFound(title.to_string()))
}

/// Path relative to the notebook root, without the `.md` extension,
/// with `/` separators: `20240106T101010/index`
pub fn link_target(note: &Note, root: &Path) -> String {
    let rel = note.path.strip_prefix(root).unwrap_or(&note.path);
    let rel = rel.with_extension("");
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `[[target|title]]`
pub fn wikilink(note: &Note, root: &Path) -> String {
    format!("[[{}|{}]]", link_target(note, root), note.title)
}

/// New note ids are timestamps: `20240105T101010`
pub fn new_note_id(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// `# <query>` heading, lowercased. A blank query is an error.
pub fn new_note_content(query: &str) -> Result<String, OpsError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(OpsError::EmptyQuery);
    }
    Ok(format!("# {}\n\n", query.to_lowercase()))
}

/// A daily note to create: file name and initial content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNote {
    pub file_name: String,
    pub content: String,
}

/// Daily notes for every date in `from..=to`
pub fn daily_notes(from: NaiveDate, to: NaiveDate) -> Result<Vec<DailyNote>, OpsError> {
    if from > to {
        return Err(OpsError::InvalidDateRange { from, to });
    }
    Ok(from
        .iter_days()
        .take_while(|d| *d <= to)
        .map(|d| DailyNote {
            file_name: format!("daily-{}.md", d.format("%Y%m%d")),
            content: format!("# daily {}\n\n", d.format("%d/%m/%Y")),
        })
        .collect())
}
