use std::path::Path;

use indexmap::IndexSet;
use serde_yaml::Value;

use crate::model::note::{FrontMatter, Note, NoteText};
use crate::parse::front_matter::split_front_matter;

/// Build a note from its path and raw bytes. Never fails: undecodable bytes
/// and malformed front matter degrade instead.
pub fn extract(path: &Path, bytes: &[u8]) -> Note {
    let id = note_id(path);
    let content = NoteText::from_bytes(bytes);

    let (front_matter, body) = match &content {
        NoteText::Decoded(text) => split_front_matter(text),
        NoteText::Undecodable { reason } => (FrontMatter::Absent, reason.as_str()),
    };

    let title = front_matter_title(&front_matter)
        .or_else(|| heading_title(body))
        .unwrap_or_else(|| id.clone());
    let tags = front_matter
        .get("tags")
        .map(tag_candidates)
        .map(normalize_tags)
        .unwrap_or_default();

    Note {
        path: path.to_path_buf(),
        id,
        content,
        front_matter,
        title,
        tags,
    }
}

/// File stem, except `index.md` which takes its directory's name
pub fn note_id(path: &Path) -> String {
    if path.file_name().is_some_and(|n| n == "index.md")
        && let Some(dir) = path.parent().and_then(Path::file_name)
    {
        return dir.to_string_lossy().into_owned();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn front_matter_title(fm: &FrontMatter) -> Option<String> {
    let title = scalar_text(fm.get("title")?)?;
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Only the first line of the body is considered
fn heading_title(body: &str) -> Option<String> {
    let first = body.lines().next()?;
    if !first.starts_with('#') {
        return None;
    }
    let text = first.trim_start_matches('#').trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// `tags: a, b` or `tags: [a, b]`
fn tag_candidates(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        other => match scalar_text(other) {
            Some(s) => s.split(',').map(str::to_string).collect(),
            None => Vec::new(),
        },
    }
}

fn normalize_tags(candidates: Vec<String>) -> Vec<String> {
    candidates
        .iter()
        .map(|c| c.trim().trim_start_matches('#').trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
