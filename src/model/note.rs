use std::path::PathBuf;

/// Decoded text of a note file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteText {
    Decoded(String),
    /// Bytes were not valid UTF-8. The reason doubles as placeholder content.
    Undecodable { reason: String },
}

impl NoteText {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(s) => NoteText::Decoded(s.to_string()),
            Err(e) => NoteText::Undecodable {
                reason: e.to_string(),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NoteText::Decoded(s) => s,
            NoteText::Undecodable { reason } => reason,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, NoteText::Undecodable { .. })
    }
}

/// Outcome of looking for a metadata block at the top of a note
#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatter {
    /// No delimited block (or the block is not a key-value mapping)
    Absent,
    Parsed(serde_yaml::Mapping),
    /// The block exists but is not valid YAML
    Malformed { reason: String },
}

impl FrontMatter {
    pub fn mapping(&self) -> Option<&serde_yaml::Mapping> {
        match self {
            FrontMatter::Parsed(m) => Some(m),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.mapping()?.get(key)
    }
}

/// One markdown file in the notebook
#[derive(Debug, Clone)]
pub struct Note {
    pub path: PathBuf,
    /// File stem, or the parent directory name for `index.md`
    pub id: String,
    pub content: NoteText,
    pub front_matter: FrontMatter,
    pub title: String,
    /// Normalized, deduplicated, in first-occurrence order
    pub tags: Vec<String>,
}

impl Note {
    /// Title plus `[#tag, #tag]` when the note has tags
    pub fn display_title(&self) -> String {
        if self.tags.is_empty() {
            return self.title.clone();
        }
        let tags: Vec<String> = self.tags.iter().map(|t| format!("#{}", t)).collect();
        format!("{} [{}]", self.title, tags.join(", "))
    }

    /// True if `label` is either the plain or the display title
    pub fn matches_title(&self, label: &str) -> bool {
        self.title == label || self.display_title() == label
    }
}
