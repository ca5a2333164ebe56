use std::cmp::Reverse;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tempfile::NamedTempFile;
use walkdir::{DirEntry, WalkDir};

use crate::model::note::Note;
use crate::parse::{extract, note_id};

/// Error type for notebook I/O
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("note already exists: {0}")]
    NoteExists(PathBuf),
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

/// A line of a note that contains the task marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub path: PathBuf,
    /// Note id of the file (see `note_id`)
    pub id: String,
    /// 1-based
    pub line_number: usize,
    pub text: String,
}

/// All markdown files under `dir`, most recently modified first.
/// Hidden directories (`.obsidian`, `.git`) are skipped.
pub fn list_note_files(dir: &Path) -> Result<Vec<PathBuf>, NotebookError> {
    let mut files: Vec<(SystemTime, PathBuf)> = markdown_entries(dir)?
        .map(|entry| {
            let mtime = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (mtime, entry.into_path())
        })
        .collect();
    files.sort_by_key(|(mtime, _)| Reverse(*mtime));
    tracing::debug!(dir = %dir.display(), count = files.len(), "listed notes");
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Read and extract every note under `dir`, most recently modified first.
/// Files that cannot be read are skipped.
pub fn read_notes(dir: &Path) -> Result<Vec<Note>, NotebookError> {
    let mut notes = Vec::new();
    for path in list_note_files(dir)? {
        match read_note(&path) {
            Ok(note) => notes.push(note),
            Err(e) => tracing::warn!(error = %e, "skipping unreadable note"),
        }
    }
    Ok(notes)
}

/// Read one note file. Undecodable content is not an error (see `NoteText`).
pub fn read_note(path: &Path) -> Result<Note, NotebookError> {
    let bytes = fs::read(path).map_err(|e| NotebookError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(extract(path, &bytes))
}

/// Every line containing `marker`, in path order then line order
pub fn search_marker(dir: &Path, marker: &str) -> Result<Vec<SearchHit>, NotebookError> {
    let mut paths: Vec<PathBuf> = markdown_entries(dir)?.map(DirEntry::into_path).collect();
    paths.sort();

    let mut hits = Vec::new();
    for path in paths {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable note");
                continue;
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let id = note_id(&path);
        for (idx, line) in text.lines().enumerate() {
            if line.contains(marker) {
                hits.push(SearchHit {
                    path: path.clone(),
                    id: id.clone(),
                    line_number: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }
    tracing::debug!(marker, count = hits.len(), "marker search");
    Ok(hits)
}

/// Write a new note atomically. Never overwrites an existing file.
pub fn create_note(path: &Path, content: &str) -> Result<(), NotebookError> {
    if path.exists() {
        return Err(NotebookError::NoteExists(path.to_path_buf()));
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == io::ErrorKind::AlreadyExists {
            NotebookError::NoteExists(path.to_path_buf())
        } else {
            NotebookError::IoError(e.error)
        }
    })?;
    tracing::debug!(path = %path.display(), "created note");
    Ok(())
}

fn markdown_entries(dir: &Path) -> Result<impl Iterator<Item = DirEntry>, NotebookError> {
    if !dir.is_dir() {
        return Err(NotebookError::NotADirectory(dir.to_path_buf()));
    }
    Ok(WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md")))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn set_mtime(path: &Path, secs: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "a.md", "x");
        assert!(matches!(
            list_note_files(&file),
            Err(NotebookError::NotADirectory(_))
        ));
        assert!(matches!(
            list_note_files(&tmp.path().join("missing")),
            Err(NotebookError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_list_sorted_by_mtime_and_recursive() {
        let tmp = TempDir::new().unwrap();
        let old = write(tmp.path(), "old.md", "# old");
        let new = write(tmp.path(), "20240106T101010/index.md", "# new");
        let mid = write(tmp.path(), "mid.md", "# mid");
        write(tmp.path(), "readme.txt", "not a note");
        write(tmp.path(), ".obsidian/hidden.md", "# hidden");
        set_mtime(&old, 1_000);
        set_mtime(&mid, 2_000);
        set_mtime(&new, 3_000);

        let files = list_note_files(tmp.path()).unwrap();
        assert_eq!(files, vec![new, mid, old]);
    }

    #[test]
    fn test_read_notes_extracts_each_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "20220822T155803.md", "# python - mock multiple input calls\n");
        write(tmp.path(), "bad.md", "\u{0}");
        fs::write(tmp.path().join("latin1.md"), [0x23, 0x20, 0xe9]).unwrap();

        let notes = read_notes(tmp.path()).unwrap();
        assert_eq!(notes.len(), 3);
        let note = notes.iter().find(|n| n.id == "20220822T155803").unwrap();
        assert_eq!(note.title, "python - mock multiple input calls");
        let degraded = notes.iter().find(|n| n.id == "latin1").unwrap();
        assert!(degraded.content.is_degraded());
    }

    #[test]
    fn test_read_note_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_note(&tmp.path().join("gone.md")).unwrap_err();
        assert!(matches!(err, NotebookError::ReadError { .. }));
        assert!(err.to_string().contains("gone.md"));
    }

    #[test]
    fn test_search_marker_hits() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.md",
            "# a\n- [ ] first @todo\nplain line\n- [x] second @todo @clock(25:00)\n",
        );
        write(tmp.path(), "b/index.md", "@todo without checkbox\n");
        write(tmp.path(), "c.md", "- [ ] no marker\n");

        let hits = search_marker(tmp.path(), "@todo").unwrap();
        let summary: Vec<(String, usize)> =
            hits.iter().map(|h| (h.id.clone(), h.line_number)).collect();
        assert_eq!(
            summary,
            vec![("a".to_string(), 2), ("a".to_string(), 4), ("b".to_string(), 1)]
        );
        assert_eq!(hits[1].text, "- [x] second @todo @clock(25:00)");
    }

    #[test]
    fn test_create_note_never_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("20240101T000000.md");
        create_note(&path, "# hello\n\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# hello\n\n");

        let err = create_note(&path, "# other\n").unwrap_err();
        assert!(matches!(err, NotebookError::NoteExists(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# hello\n\n");
    }

    #[test]
    fn test_create_note_makes_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("20240106T101010").join("index.md");
        create_note(&path, "# folder note\n").unwrap();
        assert!(path.exists());
    }
}
