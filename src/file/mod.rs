//! File system boundary for documents.
//!
//! All document I/O funnels through here: whole-file reads into a fresh
//! [`Document`], whole-file overwrites on save. Failures are converted into
//! [`FileError`] values for the controller to report; nothing in this module
//! talks to the user and nothing is retried.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::Document;

/// A failed document read or write.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Outcome of [`save_document`] for a document that may lack a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content written, modified flag cleared.
    Saved,
    /// The document has no backing path; the caller must ask for one and
    /// route through [`save_document_as`].
    NeedsPath,
}

/// Read `path` and build an unmodified document from it.
pub fn open_document(path: &Path) -> Result<Document, FileError> {
    let content = fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "opened document");
    Ok(Document::from_file_contents(path, content))
}

/// Write the document to its backing path, full-overwrite.
///
/// On success the modified flag is cleared; on failure it is left untouched
/// so the unsaved state stays visible.
pub fn save_document(doc: &mut Document) -> Result<SaveOutcome, FileError> {
    let Some(path) = doc.file_path().map(Path::to_path_buf) else {
        return Ok(SaveOutcome::NeedsPath);
    };
    fs::write(&path, doc.content()).map_err(|source| FileError::Write {
        path: path.clone(),
        source,
    })?;
    doc.set_modified(false);
    tracing::debug!(path = %path.display(), "saved document");
    Ok(SaveOutcome::Saved)
}

/// Point the document at a new path, then save it there.
///
/// The path is recorded before the write attempt, as a failed save-as still
/// leaves the document associated with the chosen destination.
pub fn save_document_as(doc: &mut Document, path: &Path) -> Result<(), FileError> {
    doc.set_file_path(path);
    match save_document(doc)? {
        SaveOutcome::Saved => Ok(()),
        // Unreachable in practice: the path was just set.
        SaveOutcome::NeedsPath => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_open_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");

        let mut doc = Document::new();
        doc.set_content("line one\nline two\n");
        doc.set_file_path(&path);
        assert_eq!(save_document(&mut doc).unwrap(), SaveOutcome::Saved);
        assert!(!doc.is_modified());

        let reopened = open_document(&path).unwrap();
        assert_eq!(reopened.content(), "line one\nline two\n");
        assert!(!reopened.is_modified());
        assert_eq!(reopened.file_path(), Some(path.as_path()));
    }

    #[test]
    fn test_save_without_path_asks_for_one() {
        let mut doc = Document::new();
        doc.set_content("unsaved");
        assert_eq!(save_document(&mut doc).unwrap(), SaveOutcome::NeedsPath);
        assert!(doc.is_modified(), "nothing was written");
    }

    #[test]
    fn test_save_as_sets_path_and_clears_modified() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("renamed.txt");

        let mut doc = Document::new();
        doc.set_content("hello");
        save_document_as(&mut doc, &path).unwrap();

        assert_eq!(doc.file_path(), Some(path.as_path()));
        assert!(!doc.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_open_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let err = open_document(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
    }

    #[test]
    fn test_failed_write_keeps_modified_flag() {
        let dir = tempdir().unwrap();
        let mut doc = Document::new();
        doc.set_content("content");
        // A directory cannot be written as a file.
        doc.set_file_path(dir.path());

        let err = save_document(&mut doc).unwrap_err();
        assert!(matches!(err, FileError::Write { .. }));
        assert!(doc.is_modified(), "failed save must not clear the flag");
    }

    #[test]
    fn test_failed_save_as_keeps_chosen_path() {
        let dir = tempdir().unwrap();
        let mut doc = Document::new();
        doc.set_content("content");

        let target = dir.path().to_path_buf();
        assert!(save_document_as(&mut doc, &target).is_err());
        assert_eq!(doc.file_path(), Some(target.as_path()));
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "a much longer original body").unwrap();

        let mut doc = Document::new();
        doc.set_content("short");
        doc.set_file_path(&path);
        save_document(&mut doc).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }
}
