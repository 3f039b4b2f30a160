//! The in-memory document being edited.
//!
//! A [`Document`] owns the text content, the backing file path (if any) and
//! the modified flag. All mutation goes through change-detected setters that
//! notify subscribed observers over plain mpsc channels, so the controller
//! can react to content swaps without polling. Swapping the active document
//! drops its senders wholesale; a stale receiver simply runs dry.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

/// Name shown for a document that has never been saved.
pub const UNTITLED_NAME: &str = "Untitled.txt";

/// Change notifications emitted by [`Document`] setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// The text content was replaced with a different value.
    ContentChanged,
    /// The backing file path changed.
    FilePathChanged(PathBuf),
    /// The modified flag flipped.
    ModifiedChanged(bool),
}

/// A single text document: content, backing path, dirty state.
pub struct Document {
    content: String,
    file_path: Option<PathBuf>,
    modified: bool,
    observers: Vec<Sender<DocumentEvent>>,
}

impl Document {
    /// Create an empty, unmodified document with no backing file.
    pub const fn new() -> Self {
        Self {
            content: String::new(),
            file_path: None,
            modified: false,
            observers: Vec::new(),
        }
    }

    /// Create an unmodified document from file contents and their path.
    pub fn from_file_contents(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            file_path: Some(path.into()),
            modified: false,
            observers: Vec::new(),
        }
    }

    /// Subscribe to change events. Each call returns an independent receiver.
    pub fn subscribe(&mut self) -> Receiver<DocumentEvent> {
        let (tx, rx) = mpsc::channel();
        self.observers.push(tx);
        rx
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// The file-name portion of the path, or a fixed placeholder when the
    /// document has never been saved.
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(
                || UNTITLED_NAME.to_string(),
                |name| name.to_string_lossy().to_string(),
            )
    }

    /// Replace the content. Marks the document modified and notifies
    /// observers; setting the same content is a no-op.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if self.content == content {
            return;
        }
        self.content = content;
        self.set_modified(true);
        self.emit(DocumentEvent::ContentChanged);
    }

    /// Update the backing file path. Does not touch the modified flag.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if self.file_path.as_deref() == Some(path.as_path()) {
            return;
        }
        self.file_path = Some(path.clone());
        self.emit(DocumentEvent::FilePathChanged(path));
    }

    /// Explicitly override the modified flag (used after save/load).
    pub fn set_modified(&mut self, modified: bool) {
        if self.modified == modified {
            return;
        }
        self.modified = modified;
        self.emit(DocumentEvent::ModifiedChanged(modified));
    }

    fn emit(&mut self, event: DocumentEvent) {
        // Disconnected observers are pruned as a side effect of sending.
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("file_path", &self.file_path)
            .field("modified", &self.modified)
            .field("content_len", &self.content.len())
            .finish_non_exhaustive()
    }
}
