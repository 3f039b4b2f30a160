use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::document::{Document, DocumentEvent};
use crate::editor::TextBuffer;
use crate::find::FindState;
use crate::settings::Settings;
use crate::ui::surface::{EditorSurface, display_col};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which input field of the find bar has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindField {
    Query,
    Replacement,
}

/// State of the open find/replace bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindBar {
    /// Query text and case flag, reset only by user edits to the field.
    pub state: FindState,
    pub replacement: String,
    pub field: FindField,
    /// Occurrences of the current query in the buffer.
    pub match_count: usize,
}

impl FindBar {
    pub fn new() -> Self {
        Self {
            state: FindState::default(),
            replacement: String::new(),
            field: FindField::Query,
            match_count: 0,
        }
    }
}

impl Default for FindBar {
    fn default() -> Self {
        Self::new()
    }
}

/// What a submitted one-line prompt means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    OpenPath,
    SaveAsPath,
    Font,
}

/// A one-line input prompt at the bottom of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// An operation parked behind the unsaved-changes confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    NewFile,
    OpenFile,
    Quit,
}

/// Direction of the content sync currently in flight.
///
/// While a model-side change (load, replace-all) is being pushed into the
/// surface, the edit→model path is suppressed so the two stores cannot feed
/// back into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncGuard {
    Idle,
    ApplyingFromModel,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The active document (content, path, modified flag).
    pub document: Document,
    /// Change events from the active document.
    doc_events: Receiver<DocumentEvent>,
    /// The surface text store the user edits.
    pub buffer: TextBuffer,
    /// Presentation state: scroll, gutter, zoom.
    pub surface: EditorSurface,
    /// Find/replace bar state; survives closing the bar (only field edits
    /// reset it).
    pub find: FindBar,
    /// Whether the find bar is open and owns typed characters.
    pub find_open: bool,
    /// Path/font prompt, when open.
    pub prompt: Option<Prompt>,
    /// Guarded action awaiting the save/discard/cancel choice.
    pub pending: Option<PendingAction>,
    /// Loaded preferences (font), passed in at startup.
    pub settings: Settings,
    /// Where the preferences are persisted.
    pub settings_path: PathBuf,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Whether the app should quit.
    pub should_quit: bool,
    sync: SyncGuard,
}

impl Model {
    pub fn new(
        mut document: Document,
        settings: Settings,
        settings_path: PathBuf,
        terminal_size: (u16, u16),
    ) -> Self {
        let doc_events = document.subscribe();
        let buffer = TextBuffer::from_text(document.content());
        let surface = EditorSurface::new(
            terminal_size.0,
            terminal_size.1.saturating_sub(1),
            buffer.line_count(),
            settings.font_size,
        );
        Self {
            document,
            doc_events,
            buffer,
            surface,
            find: FindBar::new(),
            find_open: false,
            prompt: None,
            pending: None,
            settings,
            settings_path,
            help_visible: false,
            toast: None,
            should_quit: false,
            sync: SyncGuard::Idle,
        }
    }

    /// Swap in a new active document (New / successful Open).
    ///
    /// The old document is dropped along with its observer senders, so no
    /// stale subscription can outlive the swap.
    pub fn install_document(&mut self, mut document: Document) {
        self.doc_events = document.subscribe();
        self.buffer = TextBuffer::from_text(document.content());
        self.document = document;
        self.surface.reset_scroll();
        self.surface.viewport.set_total_lines(self.buffer.line_count());
    }

    /// Push the surface text into the document (edit→model sync).
    ///
    /// Suppressed while a model-side update is being applied.
    pub fn sync_edit_to_model(&mut self) {
        if self.sync == SyncGuard::ApplyingFromModel {
            return;
        }
        let text = self.buffer.text();
        self.document.set_content(text);
        self.surface.viewport.set_total_lines(self.buffer.line_count());
    }

    /// Apply a model-side content change and refresh the surface from it
    /// (model→edit sync), keeping the cursor byte offset clamped into the
    /// new content.
    pub fn apply_model_content(&mut self, content: String) {
        self.sync = SyncGuard::ApplyingFromModel;
        self.document.set_content(content);
        self.refresh_surface_from_document();
        self.sync = SyncGuard::Idle;
    }

    /// Drain pending document events.
    ///
    /// Returns true when anything was received (title/status refresh). A
    /// content event whose text already matches the surface is the echo of
    /// an edit→model sync and is ignored.
    pub fn drain_document_events(&mut self) -> bool {
        let mut saw_any = false;
        loop {
            let event = match self.doc_events.try_recv() {
                Ok(event) => event,
                Err(_) => break,
            };
            saw_any = true;
            match event {
                DocumentEvent::ContentChanged => {
                    if self.document.content() != self.buffer.text() {
                        self.sync = SyncGuard::ApplyingFromModel;
                        self.refresh_surface_from_document();
                        self.sync = SyncGuard::Idle;
                    }
                }
                DocumentEvent::FilePathChanged(_) | DocumentEvent::ModifiedChanged(_) => {}
            }
        }
        saw_any
    }

    fn refresh_surface_from_document(&mut self) {
        let content = self.document.content().to_string();
        self.buffer.set_text(&content);
        self.surface.viewport.set_total_lines(self.buffer.line_count());
        self.ensure_cursor_visible();
    }

    /// Keep the cursor inside the visible window, both axes.
    pub fn ensure_cursor_visible(&mut self) {
        let cursor = self.buffer.cursor();
        let line = self.buffer.line_at(cursor.line).unwrap_or_default();
        let col = display_col(&line, cursor.col);
        self.surface
            .ensure_cursor_visible(cursor.line, col, self.buffer.line_count());
    }

    /// Terminal title for the current document state.
    pub fn window_title(&self) -> String {
        let marker = if self.document.is_modified() { "*" } else { "" };
        format!("{marker}{} - jot", self.document.display_name())
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// True when a modal bar (prompt, confirm) owns the keyboard.
    pub const fn modal_active(&self) -> bool {
        self.prompt.is_some() || self.pending.is_some()
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("document", &self.document)
            .field("pending", &self.pending)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

// Default exists so the event loop can `std::mem::take` the model around
// the pure update call.
impl Default for Model {
    fn default() -> Self {
        Self::new(
            Document::new(),
            Settings::default(),
            PathBuf::new(),
            (80, 24),
        )
    }
}
