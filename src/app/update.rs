use std::path::PathBuf;

use crate::app::model::{FindField, Model, PendingAction, Prompt, PromptKind, ToastLevel};
use crate::document::Document;
use crate::editor::Direction;
use crate::find;

/// All possible events and actions in the application.
///
/// These represent user input and internal actions. Messages that touch the
/// file system are applied in `effects` after the pure update ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Insert an indent step (Tab)
    InsertTab,
    /// Delete the character before the cursor (Backspace)
    DeleteBack,
    /// Delete the character at the cursor (Delete)
    DeleteForward,

    // Cursor and scrolling
    /// Move the cursor one step in a direction
    MoveCursor(Direction),
    /// Move to the beginning of the line (Home)
    MoveHome,
    /// Move to the end of the line (End)
    MoveEnd,
    /// Move one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move one word right (Ctrl+Right)
    MoveWordRight,
    /// Move to the start of the buffer (Ctrl+Home)
    MoveToStart,
    /// Move to the end of the buffer (Ctrl+End)
    MoveToEnd,
    /// Move to an absolute position, e.g. from a mouse click
    MoveTo(usize, usize),
    /// Move the cursor up one page
    PageUp,
    /// Move the cursor down one page
    PageDown,
    /// Scroll the view up without moving the cursor (wheel)
    ScrollUp(usize),
    /// Scroll the view down without moving the cursor (wheel)
    ScrollDown(usize),

    // Document lifecycle
    /// Replace the document with a fresh empty one (guarded)
    NewFile,
    /// Ask for a path to open (guarded)
    OpenPrompt,
    /// Save to the current path, or fall through to save-as
    Save,
    /// Ask for a destination path
    SaveAsPrompt,
    /// A path was submitted in the open prompt
    OpenPath(PathBuf),
    /// A path was submitted in the save-as prompt
    SaveAsPath(PathBuf),

    // Unsaved-changes confirmation
    /// Save, then proceed with the pending action
    ConfirmSave,
    /// Proceed with the pending action, dropping unsaved changes
    ConfirmDiscard,
    /// Abort the pending action entirely
    ConfirmCancel,

    // Prompt editing
    /// Type into the open prompt
    PromptInput(char),
    /// Erase from the open prompt
    PromptBackspace,
    /// Dismiss the open prompt without submitting
    PromptCancel,
    /// A font spec was submitted in the font prompt
    ApplyFont(String),

    // Find / replace
    /// Open the find bar
    OpenFind,
    /// Close the find bar
    CloseFind,
    /// Type into the focused find-bar field
    FindInput(char),
    /// Erase from the focused find-bar field
    FindBackspace,
    /// Switch between query and replacement fields (Tab)
    FindSwitchField,
    /// Toggle case-sensitive matching
    FindToggleCase,
    /// Select the next occurrence, wrapping once
    FindNext,
    /// Select the previous occurrence, wrapping once
    FindPrevious,
    /// Replace the selection, then advance to the next occurrence
    Replace,
    /// Replace every occurrence in the whole buffer
    ReplaceAll,

    // View
    ZoomIn,
    ZoomOut,
    ZoomReset,
    /// Open the font-preference prompt
    FontPrompt,
    /// Toggle the help overlay
    ToggleHelp,
    /// Hide the help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application (guarded)
    Quit,
}

/// The three choices offered by the unsaved-changes dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardChoice {
    Save,
    Discard,
    Cancel,
}

/// Whether a guarded operation may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Abort,
}

/// Resolve an unsaved-changes choice into a decision.
///
/// `save` is only invoked for [`GuardChoice::Save`]; a failed save aborts so
/// data is never dropped silently.
pub fn guard_decision(choice: GuardChoice, save: impl FnOnce() -> bool) -> GuardDecision {
    match choice {
        GuardChoice::Save => {
            if save() {
                GuardDecision::Proceed
            } else {
                GuardDecision::Abort
            }
        }
        GuardChoice::Discard => GuardDecision::Proceed,
        GuardChoice::Cancel => GuardDecision::Abort,
    }
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. File-system
/// work happens afterwards in `effects::handle_message_side_effects`.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            after_edit(&mut model);
        }
        Message::InsertNewline => {
            model.buffer.split_line();
            after_edit(&mut model);
        }
        Message::InsertTab => {
            // Terminal cells render literal tabs unpredictably; indent with
            // spaces instead.
            model.buffer.insert_str("    ");
            after_edit(&mut model);
        }
        Message::DeleteBack => {
            if model.buffer.delete_back() {
                after_edit(&mut model);
            }
        }
        Message::DeleteForward => {
            if model.buffer.delete_forward() {
                after_edit(&mut model);
            }
        }

        // Cursor and scrolling
        Message::MoveCursor(direction) => {
            model.buffer.move_cursor(direction);
            model.ensure_cursor_visible();
        }
        Message::MoveHome => {
            model.buffer.move_home();
            model.ensure_cursor_visible();
        }
        Message::MoveEnd => {
            model.buffer.move_end();
            model.ensure_cursor_visible();
        }
        Message::MoveWordLeft => {
            model.buffer.move_word_left();
            model.ensure_cursor_visible();
        }
        Message::MoveWordRight => {
            model.buffer.move_word_right();
            model.ensure_cursor_visible();
        }
        Message::MoveToStart => {
            model.buffer.move_to_start();
            model.ensure_cursor_visible();
        }
        Message::MoveToEnd => {
            model.buffer.move_to_end();
            model.ensure_cursor_visible();
        }
        Message::MoveTo(line, col) => {
            model.buffer.move_to(line, col);
            model.ensure_cursor_visible();
        }
        Message::PageUp => {
            let page = model.surface.viewport.height() as usize;
            let cursor = model.buffer.cursor();
            model.buffer.move_to(cursor.line.saturating_sub(page), cursor.col);
            model.ensure_cursor_visible();
        }
        Message::PageDown => {
            let page = model.surface.viewport.height() as usize;
            let cursor = model.buffer.cursor();
            model.buffer.move_to(cursor.line + page, cursor.col);
            model.ensure_cursor_visible();
        }
        Message::ScrollUp(n) => {
            model.surface.viewport.scroll_up(n);
        }
        Message::ScrollDown(n) => {
            model.surface.viewport.scroll_down(n);
        }

        // Document lifecycle
        Message::NewFile => {
            if model.document.is_modified() {
                model.pending = Some(PendingAction::NewFile);
            } else {
                model.install_document(Document::new());
            }
        }
        Message::OpenPrompt => {
            if model.document.is_modified() {
                model.pending = Some(PendingAction::OpenFile);
            } else {
                model.prompt = Some(Prompt {
                    kind: PromptKind::OpenPath,
                    input: String::new(),
                });
            }
        }
        Message::Save => {
            // Path-less saves route through the save-as prompt; the write
            // itself happens in effects.
            if model.document.file_path().is_none() {
                open_save_as_prompt(&mut model);
            }
        }
        Message::SaveAsPrompt => {
            open_save_as_prompt(&mut model);
        }
        // Prompt already submitted; the file work happens in effects.
        Message::OpenPath(_) | Message::SaveAsPath(_) => {
            model.prompt = None;
        }

        // Unsaved-changes confirmation
        Message::ConfirmSave => {
            // With no backing path the save first needs a destination; the
            // pending action survives the detour through the prompt.
            if model.document.file_path().is_none() {
                open_save_as_prompt(&mut model);
            }
            // Otherwise resolved in effects.
        }
        Message::ConfirmDiscard => {
            if guard_decision(GuardChoice::Discard, || true) == GuardDecision::Proceed {
                proceed_pending(&mut model);
            }
        }
        Message::ConfirmCancel => {
            model.pending = None;
        }

        // Prompt editing
        Message::PromptInput(ch) => {
            if let Some(prompt) = &mut model.prompt {
                prompt.input.push(ch);
            }
        }
        Message::PromptBackspace => {
            if let Some(prompt) = &mut model.prompt {
                prompt.input.pop();
            }
        }
        Message::PromptCancel => {
            model.prompt = None;
            // Cancelling a save-as that was guarding an action aborts it.
            model.pending = None;
        }
        Message::ApplyFont(_) => {
            model.prompt = None;
            // Settings change + persistence handled in effects.
        }

        // Find / replace
        Message::OpenFind => {
            model.find_open = true;
            model.find.field = FindField::Query;
            refresh_match_count(&mut model);
        }
        Message::CloseFind => {
            model.find_open = false;
        }
        Message::FindInput(ch) => {
            match model.find.field {
                FindField::Query => {
                    model.find.state.query.push(ch);
                    refresh_match_count(&mut model);
                }
                FindField::Replacement => model.find.replacement.push(ch),
            }
        }
        Message::FindBackspace => {
            match model.find.field {
                FindField::Query => {
                    model.find.state.query.pop();
                    refresh_match_count(&mut model);
                }
                FindField::Replacement => {
                    model.find.replacement.pop();
                }
            }
        }
        Message::FindSwitchField => {
            model.find.field = match model.find.field {
                FindField::Query => FindField::Replacement,
                FindField::Replacement => FindField::Query,
            };
        }
        Message::FindToggleCase => {
            model.find.state.case_sensitive = !model.find.state.case_sensitive;
            refresh_match_count(&mut model);
        }
        Message::FindNext => {
            find_next(&mut model);
        }
        Message::FindPrevious => {
            find_previous(&mut model);
        }
        Message::Replace => {
            replace_selection(&mut model);
        }
        Message::ReplaceAll => {
            replace_all(&mut model);
        }

        // View
        Message::ZoomIn => model.surface.zoom_in(),
        Message::ZoomOut => model.surface.zoom_out(),
        Message::ZoomReset => model.surface.reset_zoom(),
        Message::FontPrompt => {
            model.prompt = Some(Prompt {
                kind: PromptKind::Font,
                input: model.settings.font_spec(),
            });
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model
                .surface
                .viewport
                .resize(width, height.saturating_sub(1));
            model.ensure_cursor_visible();
        }

        // Application
        Message::Quit => {
            if model.document.is_modified() {
                model.pending = Some(PendingAction::Quit);
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Execute the action that was parked behind the unsaved-changes guard.
pub(super) fn proceed_pending(model: &mut Model) {
    let Some(action) = model.pending.take() else {
        return;
    };
    match action {
        PendingAction::NewFile => {
            model.install_document(Document::new());
        }
        PendingAction::OpenFile => {
            model.prompt = Some(Prompt {
                kind: PromptKind::OpenPath,
                input: String::new(),
            });
        }
        PendingAction::Quit => {
            model.should_quit = true;
        }
    }
}

fn open_save_as_prompt(model: &mut Model) {
    let current = model
        .document
        .file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    model.prompt = Some(Prompt {
        kind: PromptKind::SaveAsPath,
        input: current,
    });
}

/// Push an edit into the document and keep derived state fresh.
fn after_edit(model: &mut Model) {
    model.sync_edit_to_model();
    model.ensure_cursor_visible();
    if model.find_open {
        refresh_match_count(model);
    }
}

pub(super) fn refresh_match_count(model: &mut Model) {
    let text = model.buffer.text();
    model.find.match_count = find::count_matches(
        &text,
        &model.find.state.query,
        model.find.state.case_sensitive,
    );
}

/// Select the next occurrence after the cursor/selection, wrapping once.
fn find_next(model: &mut Model) {
    let query = model.find.state.query.clone();
    if query.is_empty() {
        return;
    }
    let case_sensitive = model.find.state.case_sensitive;
    let text = model.buffer.text();
    let from = model
        .buffer
        .selection()
        .map_or_else(|| model.buffer.byte_offset(), |r| r.end);

    match find::find_forward(&text, &query, from, case_sensitive) {
        Some(range) => {
            model.buffer.select(range);
            model.ensure_cursor_visible();
        }
        None => {
            model.show_toast(ToastLevel::Info, format!("\"{query}\" not found"));
        }
    }
}

/// Select the previous occurrence before the cursor/selection, wrapping once.
fn find_previous(model: &mut Model) {
    let query = model.find.state.query.clone();
    if query.is_empty() {
        return;
    }
    let case_sensitive = model.find.state.case_sensitive;
    let text = model.buffer.text();
    let before = model
        .buffer
        .selection()
        .map_or_else(|| model.buffer.byte_offset(), |r| r.start);

    match find::find_backward(&text, &query, before, case_sensitive) {
        Some(range) => {
            model.buffer.select_to_start(range);
            model.ensure_cursor_visible();
        }
        None => {
            model.show_toast(ToastLevel::Info, format!("\"{query}\" not found"));
        }
    }
}

/// Replace the active selection, then advance with the last-used query.
/// Without a selection this is a complete no-op.
fn replace_selection(model: &mut Model) {
    if model.buffer.selection().is_none() {
        return;
    }
    let replacement = model.find.replacement.clone();
    model.buffer.replace_selection(&replacement);
    after_edit(model);
    find_next(model);
}

/// Rewrite every occurrence in the whole buffer, independent of the cursor.
fn replace_all(model: &mut Model) {
    let query = model.find.state.query.clone();
    if query.is_empty() {
        return;
    }
    let case_sensitive = model.find.state.case_sensitive;
    let replacement = model.find.replacement.clone();

    let (rewritten, count) =
        find::replace_all(model.document.content(), &query, &replacement, case_sensitive);
    if count > 0 {
        // The surface refresh clamps the old cursor offset into the new
        // content; an approximation of position, not a guarantee.
        model.apply_model_content(rewritten);
    }
    model.show_toast(ToastLevel::Info, format!("Replaced {count} occurrence(s)"));
    refresh_match_count(model);
}
