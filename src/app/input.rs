use std::path::PathBuf;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use unicode_width::UnicodeWidthChar;

use crate::app::model::{Model, PromptKind};
use crate::app::{App, Message};

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        // Confirm bar owns the keyboard while a guarded action is pending.
        if model.pending.is_some() {
            return match key.code {
                KeyCode::Char('s' | 'S' | 'y' | 'Y') | KeyCode::Enter => {
                    Some(Message::ConfirmSave)
                }
                KeyCode::Char('d' | 'D' | 'n' | 'N') => Some(Message::ConfirmDiscard),
                KeyCode::Char('c' | 'C') | KeyCode::Esc => Some(Message::ConfirmCancel),
                _ => None,
            };
        }

        if let Some(prompt) = model.prompt.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::PromptCancel),
                KeyCode::Enter => Some(submit_prompt(prompt.kind, &prompt.input)),
                KeyCode::Backspace => Some(Message::PromptBackspace),
                KeyCode::Char(c) if plain_char(key.modifiers) => Some(Message::PromptInput(c)),
                _ => None,
            };
        }

        if model.find_open {
            return match key.code {
                KeyCode::Esc => Some(Message::CloseFind),
                KeyCode::Enter => Some(Message::FindNext),
                KeyCode::Tab | KeyCode::BackTab => Some(Message::FindSwitchField),
                KeyCode::Backspace => Some(Message::FindBackspace),
                KeyCode::F(3) => Some(if key.modifiers.contains(KeyModifiers::SHIFT) {
                    Message::FindPrevious
                } else {
                    Message::FindNext
                }),
                KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::ALT) => {
                    Some(Message::FindNext)
                }
                KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::ALT) => {
                    Some(Message::FindPrevious)
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::ALT) => {
                    Some(Message::FindToggleCase)
                }
                KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::ALT) => {
                    Some(Message::Replace)
                }
                KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::ALT) => {
                    Some(Message::ReplaceAll)
                }
                KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::CloseFind)
                }
                KeyCode::Char(c) if plain_char(key.modifiers) => Some(Message::FindInput(c)),
                _ => None,
            };
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('n') => Some(Message::NewFile),
                KeyCode::Char('o') => Some(Message::OpenPrompt),
                KeyCode::Char('s' | 'S') => {
                    Some(if key.modifiers.contains(KeyModifiers::SHIFT) {
                        Message::SaveAsPrompt
                    } else {
                        Message::Save
                    })
                }
                KeyCode::Char('f') => Some(Message::OpenFind),
                KeyCode::Char('q') => Some(Message::Quit),
                KeyCode::Char('+' | '=') => Some(Message::ZoomIn),
                KeyCode::Char('-' | '_') => Some(Message::ZoomOut),
                KeyCode::Char('0') => Some(Message::ZoomReset),
                KeyCode::Left => Some(Message::MoveWordLeft),
                KeyCode::Right => Some(Message::MoveWordRight),
                KeyCode::Home => Some(Message::MoveToStart),
                KeyCode::End => Some(Message::MoveToEnd),
                _ => None,
            };
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::F(2) => Some(Message::FontPrompt),
            KeyCode::F(3) => Some(if key.modifiers.contains(KeyModifiers::SHIFT) {
                Message::FindPrevious
            } else {
                Message::FindNext
            }),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Tab => Some(Message::InsertTab),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Up => Some(Message::MoveCursor(crate::editor::Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(crate::editor::Direction::Down)),
            KeyCode::Left => Some(Message::MoveCursor(crate::editor::Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(crate::editor::Direction::Right)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char(c) if plain_char(key.modifiers) => Some(Message::InsertChar(c)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.modal_active() {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                if model.surface.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(3))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                if model.surface.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(3))
                } else {
                    None
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let row = mouse.row;
                if row >= model.surface.viewport.height() {
                    return None;
                }
                let line = model.surface.viewport.offset() + row as usize;
                if line >= model.buffer.line_count() {
                    return None;
                }
                let gutter = model.surface.gutter_width(model.buffer.line_count());
                let clicked_col = usize::from(mouse.column.saturating_sub(gutter));
                let target_col = clicked_col + model.surface.col_offset();
                let text = model.buffer.line_at(line).unwrap_or_default();
                Some(Message::MoveTo(line, byte_col_at_display_col(&text, target_col)))
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Printable character with no chord modifier held.
fn plain_char(modifiers: KeyModifiers) -> bool {
    !modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn submit_prompt(kind: PromptKind, input: &str) -> Message {
    let trimmed = input.trim();
    match kind {
        // An empty path submission is a cancellation, not an error.
        PromptKind::OpenPath if trimmed.is_empty() => Message::PromptCancel,
        PromptKind::SaveAsPath if trimmed.is_empty() => Message::PromptCancel,
        PromptKind::OpenPath => Message::OpenPath(PathBuf::from(trimmed)),
        PromptKind::SaveAsPath => Message::SaveAsPath(PathBuf::from(trimmed)),
        PromptKind::Font => Message::ApplyFont(input.to_string()),
    }
}

/// Byte column whose glyph covers the given display column.
fn byte_col_at_display_col(line: &str, target: usize) -> usize {
    let mut width = 0;
    for (byte_idx, ch) in line.char_indices() {
        if width >= target {
            return byte_idx;
        }
        width += ch.width().unwrap_or(0);
    }
    line.len()
}
