//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File-system side effects (open, save, settings writes) run after the
//! pure update, keyed on the message that was applied.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{FindBar, FindField, Model, PendingAction, Prompt, PromptKind, ToastLevel};
pub use update::{GuardChoice, GuardDecision, Message, guard_decision, update};

use std::path::PathBuf;

use crate::settings::Settings;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file: Option<PathBuf>,
    settings: Settings,
    settings_path: PathBuf,
}

impl App {
    /// Create a new application, optionally opening a file at startup.
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            settings: Settings::default(),
            settings_path: crate::settings::settings_path(),
        }
    }

    /// Use loaded settings and remember where to persist them.
    pub fn with_settings(mut self, settings: Settings, settings_path: PathBuf) -> Self {
        self.settings = settings;
        self.settings_path = settings_path;
        self
    }
}
