use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, update};
use crate::document::Document;
use crate::file;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails, the startup file
    /// cannot be read, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let document = self.initial_document()?;

        let mut terminal =
            ratatui::try_init().context("Failed to initialize terminal — jot requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(
            document,
            self.settings.clone(),
            self.settings_path.clone(),
            (size.width, size.height),
        );

        let _ = execute!(stdout(), EnableMouseCapture);
        let result = Self::event_loop(&mut terminal, &mut model);
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    /// Build the startup document from the CLI argument.
    ///
    /// A nonexistent path starts an empty document bound to that path, so
    /// the first save creates the file.
    fn initial_document(&self) -> Result<Document> {
        let Some(path) = &self.file else {
            return Ok(Document::new());
        };
        if path.exists() {
            let document = file::open_document(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            return Ok(document);
        }
        tracing::debug!(path = %path.display(), "starting new file");
        let mut document = Document::new();
        document.set_file_path(path.clone());
        Ok(document)
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;
        let mut last_title = String::new();

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }
            if model.drain_document_events() {
                needs_render = true;
            }

            let title = model.window_title();
            if title != last_title {
                let _ = execute!(stdout(), SetTitle(title.as_str()));
                last_title = title;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    tracing::trace!(message = ?msg, "apply");
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(model, &side_msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &side_msg);
                        needs_render = true;
                    }
                }

                if model.drain_document_events() {
                    needs_render = true;
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
