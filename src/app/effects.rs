use crate::app::model::{Model, ToastLevel};
use crate::app::update::{GuardChoice, GuardDecision, guard_decision, proceed_pending};
use crate::app::{App, Message};
use crate::file::{self, SaveOutcome};
use crate::settings;

impl App {
    /// Apply the file-system consequences of a message after the pure
    /// update ran. Outcomes are reported to the user as toasts; failures
    /// never escape this layer.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::OpenPath(path) => match file::open_document(path) {
                Ok(document) => {
                    model.install_document(document);
                    model.show_toast(
                        ToastLevel::Info,
                        format!("Opened {}", model.document.display_name()),
                    );
                }
                Err(err) => {
                    tracing::warn!(error = %err, "open failed");
                    model.show_toast(ToastLevel::Error, err.to_string());
                }
            },

            Message::Save => match file::save_document(&mut model.document) {
                Ok(SaveOutcome::Saved) => {
                    model.show_toast(
                        ToastLevel::Info,
                        format!("Saved {}", model.document.display_name()),
                    );
                }
                // The update already opened the save-as prompt.
                Ok(SaveOutcome::NeedsPath) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "save failed");
                    model.show_toast(ToastLevel::Error, err.to_string());
                }
            },

            Message::SaveAsPath(path) => {
                match file::save_document_as(&mut model.document, path) {
                    Ok(()) => {
                        model.show_toast(
                            ToastLevel::Info,
                            format!("Saved {}", model.document.display_name()),
                        );
                        // A save-as triggered by the unsaved-changes guard
                        // resumes the parked action.
                        proceed_pending(model);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "save as failed");
                        model.show_toast(ToastLevel::Error, err.to_string());
                        // Guarded flow: a failed save aborts the action.
                        model.pending = None;
                    }
                }
            }

            Message::ConfirmSave => {
                // Without a path the update already detoured into the
                // save-as prompt; the pending action is still parked.
                if model.document.file_path().is_none() {
                    return;
                }
                let mut failure = None;
                let decision = guard_decision(GuardChoice::Save, || {
                    match file::save_document(&mut model.document) {
                        Ok(_) => true,
                        Err(err) => {
                            failure = Some(err);
                            false
                        }
                    }
                });
                match decision {
                    GuardDecision::Proceed => {
                        model.show_toast(
                            ToastLevel::Info,
                            format!("Saved {}", model.document.display_name()),
                        );
                        proceed_pending(model);
                    }
                    GuardDecision::Abort => {
                        if let Some(err) = failure {
                            tracing::warn!(error = %err, "guarded save failed");
                            model.show_toast(ToastLevel::Error, err.to_string());
                        }
                        model.pending = None;
                    }
                }
            }

            Message::ApplyFont(spec) => {
                let Some(next) = model.settings.with_font_spec(spec) else {
                    return;
                };
                if next == model.settings {
                    return;
                }
                model.surface.set_base_font_size(next.font_size);
                model.settings = next;
                match settings::save_settings(&model.settings_path, &model.settings) {
                    Ok(()) => {
                        model.show_toast(
                            ToastLevel::Info,
                            format!("Font set to {}", model.settings.font_spec()),
                        );
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "settings write failed");
                        model.show_toast(ToastLevel::Error, format!("{err:#}"));
                    }
                }
            }

            _ => {}
        }
    }
}
