use std::path::{Path, PathBuf};

use crate::{power_saver_factor, AppState, Document, DocumentFormat, Effect, Msg, TextFormat};

const READ_ONLY_STATUS: &str = "Read-only document; save a copy in another format to edit.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextEdited(text) => apply_edit(&mut state, text),
        Msg::LineAppended(line) => {
            let text = state.document().with_line_appended(&line);
            apply_edit(&mut state, text)
        }
        Msg::LastLineRemoved => {
            let text = state.document().without_last_line();
            apply_edit(&mut state, text)
        }
        Msg::StatisticsReady(snapshot) => {
            state.set_statistics(snapshot);
            Vec::new()
        }
        Msg::StatisticsRequested => vec![Effect::RefreshStatistics],
        Msg::DocumentDirtyChanged(dirty) => {
            if state.document().is_dirty() != dirty {
                state.document_mut().set_dirty(dirty);
                state.mark_view_changed();
            }
            Vec::new()
        }
        Msg::ResetFormatting => {
            state.set_format(TextFormat::default());
            Vec::new()
        }
        Msg::FormatChanged(format) => {
            state.set_format(format);
            Vec::new()
        }
        Msg::FormatAdjusted(change) => {
            let mut format = state.format().clone();
            change.apply(&mut format);
            state.set_format(format);
            Vec::new()
        }
        Msg::NewDocumentRequested => {
            if has_unsaved_text(state.document()) {
                state.set_new_document_pending(true);
                state.set_status("Discard unsaved changes?");
                Vec::new()
            } else {
                start_new_document(&mut state)
            }
        }
        Msg::NewDocumentConfirmed => {
            if state.is_new_document_pending() {
                start_new_document(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::NewDocumentDeclined => {
            state.set_new_document_pending(false);
            Vec::new()
        }
        Msg::OpenRequested(path) => vec![Effect::LoadDocument { path }],
        Msg::DocumentLoaded {
            path,
            format,
            plain_text,
            html,
        } => {
            let restored = state.take_pending_restore(&path);
            let mut status = format!("Opened {}", path.display());
            let mut document = Document::loaded(path, format, plain_text, html);
            if let Some(content) = restored {
                if document.edit(content) {
                    status.push_str(" with unsaved changes restored");
                }
            }
            if document.is_read_only() {
                status.push_str(" (read-only)");
            }
            state.replace_document(document);
            state.set_new_document_pending(false);
            state.set_status(status);
            vec![Effect::NotifyEdit, Effect::PersistSettings(state.session())]
        }
        Msg::LoadFailed { path, reason } => {
            state.set_status(format!("Could not open {}: {reason}", path.display()));
            // Unsaved text meant for this file is kept in an unnamed buffer.
            match state.take_pending_restore(&path) {
                Some(content) => {
                    state.replace_document(Document::restored(content));
                    vec![Effect::NotifyEdit]
                }
                None => Vec::new(),
            }
        }
        Msg::SaveRequested => {
            if state.document().is_read_only() {
                state.set_status(READ_ONLY_STATUS);
                Vec::new()
            } else {
                match state.document().path().map(Path::to_path_buf) {
                    Some(path) => vec![save_effect(&state, path)],
                    None => {
                        state.set_status("No file name yet; choose one to save.");
                        vec![Effect::RequestSavePath]
                    }
                }
            }
        }
        Msg::SaveAsRequested(path) => {
            if DocumentFormat::from_path(&path).is_read_only() {
                state.set_status(format!(
                    "Cannot save as {}: format is read-only",
                    path.display()
                ));
                Vec::new()
            } else {
                state.document_mut().associate(path.clone());
                state.mark_view_changed();
                vec![save_effect(&state, path)]
            }
        }
        Msg::DocumentSaved { path } => {
            if state.document().path() == Some(path.as_path()) {
                state.document_mut().mark_saved();
            }
            state.set_status("Saved.");
            vec![Effect::PersistSettings(state.session())]
        }
        Msg::SaveFailed { path, reason } => {
            state.set_status(format!("Could not save {}: {reason}", path.display()));
            Vec::new()
        }
        Msg::PowerSaverToggled { enabled, battery } => {
            let factor = power_saver_factor(enabled, battery);
            state.set_adaptive_factor(factor);
            vec![
                Effect::SetAdaptiveFactor(factor),
                Effect::PersistSettings(state.session()),
            ]
        }
        Msg::ThemeToggled => {
            let theme = state.theme().toggled();
            state.set_theme(theme);
            vec![Effect::PersistSettings(state.session())]
        }
        Msg::RestoreSettings { session, open } => {
            state.set_adaptive_factor(session.adaptive_factor);
            state.set_theme(session.theme);
            let mut effects = vec![Effect::SetAdaptiveFactor(session.adaptive_factor)];
            let content = session.content.filter(|text| !text.is_empty());
            match (open, session.file, content) {
                (Some(path), _, _) => effects.push(Effect::LoadDocument { path }),
                (None, Some(path), content) => {
                    if let Some(content) = content.filter(|_| !session.is_saved) {
                        state.set_pending_restore(path.clone(), content);
                    }
                    effects.push(Effect::LoadDocument { path });
                }
                (None, None, Some(content)) => {
                    state.replace_document(Document::restored(content));
                    state.set_status("Restored unsaved text from the last session.");
                    effects.push(Effect::NotifyEdit);
                }
                (None, None, None) => {}
            }
            effects
        }
        Msg::QuitRequested => vec![Effect::PersistSettings(state.session()), Effect::Quit],
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_edit(state: &mut AppState, text: String) -> Vec<Effect> {
    if state.document().is_read_only() {
        if state.document().plain_text() != text {
            state.set_status(READ_ONLY_STATUS);
        }
        return Vec::new();
    }
    if state.document_mut().edit(text) {
        state.mark_view_changed();
        vec![Effect::NotifyEdit]
    } else {
        Vec::new()
    }
}

/// Compares against the baseline instead of trusting the dirty flag, which
/// the statistics worker may not have refreshed yet.
fn has_unsaved_text(document: &Document) -> bool {
    document.is_dirty() || !document.matches_baseline(document.plain_text())
}

fn start_new_document(state: &mut AppState) -> Vec<Effect> {
    state.reset_document();
    state.set_status("New document.");
    vec![Effect::NotifyEdit, Effect::PersistSettings(state.session())]
}

fn save_effect(state: &AppState, path: PathBuf) -> Effect {
    let document = state.document();
    Effect::SaveDocument {
        path,
        format: document.format(),
        plain_text: document.plain_text().to_string(),
        html: document.html().map(ToOwned::to_owned),
    }
}
