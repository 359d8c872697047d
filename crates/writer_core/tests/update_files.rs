use std::path::PathBuf;

use pretty_assertions::assert_eq;
use writer_core::{update, AppState, DocumentFormat, Effect, Msg};

fn init_logging() {
    writer_logging::initialize_for_tests();
}

fn loaded(path: &str, text: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::DocumentLoaded {
            path: PathBuf::from(path),
            format: DocumentFormat::from_path(&PathBuf::from(path)),
            plain_text: text.to_string(),
            html: None,
        },
    );
    state
}

#[test]
fn open_request_becomes_load_effect() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::OpenRequested(PathBuf::from("a.md")));
    assert_eq!(
        effects,
        vec![Effect::LoadDocument {
            path: PathBuf::from("a.md")
        }]
    );
}

#[test]
fn loaded_document_is_clean_and_triggers_statistics() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::DocumentLoaded {
            path: PathBuf::from("/tmp/letter.html"),
            format: DocumentFormat::Html,
            plain_text: "Dear reader".to_string(),
            html: Some("<p>Dear reader</p>".to_string()),
        },
    );

    assert_eq!(effects[0], Effect::NotifyEdit);
    let Effect::PersistSettings(session) = &effects[1] else {
        panic!("expected settings to be persisted");
    };
    assert_eq!(session.file, Some(PathBuf::from("/tmp/letter.html")));
    assert!(session.is_saved);

    let view = state.view();
    assert_eq!(view.title, "letter.html - SolidWriting");
    assert!(!view.dirty);
    assert!(state.document().matches_baseline("Dear reader"));
    assert_eq!(state.document().html(), Some("<p>Dear reader</p>"));
}

#[test]
fn load_failure_is_reported_in_status() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::LoadFailed {
            path: PathBuf::from("gone.txt"),
            reason: "not found".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().status.as_deref(),
        Some("Could not open gone.txt: not found")
    );
}

#[test]
fn save_without_file_asks_for_a_path() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TextEdited("text".to_string()));
    let (_, effects) = update(state, Msg::SaveRequested);
    assert_eq!(effects, vec![Effect::RequestSavePath]);
}

#[test]
fn save_with_file_carries_current_content() {
    init_logging();
    let state = loaded("notes.md", "# Title");
    let (state, _) = update(state, Msg::TextEdited("# Title\nmore".to_string()));

    let (_, effects) = update(state, Msg::SaveRequested);
    assert_eq!(
        effects,
        vec![Effect::SaveDocument {
            path: PathBuf::from("notes.md"),
            format: DocumentFormat::Markdown,
            plain_text: "# Title\nmore".to_string(),
            html: None,
        }]
    );
}

#[test]
fn save_as_switches_format_with_extension() {
    init_logging();
    let state = loaded("notes.md", "body");
    let (state, effects) = update(state, Msg::SaveAsRequested(PathBuf::from("notes.html")));

    assert_eq!(state.document().format(), DocumentFormat::Html);
    assert!(matches!(
        &effects[0],
        Effect::SaveDocument { format: DocumentFormat::Html, .. }
    ));
}

#[test]
fn save_as_docx_is_refused() {
    init_logging();
    let state = loaded("notes.txt", "body");
    let (state, effects) = update(state, Msg::SaveAsRequested(PathBuf::from("notes.docx")));

    assert!(effects.is_empty());
    assert_eq!(state.document().path(), Some(PathBuf::from("notes.txt").as_path()));
    assert!(state.view().status.unwrap().contains("read-only"));
}

#[test]
fn saved_document_moves_baseline_and_clears_dirty() {
    init_logging();
    let state = loaded("notes.txt", "v1");
    let (state, _) = update(state, Msg::TextEdited("v2".to_string()));
    let (state, _) = update(state, Msg::DocumentDirtyChanged(true));
    assert_eq!(state.view().title, "notes.txt* - SolidWriting");

    let (state, effects) = update(
        state,
        Msg::DocumentSaved {
            path: PathBuf::from("notes.txt"),
        },
    );
    assert!(matches!(effects[0], Effect::PersistSettings(_)));
    assert!(state.document().matches_baseline("v2"));
    let view = state.view();
    assert!(!view.dirty);
    assert_eq!(view.status.as_deref(), Some("Saved."));
}

#[test]
fn save_failure_keeps_document_dirty() {
    init_logging();
    let state = loaded("notes.txt", "v1");
    let (state, _) = update(state, Msg::TextEdited("v2".to_string()));
    let (state, _) = update(state, Msg::DocumentDirtyChanged(true));
    let (state, effects) = update(
        state,
        Msg::SaveFailed {
            path: PathBuf::from("notes.txt"),
            reason: "disk full".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert!(state.view().dirty);
    assert!(!state.document().matches_baseline("v2"));
}
