use std::path::{Path, PathBuf};

use crate::view_model::DocumentViewModel;
use crate::{AdaptiveFactor, Document, Session, StatisticsSnapshot, TextFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    document: Document,
    format: TextFormat,
    statistics: Option<StatisticsSnapshot>,
    adaptive_factor: AdaptiveFactor,
    theme: Theme,
    status: Option<String>,
    pending_new_document: bool,
    /// Unsaved text to reapply once the named file has loaded.
    pending_restore: Option<(PathBuf, String)>,
    view_changed: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> DocumentViewModel {
        DocumentViewModel::from_state(self)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    pub fn statistics(&self) -> Option<&StatisticsSnapshot> {
        self.statistics.as_ref()
    }

    pub fn adaptive_factor(&self) -> AdaptiveFactor {
        self.adaptive_factor
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_new_document_pending(&self) -> bool {
        self.pending_new_document
    }

    /// Settings worth persisting for the next run.
    pub fn session(&self) -> Session {
        Session {
            adaptive_factor: self.adaptive_factor,
            theme: self.theme,
            file: self.document.path().map(ToOwned::to_owned),
            is_saved: !self.document.is_dirty(),
            content: Some(self.document.plain_text())
                .filter(|text| !text.is_empty())
                .map(ToOwned::to_owned),
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_view_changed(&mut self) -> bool {
        std::mem::take(&mut self.view_changed)
    }

    pub(crate) fn mark_view_changed(&mut self) {
        self.view_changed = true;
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub(crate) fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.view_changed = true;
    }

    pub(crate) fn set_statistics(&mut self, snapshot: StatisticsSnapshot) {
        self.statistics = Some(snapshot);
        self.view_changed = true;
    }

    pub(crate) fn set_format(&mut self, format: TextFormat) {
        if self.format != format {
            self.format = format;
            self.view_changed = true;
        }
    }

    pub(crate) fn set_adaptive_factor(&mut self, factor: AdaptiveFactor) {
        if self.adaptive_factor != factor {
            self.adaptive_factor = factor;
            self.view_changed = true;
        }
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.view_changed = true;
        }
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.view_changed = true;
    }

    pub(crate) fn set_new_document_pending(&mut self, pending: bool) {
        if self.pending_new_document != pending {
            self.pending_new_document = pending;
            self.view_changed = true;
        }
    }

    pub(crate) fn set_pending_restore(&mut self, path: PathBuf, content: String) {
        self.pending_restore = Some((path, content));
    }

    /// Take the pending restore if it belongs to `path`.
    pub(crate) fn take_pending_restore(&mut self, path: &Path) -> Option<String> {
        match &self.pending_restore {
            Some((pending, _)) if pending == path => {
                self.pending_restore.take().map(|(_, content)| content)
            }
            _ => None,
        }
    }

    /// Blank buffer with default formatting. Session settings survive.
    pub(crate) fn reset_document(&mut self) {
        self.document = Document::new();
        self.format = TextFormat::default();
        self.pending_new_document = false;
        self.view_changed = true;
    }
}
