use crate::{AdaptiveFactor, AppState, StatisticsSnapshot, TextFormat, Theme};

pub const APP_DISPLAY_NAME: &str = "SolidWriting";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentViewModel {
    pub title: String,
    pub statistics: Option<StatisticsSnapshot>,
    pub dirty: bool,
    pub read_only: bool,
    pub format: TextFormat,
    pub theme: Theme,
    pub adaptive_factor: AdaptiveFactor,
    pub status: Option<String>,
    pub pending_confirmation: bool,
}

impl DocumentViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let document = state.document();
        let name = document
            .display_name()
            .unwrap_or_else(|| "New File".to_string());
        // Read-only documents are never saved in place, so they carry no asterisk.
        let marker = if document.is_read_only() {
            " (read-only)"
        } else if document.is_dirty() {
            "*"
        } else {
            ""
        };
        Self {
            title: format!("{name}{marker} - {APP_DISPLAY_NAME}"),
            read_only: document.is_read_only(),
            statistics: state.statistics().cloned(),
            dirty: document.is_dirty(),
            format: state.format().clone(),
            theme: state.theme(),
            adaptive_factor: state.adaptive_factor(),
            status: state.status().map(ToOwned::to_owned),
            pending_confirmation: state.is_new_document_pending(),
        }
    }
}
