use std::path::PathBuf;

use crate::{AdaptiveFactor, DocumentFormat, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Feed the debouncer; statistics follow after the quiet period.
    NotifyEdit,
    /// Recompute statistics now, bypassing the debouncer.
    RefreshStatistics,
    LoadDocument {
        path: PathBuf,
    },
    SaveDocument {
        path: PathBuf,
        format: DocumentFormat,
        plain_text: String,
        html: Option<String>,
    },
    /// The document has no file yet; the front end must ask for one.
    RequestSavePath,
    SetAdaptiveFactor(AdaptiveFactor),
    PersistSettings(Session),
    Quit,
}
