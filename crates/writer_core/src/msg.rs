use std::path::PathBuf;

use crate::{
    AdaptiveFactor, BatteryStatus, DocumentFormat, FormatChange, StatisticsSnapshot, TextFormat,
    Theme,
};

/// Per-user state carried across runs: restored at startup, persisted on change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub adaptive_factor: AdaptiveFactor,
    pub theme: Theme,
    pub file: Option<PathBuf>,
    pub is_saved: bool,
    /// Buffer text at the time the session was captured; `None` when empty.
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the document; carries the full plain text.
    TextEdited(String),
    /// User typed a new last line.
    LineAppended(String),
    /// User removed the last line.
    LastLineRemoved,
    /// Statistics recomputed after a debounce cycle.
    StatisticsReady(StatisticsSnapshot),
    /// Dirty flag recomputed against the baseline.
    DocumentDirtyChanged(bool),
    /// Document became empty; fall back to the default format.
    ResetFormatting,
    /// User picked a new character/paragraph format.
    FormatChanged(TextFormat),
    /// User adjusted the current format.
    FormatAdjusted(FormatChange),
    /// User asked for statistics without waiting for the debounce window.
    StatisticsRequested,
    /// User asked for a blank document.
    NewDocumentRequested,
    /// User accepted discarding unsaved changes.
    NewDocumentConfirmed,
    /// User kept the current document.
    NewDocumentDeclined,
    /// User asked to open a file.
    OpenRequested(PathBuf),
    /// Engine finished reading a file.
    DocumentLoaded {
        path: PathBuf,
        format: DocumentFormat,
        plain_text: String,
        html: Option<String>,
    },
    /// Engine could not read a file.
    LoadFailed { path: PathBuf, reason: String },
    /// User asked to save under the current file name.
    SaveRequested,
    /// User chose a file name to save under.
    SaveAsRequested(PathBuf),
    /// Engine finished writing a file.
    DocumentSaved { path: PathBuf },
    /// Engine could not write a file.
    SaveFailed { path: PathBuf, reason: String },
    /// User toggled the power saver.
    PowerSaverToggled {
        enabled: bool,
        battery: Option<BatteryStatus>,
    },
    /// User toggled between light and dark themes.
    ThemeToggled,
    /// Persisted settings were loaded at startup. `open` is a file named on
    /// the command line; it wins over the remembered one.
    RestoreSettings {
        session: Session,
        open: Option<PathBuf>,
    },
    /// User asked to leave the application.
    QuitRequested,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
