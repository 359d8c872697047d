use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    Html,
    Markdown,
    #[default]
    PlainText,
    /// Word documents are imported as text and never written back.
    Docx,
}

impl DocumentFormat {
    /// Format implied by the file extension, matched case-insensitively.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("swdoc" | "html" | "htm") => DocumentFormat::Html,
            Some("md") => DocumentFormat::Markdown,
            Some("docx") => DocumentFormat::Docx,
            _ => DocumentFormat::PlainText,
        }
    }

    pub fn is_read_only(self) -> bool {
        matches!(self, DocumentFormat::Docx)
    }
}

/// The editable document buffer.
///
/// `baseline` is the text as it was at the last load or save; the dirty flag
/// is derived by comparing the current text against it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    plain_text: String,
    html: Option<String>,
    path: Option<PathBuf>,
    format: DocumentFormat,
    baseline: String,
    dirty: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(
        path: PathBuf,
        format: DocumentFormat,
        plain_text: String,
        html: Option<String>,
    ) -> Self {
        Self {
            baseline: plain_text.clone(),
            plain_text,
            html,
            path: Some(path),
            format,
            dirty: false,
        }
    }

    /// Unnamed buffer holding text carried over from an earlier run. Nothing
    /// on disk matches it, so any content makes it dirty.
    pub fn restored(content: String) -> Self {
        Self {
            dirty: !content.is_empty(),
            plain_text: content,
            ..Self::default()
        }
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn is_read_only(&self) -> bool {
        self.format.is_read_only()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn matches_baseline(&self, text: &str) -> bool {
        self.baseline == text
    }

    /// Replace the text after a user edit. The HTML projection no longer
    /// matches and is dropped; the dirty flag is refreshed against the
    /// baseline right away. Returns false when nothing changed.
    pub(crate) fn edit(&mut self, text: String) -> bool {
        if self.plain_text == text {
            return false;
        }
        self.dirty = text != self.baseline;
        self.plain_text = text;
        self.html = None;
        true
    }

    /// Text with `line` appended as a new last line.
    pub(crate) fn with_line_appended(&self, line: &str) -> String {
        if self.plain_text.is_empty() {
            line.to_string()
        } else {
            format!("{}\n{}", self.plain_text, line)
        }
    }

    /// Text without its last line.
    pub(crate) fn without_last_line(&self) -> String {
        self.plain_text
            .rsplit_once('\n')
            .map(|(head, _)| head.to_string())
            .unwrap_or_default()
    }

    /// Point the buffer at a new file; the format follows the extension.
    pub(crate) fn associate(&mut self, path: PathBuf) {
        self.format = DocumentFormat::from_path(&path);
        self.path = Some(path);
    }

    pub(crate) fn mark_saved(&mut self) {
        self.baseline = self.plain_text.clone();
        self.dirty = false;
    }

    /// File name shown in titles, or `None` for an unsaved buffer.
    pub fn display_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }
}
