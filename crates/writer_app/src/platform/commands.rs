use std::path::PathBuf;

use writer_core::{FormatChange, Msg};

use super::battery;

/// One line of terminal input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text appended to the document as a new line.
    Append(String),
    Undo,
    Clear,
    Save,
    SaveAs(PathBuf),
    Open(PathBuf),
    New,
    Yes,
    No,
    Power(bool),
    Theme,
    Bold,
    Italic,
    Underline,
    FontSize(u32),
    Stats,
    Quit,
    Invalid(String),
}

/// Parse a line; anything not starting with `:` is document text.
/// `::` escapes a literal leading colon.
pub fn parse(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(escaped) = line.strip_prefix("::") {
        return Command::Append(format!(":{escaped}"));
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Append(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match (name, arg) {
        ("save", "") => Command::Save,
        ("saveas", "") | ("open", "") => Command::Invalid(format!(":{name} needs a path")),
        ("saveas", path) => Command::SaveAs(PathBuf::from(path)),
        ("open", path) => Command::Open(PathBuf::from(path)),
        ("new", "") => Command::New,
        ("yes", "") => Command::Yes,
        ("no", "") => Command::No,
        ("undo", "") => Command::Undo,
        ("clear", "") => Command::Clear,
        ("power", "on") => Command::Power(true),
        ("power", "off") => Command::Power(false),
        ("theme", "") => Command::Theme,
        ("bold", "") => Command::Bold,
        ("italic", "") => Command::Italic,
        ("underline", "") => Command::Underline,
        ("size", size) => match size.parse::<u32>() {
            Ok(size) if size > 0 => Command::FontSize(size),
            _ => Command::Invalid(format!("invalid font size {size:?}")),
        },
        ("stats", "") => Command::Stats,
        ("quit", "") | ("q", "") => Command::Quit,
        _ => Command::Invalid(format!("unknown command :{rest}")),
    }
}

impl Command {
    /// Message for the command. Edits are expressed relative to whatever text
    /// the document holds when the message is applied, so lines queued before
    /// earlier ones were dispatched still accumulate. `Invalid` yields `None`.
    pub fn into_msg(self) -> Option<Msg> {
        let msg = match self {
            Command::Append(line) => Msg::LineAppended(line),
            Command::Undo => Msg::LastLineRemoved,
            Command::Clear => Msg::TextEdited(String::new()),
            Command::Save => Msg::SaveRequested,
            Command::SaveAs(path) => Msg::SaveAsRequested(path),
            Command::Open(path) => Msg::OpenRequested(path),
            Command::New => Msg::NewDocumentRequested,
            Command::Yes => Msg::NewDocumentConfirmed,
            Command::No => Msg::NewDocumentDeclined,
            Command::Power(enabled) => Msg::PowerSaverToggled {
                enabled,
                battery: if enabled {
                    battery::read_battery()
                } else {
                    None
                },
            },
            Command::Theme => Msg::ThemeToggled,
            Command::Bold => Msg::FormatAdjusted(FormatChange::ToggleBold),
            Command::Italic => Msg::FormatAdjusted(FormatChange::ToggleItalic),
            Command::Underline => Msg::FormatAdjusted(FormatChange::ToggleUnderline),
            Command::FontSize(size) => Msg::FormatAdjusted(FormatChange::FontSize(size)),
            Command::Stats => Msg::StatisticsRequested,
            Command::Quit => Msg::QuitRequested,
            Command::Invalid(_) => return None,
        };
        Some(msg)
    }
}
