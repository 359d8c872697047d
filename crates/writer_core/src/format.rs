#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Character and paragraph format applied to new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormat {
    pub font_family: String,
    pub font_size: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub alignment: Alignment,
    pub text_color: String,
    pub background_color: String,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 10,
            bold: false,
            italic: false,
            underline: false,
            alignment: Alignment::Left,
            text_color: "#000000".to_string(),
            background_color: "#FFFFFF".to_string(),
        }
    }
}

/// Adjustment relative to whatever format is current when it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChange {
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    FontSize(u32),
    Align(Alignment),
}

impl FormatChange {
    pub fn apply(self, format: &mut TextFormat) {
        match self {
            FormatChange::ToggleBold => format.bold = !format.bold,
            FormatChange::ToggleItalic => format.italic = !format.italic,
            FormatChange::ToggleUnderline => format.underline = !format.underline,
            FormatChange::FontSize(size) => format.font_size = size.max(1),
            FormatChange::Align(alignment) => format.alignment = alignment,
        }
    }
}
