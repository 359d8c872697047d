use std::fmt::Write as _;

use chrono::{DateTime, Local};
use serde::Serialize;
use writer_core::{Alignment, DocumentViewModel, StatisticsSnapshot, Theme};

#[derive(Serialize)]
struct RenderedView<'a> {
    title: &'a str,
    dirty: bool,
    read_only: bool,
    statistics: Option<&'a StatisticsSnapshot>,
    font: String,
    theme: &'static str,
    adaptive_factor: u32,
    status: Option<&'a str>,
    pending_confirmation: bool,
    rendered_at: String,
}

/// Render the view either as a text panel or as one line of JSON.
pub fn render(view: &DocumentViewModel, json: bool, now: DateTime<Local>) -> String {
    if json {
        let rendered = RenderedView {
            title: &view.title,
            dirty: view.dirty,
            read_only: view.read_only,
            statistics: view.statistics.as_ref(),
            font: font_label(view),
            theme: theme_label(view.theme),
            adaptive_factor: view.adaptive_factor.get(),
            status: view.status.as_deref(),
            pending_confirmation: view.pending_confirmation,
            rendered_at: now.to_rfc3339(),
        };
        return serde_json::to_string(&rendered).unwrap_or_default();
    }

    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.title);
    match &view.statistics {
        Some(stats) => {
            let _ = writeln!(out, "{}", statistics_line(stats));
        }
        None => out.push_str("statistics pending\n"),
    }
    let _ = write!(
        out,
        "format {} | theme {}",
        font_label(view),
        theme_label(view.theme)
    );
    if view.adaptive_factor.is_power_saving() {
        let _ = write!(out, " | power saver x{}", view.adaptive_factor.get());
    }
    out.push('\n');
    if let Some(status) = &view.status {
        let _ = writeln!(out, "[{}] {}", now.format("%H:%M:%S"), status);
    }
    if view.read_only {
        out.push_str("(read-only; :saveas another format to edit)\n");
    }
    if view.pending_confirmation {
        out.push_str("(:yes to discard, :no to keep)\n");
    }
    out
}

fn statistics_line(stats: &StatisticsSnapshot) -> String {
    let mut line = format!(
        "chars {} | words {} | lines {}",
        stats.char_count, stats.word_count, stats.line_count
    );
    if let Some(avg) = stats.avg_word_length {
        let _ = write!(line, " | avg word {avg:.2}");
    }
    if let Some(avg) = stats.avg_line_length {
        let _ = write!(line, " | avg line {avg:.2}");
    }
    let _ = write!(
        line,
        " | upper {} | lower {}",
        stats.upper_count, stats.lower_count
    );
    if let Some(language) = &stats.detected_language {
        let _ = write!(line, " | lang {language}");
    }
    line
}

fn font_label(view: &DocumentViewModel) -> String {
    let format = &view.format;
    let mut label = format!("{} {}pt", format.font_family, format.font_size);
    for (on, name) in [
        (format.bold, "bold"),
        (format.italic, "italic"),
        (format.underline, "underline"),
    ] {
        if on {
            label.push(' ');
            label.push_str(name);
        }
    }
    if format.alignment != Alignment::Left {
        let _ = write!(label, " {:?}", format.alignment);
    }
    label
}

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}
