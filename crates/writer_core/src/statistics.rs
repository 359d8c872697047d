use serde::Serialize;

/// Word count a text must exceed before language detection is attempted.
pub const DEFAULT_LANGUAGE_THRESHOLD: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsOptions {
    pub language_threshold: usize,
    pub detect_language: bool,
}

impl Default for StatisticsOptions {
    fn default() -> Self {
        Self {
            language_threshold: DEFAULT_LANGUAGE_THRESHOLD,
            detect_language: true,
        }
    }
}

/// Point-in-time summary of a document's plain text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub char_count: usize,
    pub word_count: usize,
    pub line_count: usize,
    pub avg_word_length: Option<f64>,
    pub avg_line_length: Option<f64>,
    pub upper_count: usize,
    pub lower_count: usize,
    pub detected_language: Option<String>,
}

impl StatisticsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.char_count == 0
    }
}

/// Derive a snapshot from `text`. Cost is a handful of linear scans.
pub fn compute_statistics(text: &str, options: &StatisticsOptions) -> StatisticsSnapshot {
    let char_count = text.chars().count();
    let line_count = memchr::memchr_iter(b'\n', text.as_bytes()).count() + 1;

    let mut word_count = 0usize;
    let mut word_chars = 0usize;
    for word in text.split_whitespace() {
        word_count += 1;
        word_chars += word.chars().count();
    }

    if word_count == 0 || char_count == 0 {
        return StatisticsSnapshot {
            char_count,
            word_count,
            line_count,
            avg_word_length: None,
            avg_line_length: None,
            upper_count: 0,
            lower_count: 0,
            detected_language: None,
        };
    }

    let avg_word_length = word_chars as f64 / word_count as f64;
    // Every line but the last carries a newline; subtract it from the average.
    let avg_line_length = char_count as f64 / line_count as f64 - 1.0;

    let (upper_count, lower_count) = text.chars().fold((0, 0), |(upper, lower), c| {
        if c.is_uppercase() {
            (upper + 1, lower)
        } else if c.is_lowercase() {
            (upper, lower + 1)
        } else {
            (upper, lower)
        }
    });

    let detected_language = if options.detect_language && word_count > options.language_threshold
    {
        detect_language(text)
    } else {
        None
    };

    StatisticsSnapshot {
        char_count,
        word_count,
        line_count,
        avg_word_length: Some(avg_word_length),
        avg_line_length: Some(avg_line_length),
        upper_count,
        lower_count,
        detected_language,
    }
}

fn detect_language(text: &str) -> Option<String> {
    whatlang::detect(text).and_then(|info| language_code(info.lang(), info.is_reliable()))
}

/// Two-letter ISO 639-1 code for a reliable guess. Languages without one keep
/// their three-letter ISO 639-3 code.
fn language_code(lang: whatlang::Lang, reliable: bool) -> Option<String> {
    if !reliable {
        return None;
    }
    let code = lang.code();
    let short = isolang::Language::from_639_3(code).and_then(|language| language.to_639_1());
    Some(short.unwrap_or(code).to_string())
}
