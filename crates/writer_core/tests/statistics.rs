use writer_core::{compute_statistics, StatisticsOptions, DEFAULT_LANGUAGE_THRESHOLD};

const ENGLISH_PARAGRAPH: &str = "The committee met on Tuesday morning to discuss the \
new library building. Several members argued that the reading rooms should stay open \
later in the evening, because students often work after their classes have finished. \
Others were worried about the cost of heating and lighting such a large space through \
the winter, and asked for a detailed budget before they would agree to anything.";

#[test]
fn recompute_is_idempotent() {
    let options = StatisticsOptions::default();
    let first = compute_statistics(ENGLISH_PARAGRAPH, &options);
    let second = compute_statistics(ENGLISH_PARAGRAPH, &options);
    assert_eq!(first, second);
}

#[test]
fn case_counts_skip_digits_and_punctuation() {
    let snapshot = compute_statistics("AbC 123", &StatisticsOptions::default());
    assert_eq!(snapshot.upper_count, 2);
    assert_eq!(snapshot.lower_count, 1);
    assert_eq!(snapshot.word_count, 2);
    assert_eq!(snapshot.char_count, 7);
}

#[test]
fn lines_follow_newline_count_plus_one() {
    let snapshot = compute_statistics("one\ntwo\n\nfour", &StatisticsOptions::default());
    assert_eq!(snapshot.line_count, 4);
    assert_eq!(snapshot.word_count, 3);
}

#[test]
fn language_is_not_detected_at_or_below_threshold() {
    let words: Vec<&str> = ENGLISH_PARAGRAPH
        .split_whitespace()
        .take(DEFAULT_LANGUAGE_THRESHOLD)
        .collect();
    let text = words.join(" ");

    let snapshot = compute_statistics(&text, &StatisticsOptions::default());
    assert_eq!(snapshot.word_count, DEFAULT_LANGUAGE_THRESHOLD);
    assert_eq!(snapshot.detected_language, None);
}

#[test]
fn repeated_phrase_above_threshold_never_fails() {
    let text = "the quick brown fox ".repeat(30);
    let snapshot = compute_statistics(&text, &StatisticsOptions::default());
    assert_eq!(snapshot.word_count, 120);
    if let Some(code) = snapshot.detected_language {
        assert!(!code.is_empty());
    }
}

#[test]
fn english_prose_is_detected() {
    let snapshot = compute_statistics(ENGLISH_PARAGRAPH, &StatisticsOptions::default());
    assert!(snapshot.word_count > DEFAULT_LANGUAGE_THRESHOLD);
    assert_eq!(snapshot.detected_language.as_deref(), Some("en"));
}

#[test]
fn custom_threshold_is_honoured() {
    let options = StatisticsOptions {
        language_threshold: 1_000,
        ..StatisticsOptions::default()
    };
    let snapshot = compute_statistics(ENGLISH_PARAGRAPH, &options);
    assert_eq!(snapshot.detected_language, None);
}
