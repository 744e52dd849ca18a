//! Text cleaning helpers

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn stripped_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[^\w\s.,!?;:'"()-]"#).expect("strip pattern is valid"))
}

/// Produces the cleaned form of extracted text
///
/// Whitespace runs collapse to a single space and characters outside the
/// word/whitespace/basic-punctuation set are removed. The cleaned text is
/// what gets hashed, word-counted, and scanned by the annotator.
pub fn clean_text(raw: &str) -> String {
    let collapsed = whitespace_re().replace_all(raw, " ");
    let stripped = stripped_chars_re().replace_all(&collapsed, "");
    stripped.trim().to_string()
}

/// Counts whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
