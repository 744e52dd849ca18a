//! Document-level dream-hint derivation

use crate::annotate::lexicon::{
    ABSTRACT_WORDS, AUDIO_CUES, CASUAL_TONE_WORDS, COLOR_WORDS, DRAMATIC_TONE_WORDS,
    EMOTION_LEXICA, FORMAL_TONE_WORDS, THEME_LEXICA, VISUAL_CUES, VISUAL_MOTIF_WORDS,
};
use crate::model::{Document, DreamingHints, Tone};

/// Derives dream hints for a fully extracted document
///
/// Analysis runs over the lowercased cleaned text plus title. The document's
/// word count, chunk count, and media count feed the complexity score.
pub fn annotate(doc: &Document) -> DreamingHints {
    let text = format!("{} {}", doc.clean_text, doc.title).to_lowercase();

    let mut hints = DreamingHints {
        emotions: detect_emotions(&text),
        themes: detect_themes(&text),
        motifs: extract_motifs(&text),
        tone: detect_tone(&text),
        visual_cues: VISUAL_CUES.iter().map(|c| c.to_string()).collect(),
        audio_cues: AUDIO_CUES.iter().map(|c| c.to_string()).collect(),
        color_palette: extract_colors(&text),
        ..Default::default()
    };

    hints.complexity = complexity_score(
        doc.metadata.word_count,
        doc.chunks.len(),
        doc.media.len(),
    );
    hints.surrealism = surrealism_score(&hints);
    hints.abstractness = abstractness_score(&text, hints.emotions.len());

    hints
}

/// Detects emotion labels; falls back to "neutral" when nothing matches
pub fn detect_emotions(text: &str) -> Vec<String> {
    let mut emotions = Vec::new();
    for (label, words) in EMOTION_LEXICA {
        if words.iter().any(|w| text.contains(w)) {
            emotions.push(label.to_string());
        }
    }
    if emotions.is_empty() {
        emotions.push("neutral".to_string());
    }
    emotions
}

/// Detects theme labels; may be empty
pub fn detect_themes(text: &str) -> Vec<String> {
    let mut themes = Vec::new();
    for (label, words) in THEME_LEXICA {
        if words.iter().any(|w| text.contains(w)) {
            themes.push(label.to_string());
        }
    }
    themes
}

/// Records each motif word present in the text, in table order
fn extract_motifs(text: &str) -> Vec<String> {
    VISUAL_MOTIF_WORDS
        .iter()
        .filter(|w| text.contains(*w))
        .map(|w| w.to_string())
        .collect()
}

/// Records each color word present in the text, in table order
fn extract_colors(text: &str) -> Vec<String> {
    COLOR_WORDS
        .iter()
        .filter(|w| text.contains(*w))
        .map(|w| w.to_string())
        .collect()
}

/// Picks the dominant register from the tone wordlists
///
/// Dramatic wins when strictly greatest; otherwise formal when strictly
/// above casual; otherwise casual when present at all.
pub fn detect_tone(text: &str) -> Tone {
    let hits = |words: &[&str]| words.iter().filter(|w| text.contains(*w)).count();

    let formal = hits(FORMAL_TONE_WORDS);
    let casual = hits(CASUAL_TONE_WORDS);
    let dramatic = hits(DRAMATIC_TONE_WORDS);

    if dramatic > formal && dramatic > casual {
        Tone::Dramatic
    } else if formal > casual {
        Tone::Formal
    } else if casual > 0 {
        Tone::Casual
    } else {
        Tone::Neutral
    }
}

fn complexity_score(word_count: usize, chunk_count: usize, media_count: usize) -> f64 {
    let score =
        word_count as f64 / 1000.0 + chunk_count as f64 / 10.0 + media_count as f64 / 5.0;
    score.min(1.0)
}

fn surrealism_score(hints: &DreamingHints) -> f64 {
    let mut score = 0.0;

    if hints.emotions.len() > 1 {
        score += 0.3;
    }
    if hints.emotions.iter().any(|e| e == "mystical") {
        score += 0.4;
    }
    if hints.themes.iter().any(|t| t == "creative") {
        score += 0.3;
    }
    score += hints.motifs.len() as f64 * 0.05;
    score += hints.complexity * 0.2;

    score.min(1.0)
}

fn abstractness_score(text: &str, emotion_count: usize) -> f64 {
    let mut score = ABSTRACT_WORDS
        .iter()
        .filter(|w| text.contains(*w))
        .count() as f64
        * 0.1;
    score += emotion_count as f64 * 0.05;
    score.min(1.0)
}
