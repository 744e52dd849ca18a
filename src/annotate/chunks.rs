//! Per-chunk annotators: keywords, entities, sentiment

use crate::annotate::lexicon::{
    SENTIMENT_NEGATIVE_WORDS, SENTIMENT_POSITIVE_WORDS, STOPWORDS,
};
use crate::model::Sentiment;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

const MAX_KEYWORDS: usize = 10;
const MAX_ENTITIES: usize = 5;

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("entity pattern is valid")
    })
}

/// Extracts up to ten keywords from a text fragment
///
/// Tokens are lowercased with trailing sentence punctuation stripped;
/// stopwords and tokens of length <= 3 are dropped. A surviving word is kept
/// when it occurs at least twice or is longer than six characters. Selection
/// runs in first-occurrence order so the result is deterministic.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for token in lower.split_whitespace() {
        let word = token.trim_end_matches(['.', ',', '!', '?', ';', ':']);
        if word.len() > 3 && !STOPWORDS.contains(&word) {
            let count = counts.entry(word).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }
    }

    let mut keywords = Vec::new();
    for word in order {
        if counts[word] >= 2 || word.len() > 6 {
            keywords.push(word.to_string());
        }
        if keywords.len() >= MAX_KEYWORDS {
            break;
        }
    }
    keywords
}

/// Extracts up to five entities: spans of consecutive capitalized words
pub fn extract_entities(text: &str) -> Vec<String> {
    let mut entities = Vec::new();
    let mut seen = HashSet::new();

    for m in entity_re().find_iter(text) {
        let span = m.as_str();
        if span.len() > 3 && seen.insert(span) {
            entities.push(span.to_string());
        }
        if entities.len() >= MAX_ENTITIES {
            break;
        }
    }
    entities
}

/// Classifies a fragment by counting positive vs negative word occurrences
///
/// Ties (including zero hits on both sides) resolve to neutral.
pub fn detect_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let positive: usize = SENTIMENT_POSITIVE_WORDS
        .iter()
        .map(|w| lower.matches(w).count())
        .sum();
    let negative: usize = SENTIMENT_NEGATIVE_WORDS
        .iter()
        .map(|w| lower.matches(w).count())
        .sum();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_drop_stopwords_and_short_tokens() {
        let keywords = extract_keywords("the cat sat on the magnificent windowsill");
        assert!(keywords.contains(&"magnificent".to_string()));
        assert!(keywords.contains(&"windowsill".to_string()));
        assert!(!keywords.iter().any(|k| k == "the"));
        assert!(!keywords.iter().any(|k| k == "cat"));
    }

    #[test]
    fn keywords_keep_repeated_short_words() {
        // "tree" is only 4 chars but occurs twice
        let keywords = extract_keywords("tree house near tree line");
        assert!(keywords.contains(&"tree".to_string()));
        // "line" occurs once and is not longer than 6 chars
        assert!(!keywords.contains(&"line".to_string()));
    }

    #[test]
    fn keywords_strip_trailing_punctuation() {
        let keywords = extract_keywords("wonderful! wonderful.");
        assert_eq!(keywords, vec!["wonderful".to_string()]);
    }

    #[test]
    fn keywords_cap_at_ten() {
        let text = "aardvarks balloons castles dragons elephants falcons giraffes \
                    harbours islands jungles kangaroos lanterns";
        assert_eq!(extract_keywords(text).len(), 10);
    }

    #[test]
    fn keywords_are_deterministic() {
        let text = "crystalline gardens shimmer beneath crystalline skies forever";
        assert_eq!(extract_keywords(text), extract_keywords(text));
    }

    #[test]
    fn entities_match_capitalized_spans() {
        let entities = extract_entities("Alice visited New York City with Bob Smith.");
        assert!(entities.contains(&"Alice".to_string()));
        assert!(entities.contains(&"New York City".to_string()));
        assert!(entities.contains(&"Bob Smith".to_string()));
    }

    #[test]
    fn entities_dedupe_and_cap() {
        let entities = extract_entities(
            "We saw Alpha yesterday and Alpha again, then Bravo with Charlie, \
             later Delta and Echoes before Foxtrot joined Golfer at dusk.",
        );
        assert_eq!(entities.len(), 5);
        assert_eq!(entities[0], "Alpha");
        let unique: HashSet<_> = entities.iter().collect();
        assert_eq!(unique.len(), entities.len());
    }

    #[test]
    fn entities_skip_short_spans() {
        let entities = extract_entities("We met Al at the market.");
        assert!(!entities.contains(&"Al".to_string()));
    }

    #[test]
    fn sentiment_positive() {
        assert_eq!(
            detect_sentiment("a great and wonderful day, the best"),
            Sentiment::Positive
        );
    }

    #[test]
    fn sentiment_negative() {
        assert_eq!(
            detect_sentiment("a terrible, awful, horrible mess"),
            Sentiment::Negative
        );
    }

    #[test]
    fn sentiment_tie_is_neutral() {
        assert_eq!(detect_sentiment("good but bad"), Sentiment::Neutral);
        assert_eq!(detect_sentiment("nothing to report"), Sentiment::Neutral);
    }
}
