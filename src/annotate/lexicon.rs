//! Wordlists driving the annotation heuristics
//!
//! Kept as data rather than control flow so the tables can be tuned without
//! touching the analysis code. All matching is done against lowercased text.

/// Emotion labels with the words that trigger them
pub const EMOTION_LEXICA: &[(&str, &[&str])] = &[
    (
        "positive",
        &[
            "amazing",
            "beautiful",
            "wonderful",
            "great",
            "love",
            "happy",
            "joy",
            "success",
        ],
    ),
    (
        "dark",
        &[
            "terrible", "awful", "hate", "sad", "fear", "anger", "pain", "failure",
        ],
    ),
    (
        "mystical",
        &[
            "mystery", "magic", "dream", "vision", "spirit", "soul", "ethereal", "cosmic",
        ],
    ),
];

/// Theme labels with the words that trigger them
pub const THEME_LEXICA: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "technology",
            "ai",
            "computer",
            "digital",
            "software",
            "algorithm",
        ],
    ),
    (
        "creative",
        &["art", "creative", "design", "visual", "aesthetic", "beauty"],
    ),
    (
        "scientific",
        &[
            "science",
            "research",
            "discovery",
            "experiment",
            "analysis",
        ],
    ),
];

/// Visual motif vocabulary; matched words are recorded verbatim
pub const VISUAL_MOTIF_WORDS: &[&str] = &[
    "light",
    "shadow",
    "color",
    "bright",
    "dark",
    "crystal",
    "liquid",
    "flowing",
    "geometric",
    "organic",
];

/// Color vocabulary; matched words are recorded verbatim
pub const COLOR_WORDS: &[&str] = &[
    "red", "blue", "green", "yellow", "purple", "orange", "pink", "white", "black", "gold",
    "silver",
];

/// Vocabulary contributing to the abstractness score
pub const ABSTRACT_WORDS: &[&str] = &[
    "concept",
    "idea",
    "essence",
    "meaning",
    "philosophy",
    "abstract",
    "theory",
    "metaphor",
];

/// Words indicating a formal register
pub const FORMAL_TONE_WORDS: &[&str] = &[
    "therefore",
    "furthermore",
    "consequently",
    "analysis",
    "research",
];

/// Words indicating a casual register
pub const CASUAL_TONE_WORDS: &[&str] = &["really", "pretty", "quite", "basically", "actually"];

/// Words indicating a dramatic register
pub const DRAMATIC_TONE_WORDS: &[&str] = &[
    "incredible",
    "amazing",
    "shocking",
    "revolutionary",
    "breakthrough",
];

/// Positive sentiment vocabulary (occurrence-counted)
pub const SENTIMENT_POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "love",
    "best",
];

/// Negative sentiment vocabulary (occurrence-counted)
pub const SENTIMENT_NEGATIVE_WORDS: &[&str] =
    &["bad", "terrible", "awful", "hate", "worst", "horrible"];

/// Stopwords dropped during keyword extraction
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "this", "that", "these", "those", "i", "you", "he", "she", "it",
    "we", "they",
];

/// Fixed visual cue set attached to every annotated document
pub const VISUAL_CUES: &[&str] = &[
    "ethereal lighting",
    "flowing forms",
    "crystalline structures",
];

/// Fixed audio cue set attached to every annotated document
pub const AUDIO_CUES: &[&str] = &["ambient whispers", "digital harmonics", "pulsing rhythms"];

/// Anchor-text words that raise a link's crawl priority
pub const PRIORITY_ANCHOR_WORDS: &[&str] = &["article", "news", "blog"];
