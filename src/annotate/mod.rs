//! Content analysis pass
//!
//! Everything in this module is lexical and deterministic: fixed wordlists
//! (in [`lexicon`]) scanned against lowercased text. Given identical input
//! bytes and base URL the produced annotations are identical across runs.

pub mod lexicon;

mod chunks;
mod hints;
mod links;
mod text;

pub use chunks::{detect_sentiment, extract_entities, extract_keywords};
pub use hints::{annotate, detect_emotions, detect_themes, detect_tone};
pub use links::link_priority;
pub use text::{clean_text, word_count};
