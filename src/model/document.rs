use crate::model::DreamingHints;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The unit produced per fetched URL
///
/// Created in a worker after a successful fetch, mutated only within that
/// worker, and immutable once handed to the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub title: String,
    pub text: String,
    pub clean_text: String,
    pub fetched_at: DateTime<Utc>,
    pub status: u16,
    pub content_hash: String,
    pub metadata: DocumentMetadata,
    pub chunks: Vec<ContentChunk>,
    pub links: Vec<ExtractedLink>,
    pub media: Vec<MediaAsset>,
    pub dream_hints: DreamingHints,
}

impl Document {
    /// Creates a document shell holding only fetch-level information
    ///
    /// Content fields stay empty; the parser fills them in when the response
    /// was OK and carried HTML.
    pub fn shell(url: &str, status: u16, metadata: DocumentMetadata) -> Self {
        Self {
            url: url.to_string(),
            title: String::new(),
            text: String::new(),
            clean_text: String::new(),
            fetched_at: Utc::now(),
            status,
            content_hash: String::new(),
            metadata,
            chunks: Vec::new(),
            links: Vec::new(),
            media: Vec::new(),
            dream_hints: DreamingHints::default(),
        }
    }
}

/// Enriched page metadata for downstream processing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub word_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// First value per response header key
    pub headers: BTreeMap<String, String>,
    pub content_type: String,
    /// Declared Content-Length; -1 when the server did not report one
    pub size: i64,
}

/// Semantic fragment kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Headline,
    Paragraph,
    Quote,
    List,
    Other,
}

/// Lexical sentiment of a text fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A semantically typed, ordered fragment of a document
///
/// Positions are dense from 0 in extraction order; IDs are unique within
/// their document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentChunk {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChunkKind,
    pub text: String,
    pub position: usize,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub entities: Vec<String>,
}

/// Classification of an outgoing reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Internal,
    External,
    Media,
}

/// An outgoing reference with crawl-priority information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedLink {
    pub url: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Higher values are fetched more eagerly
    pub priority: i32,
}

/// Media asset kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

/// An image/video/audio reference found on a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}
