//! Dream Crawler: a web crawler that feeds an AI dreaming pipeline
//!
//! This crate implements a concurrent, polite web crawler that fetches HTML
//! documents, extracts semantic structure (text, links, media, metadata),
//! derives heuristic "dream hints" from lexical analysis of the content, and
//! publishes the results onto a partitioned event bus for downstream
//! processing.

pub mod annotate;
pub mod config;
pub mod crawler;
pub mod frontier;
pub mod model;
pub mod output;
pub mod robots;
pub mod urls;

use thiserror::Error;

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Event bus error: {0}")]
    Bus(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use model::{ContentChunk, Document, DreamingHints, ExtractedLink, MediaAsset};
