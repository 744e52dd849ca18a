//! Wire data model
//!
//! The types in this module are serialized as JSON onto the event bus and
//! form the stable contract with downstream consumers. Keys are snake_case;
//! optional fields are omitted rather than serialized as nulls.

mod document;
mod hints;

pub use document::{
    ChunkKind, ContentChunk, Document, DocumentMetadata, ExtractedLink, LinkKind, MediaAsset,
    MediaKind, Sentiment,
};
pub use hints::{DreamingHints, Tone};
