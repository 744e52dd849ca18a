//! HTML parsing and semantic extraction
//!
//! Turns a fetched page into a structured [`Document`]: title, main-body
//! text, cleaned text with content hash, metadata, semantic chunks, links
//! with crawl priorities, and media assets. Dream hints are attached later
//! by the annotator.

use crate::annotate::{
    clean_text, detect_sentiment, extract_entities, extract_keywords, link_priority, word_count,
};
use crate::crawler::FetchedPage;
use crate::model::{
    ChunkKind, ContentChunk, Document, DocumentMetadata, ExtractedLink, LinkKind, MediaAsset,
    MediaKind,
};
use crate::urls::{canonicalize, host_key};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "footer", "header", "aside",
];
const EXCLUDED_CLASSES: &[&str] = &["advertisement", "ad", "sidebar"];

const MAIN_CONTENT_SELECTOR: &str = "main, article, .content, .post, .entry, #main, #content";

/// Minimum length for a main-content segment to be kept
const MIN_SEGMENT_LEN: usize = 50;

/// Parses a fetched page into a document
///
/// For non-success statuses (or an empty body) the document carries only
/// fetch-level information; content fields stay empty so consumers can
/// filter on status.
pub fn parse_document(page: &FetchedPage, base: &Url, page_depth: u32) -> Document {
    let metadata = DocumentMetadata {
        domain: host_key(base).unwrap_or_default(),
        headers: page.headers.clone(),
        content_type: page.content_type.clone(),
        size: page.declared_size,
        ..Default::default()
    };
    let mut doc = Document::shell(&canonicalize(base), page.status, metadata);

    if !(200..300).contains(&page.status) || page.body.is_empty() {
        return doc;
    }

    let html = Html::parse_document(&page.body);

    doc.title = extract_title(&html);
    doc.text = extract_text(&html);
    doc.clean_text = clean_text(&doc.text);
    doc.content_hash = format!("{:x}", Md5::digest(doc.clean_text.as_bytes()));
    doc.metadata.word_count = word_count(&doc.clean_text);

    extract_metadata(&html, &mut doc.metadata);
    doc.chunks = extract_chunks(&html);
    doc.links = extract_links(&html, base, page_depth);
    doc.media = extract_media(&html, base);

    doc
}

/// Text of the first `<title>` element, whitespace-trimmed
fn extract_title(html: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    html.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn is_excluded(element: &scraper::node::Element) -> bool {
    if EXCLUDED_TAGS.contains(&element.name()) {
        return true;
    }
    element.classes().any(|c| EXCLUDED_CLASSES.contains(&c))
}

/// True when the element or any ancestor is an excluded container
///
/// Chunks, links, and media inside navigation, footers, ads, and similar
/// boilerplate are not extracted at all.
fn in_excluded_subtree(element: ElementRef) -> bool {
    if is_excluded(element.value()) {
        return true;
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_excluded(ancestor.value()))
}

/// Concatenates descendant text, skipping excluded subtrees
fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    if !is_excluded(child_ref.value()) {
                        collect_text(child_ref, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn element_text(element: ElementRef) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

/// Extracts the main-body text
///
/// Main content containers win when any match, even if every matched segment
/// falls under the 50-character floor and nothing is kept; only pages without
/// a recognizable container fall back to the whole body.
fn extract_text(html: &Html) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut matched = 0usize;

    if let Ok(selector) = Selector::parse(MAIN_CONTENT_SELECTOR) {
        for element in html.select(&selector) {
            if in_excluded_subtree(element) {
                continue;
            }
            matched += 1;
            let text = element_text(element).trim().to_string();
            if text.len() > MIN_SEGMENT_LEN {
                parts.push(text);
            }
        }
    }

    if matched == 0 {
        if let Ok(selector) = Selector::parse("body") {
            if let Some(body) = html.select(&selector).next() {
                let text = element_text(body).trim().to_string();
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }
    }

    parts.join("\n\n")
}

/// Fills in author, publication date, tags, category, and language
fn extract_metadata(html: &Html, metadata: &mut DocumentMetadata) {
    if let Ok(selector) = Selector::parse(r#"meta[name="author"], meta[property="article:author"]"#)
    {
        for element in html.select(&selector) {
            if let Some(content) = element.value().attr("content") {
                let content = content.trim();
                if metadata.author.is_none() && !content.is_empty() {
                    metadata.author = Some(content.to_string());
                }
            }
        }
    }

    if let Ok(selector) =
        Selector::parse(r#"meta[property="article:published_time"], meta[name="date"]"#)
    {
        for element in html.select(&selector) {
            if let Some(content) = element.value().attr("content") {
                if metadata.published_at.is_none() {
                    if let Ok(parsed) = DateTime::parse_from_rfc3339(content.trim()) {
                        metadata.published_at = Some(parsed.with_timezone(&Utc));
                    }
                }
            }
        }
    }

    if let Ok(selector) =
        Selector::parse(r#"meta[name="keywords"], meta[property="article:tag"]"#)
    {
        for element in html.select(&selector) {
            if let Some(content) = element.value().attr("content") {
                for tag in content.split(',') {
                    let tag = tag.trim();
                    if !tag.is_empty() {
                        metadata.tags.push(tag.to_string());
                    }
                }
            }
        }
    }

    if let Ok(selector) =
        Selector::parse(r#"meta[property="article:section"], meta[name="category"]"#)
    {
        for element in html.select(&selector) {
            if let Some(content) = element.value().attr("content") {
                let content = content.trim();
                if metadata.category.is_none() && !content.is_empty() {
                    metadata.category = Some(content.to_string());
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("html") {
        if let Some(element) = html.select(&selector).next() {
            if let Some(lang) = element.value().attr("lang") {
                if !lang.is_empty() {
                    metadata.language = Some(lang.to_string());
                }
            }
        }
    }
}

/// Extracts semantic chunks in order: headlines, paragraphs, quotes
///
/// Positions are dense from 0 across all three passes; IDs carry a kind
/// prefix and the position.
fn extract_chunks(html: &Html) -> Vec<ContentChunk> {
    let mut chunks = Vec::new();
    let mut position = 0usize;

    if let Ok(selector) = Selector::parse("h1, h2, h3, h4, h5, h6") {
        for element in html.select(&selector) {
            if in_excluded_subtree(element) {
                continue;
            }
            let text = element_text(element).trim().to_string();
            if text.len() > 5 {
                chunks.push(ContentChunk {
                    id: format!("h_{}", position),
                    kind: ChunkKind::Headline,
                    text: text.clone(),
                    position,
                    confidence: 0.9,
                    keywords: extract_keywords(&text),
                    sentiment: None,
                    entities: Vec::new(),
                });
                position += 1;
            }
        }
    }

    if let Ok(selector) = Selector::parse("p") {
        for element in html.select(&selector) {
            if in_excluded_subtree(element) {
                continue;
            }
            let text = element_text(element).trim().to_string();
            if text.len() > 20 {
                chunks.push(ContentChunk {
                    id: format!("p_{}", position),
                    kind: ChunkKind::Paragraph,
                    text: text.clone(),
                    position,
                    confidence: 0.8,
                    keywords: extract_keywords(&text),
                    sentiment: Some(detect_sentiment(&text)),
                    entities: extract_entities(&text),
                });
                position += 1;
            }
        }
    }

    if let Ok(selector) = Selector::parse("blockquote, q") {
        for element in html.select(&selector) {
            if in_excluded_subtree(element) {
                continue;
            }
            let text = element_text(element).trim().to_string();
            if !text.is_empty() {
                chunks.push(ContentChunk {
                    id: format!("q_{}", position),
                    kind: ChunkKind::Quote,
                    text: text.clone(),
                    position,
                    confidence: 0.85,
                    keywords: extract_keywords(&text),
                    sentiment: Some(detect_sentiment(&text)),
                    entities: Vec::new(),
                });
                position += 1;
            }
        }
    }

    chunks
}

/// Extracts anchor links with crawl priorities
///
/// Fragment-only, too-short, non-http(s), and unresolvable hrefs are
/// rejected here, never stored.
fn extract_links(html: &Html, base: &Url, page_depth: u32) -> Vec<ExtractedLink> {
    let mut links = Vec::new();
    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };
    let base_host = host_key(base);

    for element in html.select(&selector) {
        if in_excluded_subtree(element) {
            continue;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.len() < 2 || href.starts_with('#') {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }

        let text = element_text(element).trim().to_string();
        let internal = host_key(&resolved) == base_host;
        let kind = if internal {
            LinkKind::Internal
        } else {
            LinkKind::External
        };

        links.push(ExtractedLink {
            url: canonicalize(&resolved),
            text: text.clone(),
            kind,
            context: None,
            priority: link_priority(internal, &text, page_depth),
        });
    }

    links
}

/// Extracts image and video references
fn extract_media(html: &Html, base: &Url) -> Vec<MediaAsset> {
    let mut media = Vec::new();

    if let Ok(selector) = Selector::parse("img") {
        for element in html.select(&selector) {
            if in_excluded_subtree(element) {
                continue;
            }
            let Some(src) = element.value().attr("src") else {
                continue;
            };
            let Ok(resolved) = base.join(src) else {
                continue;
            };
            let alt = element
                .value()
                .attr("alt")
                .map(str::to_string)
                .filter(|a| !a.is_empty());
            media.push(MediaAsset {
                url: resolved.to_string(),
                kind: MediaKind::Image,
                alt,
                caption: None,
                size: None,
                format: file_extension(src),
            });
        }
    }

    if let Ok(selector) = Selector::parse("video source, video") {
        for element in html.select(&selector) {
            if in_excluded_subtree(element) {
                continue;
            }
            let Some(src) = element.value().attr("src") else {
                continue;
            };
            let Ok(resolved) = base.join(src) else {
                continue;
            };
            media.push(MediaAsset {
                url: resolved.to_string(),
                kind: MediaKind::Video,
                alt: None,
                caption: None,
                size: None,
                format: file_extension(src),
            });
        }
    }

    media
}

/// Trailing extension token of a path, if it has one
fn file_extension(path: &str) -> Option<String> {
    let mut parts = path.rsplit('.');
    let ext = parts.next()?;
    parts.next().map(|_| ext.to_string())
}
