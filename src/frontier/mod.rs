//! The crawl frontier: pending URLs and the seen-set
//!
//! A bounded channel provides backpressure; when it is full, new links are
//! dropped rather than buffered without limit. The seen-set is the URL
//! deduplication structure: membership means "already dispatched to a
//! worker", claimed with an atomic insert-if-absent.

use dashmap::DashSet;
use tokio::sync::mpsc;

/// A frontier entry: a URL plus its crawl metadata
#[derive(Debug, Clone)]
pub struct UrlWithMetadata {
    /// Canonical URL to fetch
    pub url: String,
    /// Distance from the seed set (seeds are 0)
    pub depth: u32,
    /// The page this URL was discovered on
    pub parent: Option<String>,
    /// Higher values are fetched more eagerly
    pub priority: i32,
}

impl UrlWithMetadata {
    /// Wraps a seed URL (depth 0, priority 10)
    pub fn seed(url: String) -> Self {
        Self {
            url,
            depth: 0,
            parent: None,
            priority: 10,
        }
    }

    /// Wraps a link discovered on `parent` at depth `parent_depth`
    pub fn child(url: String, parent: &str, parent_depth: u32, priority: i32) -> Self {
        Self {
            url,
            depth: parent_depth + 1,
            parent: Some(parent.to_string()),
            priority,
        }
    }
}

/// Shared handle for enqueueing URLs and claiming them for processing
pub struct Frontier {
    tx: mpsc::Sender<UrlWithMetadata>,
    seen: DashSet<String>,
}

impl Frontier {
    /// Creates a frontier with the given channel capacity
    ///
    /// The receiver half goes to the worker pool.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<UrlWithMetadata>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                tx,
                seen: DashSet::new(),
            },
            rx,
        )
    }

    /// Attempts to enqueue a discovered link without blocking
    ///
    /// When the channel is full the entry is dropped; drops of priority >= 5
    /// links are logged so back-pressure on valuable links is visible.
    pub fn enqueue(&self, entry: UrlWithMetadata) {
        let priority = entry.priority;
        let url = entry.url.clone();
        match self.tx.try_send(entry) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                if priority >= 5 {
                    tracing::warn!("queue full, dropping link: {}", url);
                }
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }

    /// Enqueues a seed, waiting for capacity
    ///
    /// Seeds respect backpressure instead of being dropped; returns false
    /// once the crawl is shutting down.
    pub async fn enqueue_seed(&self, entry: UrlWithMetadata) -> bool {
        self.tx.send(entry).await.is_ok()
    }

    /// Claims a URL for processing
    ///
    /// The first caller gets `true`; every later claim of the same URL gets
    /// `false`.
    pub fn claim(&self, url: &str) -> bool {
        self.seen.insert(url.to_string())
    }

    /// Number of distinct URLs ever claimed or enqueued for claiming
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
