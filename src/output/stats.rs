//! Crawl statistics
//!
//! Monotonic counters behind a mutex; every update is O(1). A reporter task
//! logs a snapshot every 30 seconds, and the coordinator logs the final
//! summary on shutdown.

use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const REPORT_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
struct StatsInner {
    pages: u64,
    errors: u64,
    dreams: u64,
    bytes: u64,
    avg_page_size: f64,
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub pages: u64,
    pub errors: u64,
    pub dreams: u64,
    pub bytes: u64,
    pub avg_page_size: f64,
}

/// Shared crawl counters
#[derive(Debug, Default)]
pub struct CrawlerStats {
    inner: Mutex<StatsInner>,
}

impl CrawlerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_pages(&self) {
        self.inner.lock().expect("stats lock poisoned").pages += 1;
    }

    pub fn increment_errors(&self) {
        self.inner.lock().expect("stats lock poisoned").errors += 1;
    }

    pub fn increment_dreams(&self) {
        self.inner.lock().expect("stats lock poisoned").dreams += 1;
    }

    /// Adds processed bytes and refreshes the rolling average page size
    pub fn add_bytes(&self, bytes: u64) {
        let mut inner = self.inner.lock().expect("stats lock poisoned");
        inner.bytes += bytes;
        if inner.pages > 0 {
            inner.avg_page_size = inner.bytes as f64 / inner.pages as f64;
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.inner.lock().expect("stats lock poisoned");
        StatsSnapshot {
            pages: inner.pages,
            errors: inner.errors,
            dreams: inner.dreams,
            bytes: inner.bytes,
            avg_page_size: inner.avg_page_size,
        }
    }
}

/// Logs a stats line every 30 seconds until cancellation
pub async fn run_reporter(stats: std::sync::Arc<CrawlerStats>, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(REPORT_INTERVAL);
    ticker.tick().await; // the first tick fires immediately; skip it
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {
                let s = stats.snapshot();
                tracing::info!(
                    "Stats: Pages: {}, Errors: {}, Dreams: {}, Avg Size: {:.1} bytes",
                    s.pages, s.errors, s.dreams, s.avg_page_size
                );
            }
        }
    }
}
