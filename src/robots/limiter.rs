//! Token-bucket rate limiter
//!
//! One bucket per host. The default refill interval (one token per 500ms)
//! can be replaced once the host's robots.txt reports a crawl delay.

use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

struct BucketState {
    tokens: f64,
    capacity: f64,
    /// Time to mint one token
    interval: Duration,
    last_refill: Instant,
}

impl BucketState {
    fn refill(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        let minted = elapsed / self.interval.as_secs_f64();
        self.tokens = (self.tokens + minted).min(self.capacity);
        self.last_refill = now;
    }
}

/// Cancellation-aware token bucket
pub struct TokenBucket {
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Creates a bucket minting one token per `interval`, starting full
    pub fn new(interval: Duration, burst: u32) -> Self {
        Self {
            state: Mutex::new(BucketState {
                tokens: burst as f64,
                capacity: burst as f64,
                interval,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Replaces the refill interval
    ///
    /// Accrued tokens are settled at the old rate first, so a pending waiter
    /// never gains retroactive credit.
    pub fn set_interval(&self, interval: Duration) {
        let mut state = self.state.lock().expect("bucket lock poisoned");
        state.refill(Instant::now());
        state.interval = interval;
    }

    /// Waits for one token
    ///
    /// Returns `false` without consuming a token when the cancellation signal
    /// fires first.
    pub async fn acquire(&self, cancel: &CancellationToken) -> bool {
        loop {
            let wait = {
                let mut state = self.state.lock().expect("bucket lock poisoned");
                state.refill(Instant::now());
                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return true;
                }
                let deficit = 1.0 - state.tokens;
                Duration::from_secs_f64(
                    (deficit * state.interval.as_secs_f64()).max(0.001),
                )
            };

            tokio::select! {
                _ = cancel.cancelled() => return false,
                _ = sleep(wait) => {}
            }
        }
    }

    #[cfg(test)]
    fn interval(&self) -> Duration {
        self.state.lock().expect("bucket lock poisoned").interval
    }
}

impl Default for TokenBucket {
    /// The politeness default: one request per 500ms, burst 1
    fn default() -> Self {
        Self::new(Duration::from_millis(500), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_token_is_immediate() {
        let bucket = TokenBucket::new(Duration::from_secs(60), 1);
        let cancel = CancellationToken::new();
        let start = Instant::now();
        assert!(bucket.acquire(&cancel).await);
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn second_token_waits_for_refill() {
        let bucket = TokenBucket::new(Duration::from_millis(100), 1);
        let cancel = CancellationToken::new();
        let start = Instant::now();
        assert!(bucket.acquire(&cancel).await);
        assert!(bucket.acquire(&cancel).await);
        assert!(start.elapsed() >= Duration::from_millis(90));
    }

    #[tokio::test]
    async fn cancellation_interrupts_wait() {
        let bucket = TokenBucket::new(Duration::from_secs(60), 1);
        let cancel = CancellationToken::new();
        assert!(bucket.acquire(&cancel).await);

        cancel.cancel();
        let start = Instant::now();
        assert!(!bucket.acquire(&cancel).await);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn set_interval_replaces_rate() {
        let bucket = TokenBucket::default();
        assert_eq!(bucket.interval(), Duration::from_millis(500));
        bucket.set_interval(Duration::from_secs(2));
        assert_eq!(bucket.interval(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn burst_allows_consecutive_tokens() {
        let bucket = TokenBucket::new(Duration::from_secs(60), 3);
        let cancel = CancellationToken::new();
        let start = Instant::now();
        for _ in 0..3 {
            assert!(bucket.acquire(&cancel).await);
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
