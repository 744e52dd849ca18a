//! Lazily populated per-host policy cache

use crate::config::ROBOTS_AGENT;
use crate::robots::{RobotsPolicy, TokenBucket};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Cached politeness record for a single host
///
/// `robots` stays `None` while the background fetch is in flight or after it
/// failed; both mean "allow". Once published the rules never change for the
/// rest of the run.
pub struct HostPolicies {
    robots: RwLock<Option<RobotsPolicy>>,
    limiter: TokenBucket,
}

impl HostPolicies {
    fn new() -> Self {
        Self {
            robots: RwLock::new(None),
            limiter: TokenBucket::default(),
        }
    }

    /// Checks the host's robots rules for `path`; absent rules allow
    pub async fn is_allowed(&self, path: &str) -> bool {
        match self.robots.read().await.as_ref() {
            Some(policy) => policy.is_allowed(path, ROBOTS_AGENT),
            None => true,
        }
    }

    /// Waits for a rate-limit token; returns false when cancelled
    pub async fn acquire_permit(&self, cancel: &CancellationToken) -> bool {
        self.limiter.acquire(cancel).await
    }

    async fn publish_robots(&self, policy: RobotsPolicy) {
        if let Some(delay) = policy.crawl_delay(ROBOTS_AGENT) {
            if delay > 0.0 {
                self.limiter.set_interval(Duration::from_secs_f64(delay));
            }
        }
        *self.robots.write().await = Some(policy);
    }

    #[cfg(test)]
    pub async fn set_robots_for_test(&self, policy: RobotsPolicy) {
        self.publish_robots(policy).await;
    }
}

/// Shared map of host policies
///
/// Lookup and insert run under a single mutex; everything inside the record
/// is internally synchronized, so holders never touch the map again.
pub struct HostPolicyMap {
    inner: Mutex<HashMap<String, Arc<HostPolicies>>>,
}

impl HostPolicyMap {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the record for `host`, creating it on first sight
    ///
    /// Creation schedules a one-shot background fetch of
    /// `scheme://host/robots.txt`; until it lands the record allows
    /// everything at the default rate.
    pub fn get_or_create(
        &self,
        scheme: &str,
        host: &str,
        client: &Client,
        cancel: &CancellationToken,
    ) -> Arc<HostPolicies> {
        let mut map = self.inner.lock().expect("host policy map lock poisoned");
        if let Some(existing) = map.get(host) {
            return Arc::clone(existing);
        }

        let policies = Arc::new(HostPolicies::new());
        map.insert(host.to_string(), Arc::clone(&policies));

        let robots_url = format!("{}://{}/robots.txt", scheme, host);
        tokio::spawn(fetch_robots(
            client.clone(),
            robots_url,
            Arc::clone(&policies),
            cancel.clone(),
        ));

        policies
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("host policy map lock poisoned").len()
    }
}

impl Default for HostPolicyMap {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot robots.txt fetch; any failure leaves the host permissive
async fn fetch_robots(
    client: Client,
    robots_url: String,
    policies: Arc<HostPolicies>,
    cancel: CancellationToken,
) {
    let response = tokio::select! {
        _ = cancel.cancelled() => return,
        result = client.get(&robots_url).send() => match result {
            Ok(response) => response,
            Err(_) => return,
        },
    };

    if response.status() != StatusCode::OK {
        return;
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(_) => return,
    };

    tracing::debug!("parsed robots.txt from {}", robots_url);
    policies.publish_robots(RobotsPolicy::from_content(&body)).await;
}
