use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// User-Agent header sent with every HTTP request
pub const USER_AGENT: &str = "WebCrawlerThatDreams/1.0 (+https://github.com/dreamweaver/crawler)";

/// Agent token used when consulting robots.txt rule groups
pub const ROBOTS_AGENT: &str = "WebCrawlerThatDreams/1.0";

/// Version string attached to every published message
pub const CRAWLER_VERSION: &str = "dream-crawler-v1.0";

/// Resolved crawler configuration
///
/// Built from command-line flags by the binary; library consumers construct
/// it directly (see the integration tests).
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Number of parallel worker tasks
    pub workers: usize,

    /// Frontier channel capacity
    pub queue_size: usize,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,

    /// Maximum crawl depth from seeds (seeds are depth 0)
    pub max_depth: u32,

    /// Whether the surrealism-gated dream topic is published
    pub enable_dreaming: bool,

    /// Host whitelist; `None` allows all hosts
    pub allowed_domains: Option<HashSet<String>>,

    /// Kafka bootstrap broker address
    pub kafka_broker: String,

    /// Topic receiving every fetched document
    pub raw_topic: String,

    /// Topic receiving documents whose surrealism exceeds the gate
    pub dream_topic: String,

    /// Wall-clock budget for the whole crawl
    pub budget: Duration,

    /// Seed URLs, already parsed and validated
    pub seeds: Vec<Url>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            queue_size: 1000,
            request_timeout: Duration::from_secs(15),
            max_depth: 3,
            enable_dreaming: true,
            allowed_domains: None,
            kafka_broker: "localhost:9092".to_string(),
            raw_topic: "raw.content".to_string(),
            dream_topic: "dream.seeds".to_string(),
            budget: Duration::from_secs(180),
            seeds: Vec::new(),
        }
    }
}

impl CrawlConfig {
    /// Returns true if `host` passes the whitelist (or no whitelist is set)
    pub fn host_allowed(&self, host: &str) -> bool {
        match &self.allowed_domains {
            Some(domains) => domains.contains(host),
            None => true,
        }
    }
}
