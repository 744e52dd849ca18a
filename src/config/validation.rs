//! Validation of flag-derived configuration
//!
//! Seed parsing and whitelist parsing happen before any task is spawned;
//! a bad seed is a fatal init error, never a crawl error.

use crate::{ConfigError, ConfigResult};
use std::collections::HashSet;
use url::Url;

use super::CrawlConfig;

/// Validates a resolved configuration
///
/// # Errors
///
/// Returns `ConfigError::Validation` when a numeric limit is zero or no
/// seeds were supplied.
pub fn validate(config: &CrawlConfig) -> ConfigResult<()> {
    if config.workers == 0 {
        return Err(ConfigError::Validation(
            "workers must be greater than 0".to_string(),
        ));
    }
    if config.queue_size == 0 {
        return Err(ConfigError::Validation(
            "queue size must be greater than 0".to_string(),
        ));
    }
    if config.request_timeout.is_zero() {
        return Err(ConfigError::Validation(
            "timeout must be greater than 0".to_string(),
        ));
    }
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }
    Ok(())
}

/// Parses positional seed arguments into URLs
///
/// Only absolute http(s) URLs are accepted.
pub fn parse_seeds(raw: &[String]) -> ConfigResult<Vec<Url>> {
    let mut seeds = Vec::with_capacity(raw.len());
    for s in raw {
        let url = Url::parse(s).map_err(|e| ConfigError::InvalidSeed {
            url: s.clone(),
            reason: e.to_string(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidSeed {
                url: s.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        seeds.push(url);
    }
    Ok(seeds)
}

/// Parses the comma-separated `--domains` whitelist
///
/// An empty string means "allow all" and yields `None`.
pub fn parse_domain_whitelist(raw: &str) -> Option<HashSet<String>> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(
        raw.split(',')
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_zero_workers() {
        let mut config = CrawlConfig::default();
        config.seeds = parse_seeds(&["https://example.test/".to_string()]).unwrap();
        config.workers = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn validate_rejects_empty_seeds() {
        let config = CrawlConfig::default();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn validate_accepts_defaults_with_seed() {
        let mut config = CrawlConfig::default();
        config.seeds = parse_seeds(&["https://example.test/".to_string()]).unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn parse_seeds_rejects_garbage() {
        let result = parse_seeds(&["not a url".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_seeds_rejects_non_http_scheme() {
        let result = parse_seeds(&["ftp://example.test/file".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_domain_whitelist_empty_allows_all() {
        assert!(parse_domain_whitelist("").is_none());
        assert!(parse_domain_whitelist("   ").is_none());
    }

    #[test]
    fn parse_domain_whitelist_splits_and_trims() {
        let domains = parse_domain_whitelist("a.test, b.test ,c.test").unwrap();
        assert_eq!(domains.len(), 3);
        assert!(domains.contains("a.test"));
        assert!(domains.contains("b.test"));
        assert!(domains.contains("c.test"));
    }
}
