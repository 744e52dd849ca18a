//! robots.txt rule evaluation
//!
//! Allow/deny matching is delegated to the robotstxt crate. `Crawl-delay` is
//! parsed by hand because the crate does not expose it; the directive applies
//! to the preceding `User-agent` group, and an agent-specific value wins over
//! a wildcard one.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt rules for one host
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    content: String,
}

impl RobotsPolicy {
    /// Wraps raw robots.txt content for later matching
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Checks whether `path` is allowed for the given user agent
    ///
    /// Empty content allows everything.
    pub fn is_allowed(&self, path: &str, user_agent: &str) -> bool {
        if self.content.is_empty() {
            return true;
        }
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, path)
    }

    /// Extracts the crawl delay (seconds) for the given user agent
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        let normalized = user_agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut extending_group = false;
        let mut wildcard: Option<f64> = None;
        let mut specific: Option<f64> = None;

        for line in self.content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // Consecutive User-agent lines form one group
                    if !extending_group {
                        group.clear();
                    }
                    group.push(value.to_lowercase());
                    extending_group = true;
                }
                "crawl-delay" => {
                    extending_group = false;
                    if let Ok(delay) = value.parse::<f64>() {
                        if group.iter().any(|ua| ua == "*") {
                            wildcard = Some(delay);
                        } else if group.iter().any(|ua| normalized.contains(ua.as_str())) {
                            specific = Some(delay);
                        }
                    }
                }
                _ => {
                    extending_group = false;
                }
            }
        }

        specific.or(wildcard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENT: &str = "WebCrawlerThatDreams/1.0";

    #[test]
    fn empty_content_allows_all() {
        let policy = RobotsPolicy::from_content("");
        assert!(policy.is_allowed("/any/path", AGENT));
    }

    #[test]
    fn disallow_all() {
        let policy = RobotsPolicy::from_content("User-agent: *\nDisallow: /");
        assert!(!policy.is_allowed("/", AGENT));
        assert!(!policy.is_allowed("/page", AGENT));
    }

    #[test]
    fn disallow_prefix() {
        let policy = RobotsPolicy::from_content("User-agent: *\nDisallow: /secret");
        assert!(policy.is_allowed("/", AGENT));
        assert!(policy.is_allowed("/ok", AGENT));
        assert!(!policy.is_allowed("/secret", AGENT));
        assert!(!policy.is_allowed("/secret/page", AGENT));
    }

    #[test]
    fn allow_overrides_disallow() {
        let policy =
            RobotsPolicy::from_content("User-agent: *\nDisallow: /private\nAllow: /private/pub");
        assert!(!policy.is_allowed("/private", AGENT));
        assert!(policy.is_allowed("/private/pub", AGENT));
    }

    #[test]
    fn specific_agent_group() {
        let policy = RobotsPolicy::from_content(
            "User-agent: WebCrawlerThatDreams\nDisallow: /\n\nUser-agent: *\nAllow: /",
        );
        assert!(!policy.is_allowed("/page", AGENT));
        assert!(policy.is_allowed("/page", "SomeOtherBot"));
    }

    #[test]
    fn crawl_delay_wildcard() {
        let policy = RobotsPolicy::from_content("User-agent: *\nCrawl-delay: 10\nDisallow: /x");
        assert_eq!(policy.crawl_delay(AGENT), Some(10.0));
    }

    #[test]
    fn crawl_delay_specific_wins_over_wildcard() {
        let policy = RobotsPolicy::from_content(
            "User-agent: webcrawlerthatdreams\nCrawl-delay: 5\n\nUser-agent: *\nCrawl-delay: 10",
        );
        assert_eq!(policy.crawl_delay(AGENT), Some(5.0));
        assert_eq!(policy.crawl_delay("OtherBot"), Some(10.0));
    }

    #[test]
    fn crawl_delay_absent() {
        let policy = RobotsPolicy::from_content("User-agent: *\nDisallow: /admin");
        assert_eq!(policy.crawl_delay(AGENT), None);
    }

    #[test]
    fn crawl_delay_fractional() {
        let policy = RobotsPolicy::from_content("User-agent: *\nCrawl-delay: 2.5");
        assert_eq!(policy.crawl_delay(AGENT), Some(2.5));
    }

    #[test]
    fn crawl_delay_multi_agent_group() {
        let policy =
            RobotsPolicy::from_content("User-agent: bota\nUser-agent: botb\nCrawl-delay: 3");
        assert_eq!(policy.crawl_delay("BotA/2.0"), Some(3.0));
        assert_eq!(policy.crawl_delay("BotB/1.1"), Some(3.0));
        assert_eq!(policy.crawl_delay("BotC"), None);
    }

    #[test]
    fn crawl_delay_ignores_comments() {
        let policy =
            RobotsPolicy::from_content("# politeness\nUser-agent: *\nCrawl-delay: 4 # seconds");
        assert_eq!(policy.crawl_delay(AGENT), Some(4.0));
    }

    #[test]
    fn crawl_delay_garbage_value_skipped() {
        let policy = RobotsPolicy::from_content("User-agent: *\nCrawl-delay: soon");
        assert_eq!(policy.crawl_delay(AGENT), None);
    }
}
