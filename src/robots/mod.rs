//! Per-host politeness: robots.txt rules and rate limiting
//!
//! Each host gets a lazily created [`HostPolicies`] record holding its parsed
//! robots.txt rules (absent until the one-shot background fetch lands, which
//! means "allow") and a token-bucket rate limiter. Records live in a
//! [`HostPolicyMap`] shared by all workers.

mod cache;
mod limiter;
mod rules;

pub use cache::{HostPolicies, HostPolicyMap};
pub use limiter::TokenBucket;
pub use rules::RobotsPolicy;
