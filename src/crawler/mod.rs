//! The crawl engine
//!
//! This module contains the fetch/parse/enrich loop and its concurrent
//! dispatch model:
//! - HTTP fetching over a single shared client
//! - HTML parsing and semantic extraction
//! - The worker pool consuming the frontier
//! - Overall crawl coordination, budget enforcement, and shutdown

mod coordinator;
mod fetcher;
mod parser;
mod worker;

pub use coordinator::run_crawl;
pub use fetcher::{build_http_client, fetch, FetchOutcome, FetchedPage};
pub use parser::parse_document;
