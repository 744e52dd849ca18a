//! Dream crawler entry point

use clap::Parser;
use dream_crawler::config::{parse_domain_whitelist, parse_seeds, CrawlConfig};
use dream_crawler::crawler::run_crawl;
use dream_crawler::output::KafkaSink;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// A web crawler that dreams
///
/// Fetches public web pages breadth-first under per-host politeness rules,
/// extracts semantic structure and dream hints, and publishes every document
/// onto the event bus for downstream AI processing.
#[derive(Parser, Debug)]
#[command(name = "dream-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A web crawler that dreams", long_about = None)]
struct Cli {
    /// Number of crawler workers
    #[arg(long, default_value_t = 10)]
    workers: usize,

    /// URL queue buffer size
    #[arg(long, default_value_t = 1000)]
    queue: usize,

    /// HTTP client timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Maximum crawl depth
    #[arg(long = "max-depth", default_value_t = 3)]
    max_depth: u32,

    /// Enable the surrealism-gated dream topic
    #[arg(long = "enable-dreaming", default_value_t = true, action = clap::ArgAction::Set)]
    enable_dreaming: bool,

    /// Comma-separated list of allowed domains (empty = allow all)
    #[arg(long, default_value = "")]
    domains: String,

    /// Kafka broker address
    #[arg(long = "kafka-broker", default_value = "localhost:9092")]
    kafka_broker: String,

    /// Kafka topic for raw content
    #[arg(long = "kafka-topic", default_value = "raw.content")]
    kafka_topic: String,

    /// Kafka topic for dream-ready content
    #[arg(long = "dream-topic", default_value = "dream.seeds")]
    dream_topic: String,

    /// Wall-clock crawl budget in seconds
    #[arg(long, default_value_t = 180)]
    budget: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Seed URLs to start crawling from
    #[arg(value_name = "SEED_URL", required = true)]
    seeds: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let seeds = match parse_seeds(&cli.seeds) {
        Ok(seeds) => seeds,
        Err(e) => {
            tracing::error!("Seed parsing failed: {}", e);
            return Err(e.into());
        }
    };

    let config = CrawlConfig {
        workers: cli.workers,
        queue_size: cli.queue,
        request_timeout: Duration::from_secs(cli.timeout),
        max_depth: cli.max_depth,
        enable_dreaming: cli.enable_dreaming,
        allowed_domains: parse_domain_whitelist(&cli.domains),
        kafka_broker: cli.kafka_broker.clone(),
        raw_topic: cli.kafka_topic.clone(),
        dream_topic: cli.dream_topic.clone(),
        budget: Duration::from_secs(cli.budget),
        seeds,
    };

    tracing::info!("Connecting to event bus at {}", config.kafka_broker);
    let sink = match KafkaSink::connect(&config.kafka_broker).await {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            tracing::error!("Event bus connection failed: {}", e);
            return Err(e.into());
        }
    };

    match run_crawl(config, sink).await {
        Ok(summary) => {
            tracing::info!(
                "Done: {} pages, {} errors, {} dreams",
                summary.pages,
                summary.errors,
                summary.dreams
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("dream_crawler=info,warn"),
        1 => EnvFilter::new("dream_crawler=debug,info"),
        2 => EnvFilter::new("dream_crawler=trace,debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
