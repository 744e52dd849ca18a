//! Crawl orchestration
//!
//! Wires the frontier, worker pool, dispatcher, seeder, and stats reporter
//! together under a single root cancellation token, enforces the wall-clock
//! budget, and drains everything on shutdown.

use crate::config::{self, CrawlConfig};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::worker::{run_worker, WorkerContext};
use crate::frontier::{Frontier, UrlWithMetadata};
use crate::model::Document;
use crate::output::{
    run_dispatcher, run_reporter, CrawlerStats, DispatcherConfig, EventSink, StatsSnapshot,
};
use crate::robots::HostPolicyMap;
use crate::urls::canonicalize;
use crate::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl and returns the final counters
///
/// Shutdown sequence on budget expiry: the root token is cancelled, the
/// seeder and workers drain and exit, the worker-output channel closes, and
/// the dispatcher flushes the sink before returning.
pub async fn run_crawl(config: CrawlConfig, sink: Arc<dyn EventSink>) -> Result<StatsSnapshot> {
    config::validate(&config)?;

    let client = build_http_client(config.request_timeout)?;
    let cancel = CancellationToken::new();
    let stats = Arc::new(CrawlerStats::new());

    let (frontier, frontier_rx) = Frontier::channel(config.queue_size);
    let frontier = Arc::new(frontier);
    let (output_tx, output_rx) = mpsc::channel::<Document>(config.workers.max(1));

    let dispatcher = tokio::spawn(run_dispatcher(
        output_rx,
        Arc::clone(&sink),
        DispatcherConfig {
            raw_topic: config.raw_topic.clone(),
            dream_topic: config.dream_topic.clone(),
            enable_dreaming: config.enable_dreaming,
        },
        Arc::clone(&stats),
    ));

    let reporter = tokio::spawn(run_reporter(Arc::clone(&stats), cancel.clone()));

    let ctx = Arc::new(WorkerContext {
        config: config.clone(),
        client,
        frontier: Arc::clone(&frontier),
        receiver: Mutex::new(frontier_rx),
        policies: HostPolicyMap::new(),
        stats: Arc::clone(&stats),
        output: output_tx,
        cancel: cancel.clone(),
    });

    let mut workers = Vec::with_capacity(config.workers);
    for id in 0..config.workers {
        workers.push(tokio::spawn(run_worker(id, Arc::clone(&ctx))));
    }
    // Workers hold the only remaining output senders; once they exit the
    // dispatcher's input closes
    drop(ctx);

    let seeder = {
        let frontier = Arc::clone(&frontier);
        let cancel = cancel.clone();
        let seeds: Vec<String> = config.seeds.iter().map(canonicalize).collect();
        tokio::spawn(async move {
            for seed in seeds {
                let entry = UrlWithMetadata::seed(seed);
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    sent = frontier.enqueue_seed(entry) => {
                        if !sent {
                            return;
                        }
                    }
                }
            }
        })
    };

    tracing::info!(
        "Dream crawler starting: {} workers, {} seeds, budget {:?}",
        config.workers,
        config.seeds.len(),
        config.budget
    );

    tokio::time::sleep(config.budget).await;
    tracing::info!("Shutting down gracefully...");
    cancel.cancel();

    let _ = seeder.await;
    for worker in workers {
        let _ = worker.await;
    }
    let _ = reporter.await;
    let _ = dispatcher.await;

    let summary = stats.snapshot();
    tracing::info!(
        "Crawl complete. Pages processed: {}, Errors: {}, Dreams generated: {}, Avg size: {:.1} bytes",
        summary.pages,
        summary.errors,
        summary.dreams,
        summary.avg_page_size
    );
    Ok(summary)
}
