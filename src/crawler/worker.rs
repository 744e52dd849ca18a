//! Worker tasks: the fetch-parse-annotate loop
//!
//! Workers share one frontier receiver behind a mutex; each claims a URL
//! exclusively, runs it through the politeness checks and the pipeline, and
//! feeds eligible child links back into the frontier.

use crate::annotate::annotate;
use crate::config::CrawlConfig;
use crate::crawler::{fetch, parse_document, FetchOutcome};
use crate::frontier::{Frontier, UrlWithMetadata};
use crate::model::Document;
use crate::output::CrawlerStats;
use crate::robots::HostPolicyMap;
use crate::urls::host_key;
use reqwest::Client;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Shared state handed to every worker task
pub struct WorkerContext {
    pub config: CrawlConfig,
    pub client: Client,
    pub frontier: Arc<Frontier>,
    pub receiver: Mutex<mpsc::Receiver<UrlWithMetadata>>,
    pub policies: HostPolicyMap,
    pub stats: Arc<CrawlerStats>,
    pub output: mpsc::Sender<Document>,
    pub cancel: CancellationToken,
}

/// Runs one worker until cancellation or frontier close
pub async fn run_worker(id: usize, ctx: Arc<WorkerContext>) {
    loop {
        let entry = {
            let mut receiver = ctx.receiver.lock().await;
            tokio::select! {
                _ = ctx.cancel.cancelled() => return,
                entry = receiver.recv() => match entry {
                    Some(entry) => entry,
                    None => return,
                },
            }
        };

        if process_entry(id, &ctx, entry).await.is_break() {
            return;
        }
    }
}

async fn process_entry(
    id: usize,
    ctx: &WorkerContext,
    entry: UrlWithMetadata,
) -> ControlFlow<()> {
    // First claim wins; later sightings of the same URL are no-ops
    if !ctx.frontier.claim(&entry.url) {
        return ControlFlow::Continue(());
    }

    // Depth is filtered at dequeue so the queue is not wasted on early
    // pruning decisions
    if entry.depth > ctx.config.max_depth {
        return ControlFlow::Continue(());
    }

    let parsed = match Url::parse(&entry.url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("worker {}: bad url {}: {}", id, entry.url, e);
            ctx.stats.increment_errors();
            return ControlFlow::Continue(());
        }
    };
    let Some(host) = host_key(&parsed) else {
        tracing::warn!("worker {}: url without host: {}", id, entry.url);
        ctx.stats.increment_errors();
        return ControlFlow::Continue(());
    };

    if !ctx.config.host_allowed(&host) {
        return ControlFlow::Continue(());
    }

    let policies = ctx
        .policies
        .get_or_create(parsed.scheme(), &host, &ctx.client, &ctx.cancel);

    if !policies.is_allowed(parsed.path()).await {
        tracing::info!("worker {}: disallowed by robots: {}", id, entry.url);
        return ControlFlow::Continue(());
    }

    if !policies.acquire_permit(&ctx.cancel).await {
        return ControlFlow::Break(());
    }

    tracing::debug!("worker {}: fetching {} (depth: {})", id, entry.url, entry.depth);
    let page = match fetch(&ctx.client, &ctx.cancel, &entry.url).await {
        Ok(FetchOutcome::Page(page)) => page,
        Ok(FetchOutcome::Cancelled) => return ControlFlow::Break(()),
        Err(e) => {
            tracing::warn!("worker {}: fetch error {}: {}", id, entry.url, e);
            ctx.stats.increment_errors();
            return ControlFlow::Continue(());
        }
    };

    let mut doc = parse_document(&page, &parsed, entry.depth);
    doc.dream_hints = annotate(&doc);

    ctx.stats.increment_pages();
    ctx.stats.add_bytes(doc.text.len() as u64);

    let children: Vec<UrlWithMetadata> = doc
        .links
        .iter()
        .filter(|link| link.priority > 0)
        .map(|link| {
            UrlWithMetadata::child(link.url.clone(), &entry.url, entry.depth, link.priority)
        })
        .collect();

    if ctx.output.send(doc).await.is_err() {
        // Dispatcher is gone; the run is over
        return ControlFlow::Break(());
    }

    for child in children {
        ctx.frontier.enqueue(child);
    }

    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::Frontier;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context_for(
        config: CrawlConfig,
    ) -> (Arc<WorkerContext>, Arc<Frontier>, mpsc::Receiver<Document>) {
        let (frontier, rx) = Frontier::channel(config.queue_size);
        let frontier = Arc::new(frontier);
        let (out_tx, out_rx) = mpsc::channel(16);
        let ctx = Arc::new(WorkerContext {
            config,
            client: crate::crawler::build_http_client(Duration::from_secs(2)).unwrap(),
            frontier: Arc::clone(&frontier),
            receiver: Mutex::new(rx),
            policies: HostPolicyMap::new(),
            stats: Arc::new(CrawlerStats::new()),
            output: out_tx,
            cancel: CancellationToken::new(),
        });
        (ctx, frontier, out_rx)
    }

    #[tokio::test]
    async fn claimed_urls_are_processed_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<body>hello there</body>"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (ctx, frontier, mut out_rx) = context_for(CrawlConfig::default());
        let url = format!("{}/page", server.uri());

        // Same URL enqueued twice; only the first claim fetches
        frontier.enqueue(UrlWithMetadata::seed(url.clone()));
        frontier.enqueue(UrlWithMetadata::seed(url.clone()));

        let worker_ctx = Arc::clone(&ctx);
        let handle = tokio::spawn(async move { run_worker(0, worker_ctx).await });

        let doc = tokio::time::timeout(Duration::from_secs(5), out_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.status, 200);
        assert_eq!(ctx.stats.snapshot().pages, 1);

        ctx.cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn whitelist_skips_foreign_hosts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<body>nope</body>"))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = CrawlConfig::default();
        config.allowed_domains = Some(["elsewhere.test".to_string()].into_iter().collect());
        let (ctx, frontier, _out_rx) = context_for(config);

        frontier.enqueue(UrlWithMetadata::seed(format!("{}/page", server.uri())));

        let worker_ctx = Arc::clone(&ctx);
        let handle = tokio::spawn(async move { run_worker(0, worker_ctx).await });
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(ctx.stats.snapshot().pages, 0);
        ctx.cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn depth_beyond_max_is_never_fetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<body>deep</body>"))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = CrawlConfig::default();
        config.max_depth = 1;
        let (ctx, frontier, _out_rx) = context_for(config);

        frontier.enqueue(UrlWithMetadata::child(
            format!("{}/deep", server.uri()),
            "https://parent.test/",
            1,
            3,
        ));

        let worker_ctx = Arc::clone(&ctx);
        let handle = tokio::spawn(async move { run_worker(0, worker_ctx).await });
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(ctx.stats.snapshot().pages, 0);
        ctx.cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn unparseable_url_counts_as_error() {
        let server = MockServer::start().await;
        let (ctx, frontier, _out_rx) = context_for(CrawlConfig::default());

        frontier.enqueue(UrlWithMetadata::seed("not a url at all".to_string()));

        let worker_ctx = Arc::clone(&ctx);
        let handle = tokio::spawn(async move { run_worker(0, worker_ctx).await });
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(ctx.stats.snapshot().errors, 1);
        assert_eq!(ctx.stats.snapshot().pages, 0);
        ctx.cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn child_links_are_requeued_with_incremented_depth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<body><a href="/next">continue reading here</a></body>"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/next"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<body>the next page</body>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (ctx, frontier, mut out_rx) = context_for(CrawlConfig::default());
        frontier.enqueue(UrlWithMetadata::seed(format!("{}/start", server.uri())));

        let worker_ctx = Arc::clone(&ctx);
        let handle = tokio::spawn(async move { run_worker(0, worker_ctx).await });

        let first = tokio::time::timeout(Duration::from_secs(5), out_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(first.url.ends_with("/start"));

        let second = tokio::time::timeout(Duration::from_secs(5), out_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(second.url.ends_with("/next"));

        ctx.cancel.cancel();
        handle.await.unwrap();
    }
}
